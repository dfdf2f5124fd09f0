/// Distances below this are treated as touching rather than colliding.
pub(crate) const GEOM_EPSILON: f64 = 1e-6;

/// Golden angle in radians; spreads spiral seeds without clustering.
pub(crate) const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Seeded SplitMix64 generator. Jitter is derived from the scene seed so the
/// same scene always lays out the same way.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[lo, hi)`.
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }
}

/// Per-element seed mixing the scene seed with the element id.
pub(crate) fn element_seed(scene_seed: u64, id: &str) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(scene_seed);
    h.write_bytes(id.as_bytes());
    h.finish()
}

/// Deterministic unit direction for separating coincident points.
pub(crate) fn fallback_direction(i: usize, j: usize) -> kurbo::Vec2 {
    let angle = GOLDEN_ANGLE * ((i * 31 + j) as f64);
    kurbo::Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
