use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayoutError::malformed("x")
            .to_string()
            .contains("malformed scene:")
    );
    assert!(LayoutError::config("x").to_string().contains("config error:"));
    assert!(
        LayoutError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: LayoutError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
    assert!(matches!(err, LayoutError::Serde(_)));
}
