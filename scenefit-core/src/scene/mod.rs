/// Scene input definitions and the normalized scene.
pub mod model;
