/// Mode descriptions for upstream generators.
pub mod describe;
