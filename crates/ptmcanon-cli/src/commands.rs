pub mod canonize;
pub mod patterns;
