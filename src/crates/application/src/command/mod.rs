pub mod generation;
pub mod shared;
