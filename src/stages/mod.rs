pub mod assemble;
pub mod normalize;

pub use assemble::*;
pub use normalize::*;
