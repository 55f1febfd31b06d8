pub mod draft;
pub mod input;
pub mod report;

pub use draft::*;
pub use input::*;
pub use report::*;
