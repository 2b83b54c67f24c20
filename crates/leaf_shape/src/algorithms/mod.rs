pub mod preprocessing;
pub mod extraction;
pub mod selection;

pub use preprocessing::*;
pub use extraction::*;
pub use selection::*;
