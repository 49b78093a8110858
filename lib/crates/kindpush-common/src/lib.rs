pub mod reference;
pub mod types;

pub use reference::{ImageRef, ReferenceError};
pub use types::*;
