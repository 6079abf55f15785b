pub mod error;
pub mod visitor;

pub use error::*;
pub use visitor::*;
