//! Locating and reading the transaction document.

mod read;
mod source;

pub use read::read_input;
pub use source::InputSource;
