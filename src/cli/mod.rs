//! CLI command handling

pub mod hook;
pub mod inspect;
pub mod output;

pub use hook::*;
pub use inspect::*;
pub use output::*;
