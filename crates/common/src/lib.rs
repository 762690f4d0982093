//! Error plumbing shared by every monster crate.

pub mod error;

pub use error::FromMessage;
