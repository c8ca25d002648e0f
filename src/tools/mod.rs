//! Tools module
//!
//! Operations behind the command-line interface. Each returns a
//! serializable response or a message describing what went wrong.

pub mod convert;
pub mod recipes;
pub mod reports;
pub mod status;
