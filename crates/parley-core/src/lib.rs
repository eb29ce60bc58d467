//! Parley Core - Core types for turning interview transcripts into topical chunks.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;
