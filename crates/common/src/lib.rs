//! Types shared by the Trustpilot OAuth library and CLI

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
