//! Higher-level operations composed from several Cloud Foundry API calls

pub mod error;
pub mod push;

pub use error::{Error, Result};
pub use push::{AppPushOperation, PushStep};
