//! # Humanize Core
//!
//! Request and response types, the error taxonomy, and the [`HumanizerService`]
//! trait that sits between the edge handlers and the upstream humanizer.

pub mod errors;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use errors::{ProxyError, ProxyResult};
pub use traits::HumanizerService;
pub use types::{HumanizeRequest, HumanizeResult, ProcessingMode, RequestedMode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use async_trait::async_trait;
}
