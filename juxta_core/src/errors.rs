//! # Error Types
//!
//! Structured error types for juxta_core. The slider never lets an error
//! escape into the host page as a fault: callers log these, hand them to an
//! error callback, or degrade to an inert slider.
//!
//! ## Example
//!
//! ```rust
//! use juxta_core::errors::{JxError, JxResult};
//!
//! fn require_two(count: usize) -> JxResult<()> {
//!     if count != 2 {
//!         return Err(JxError::wrong_image_count(count));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_two(3).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for juxta_core operations
pub type JxResult<T> = Result<T, JxError>;

/// Structured error type for slider operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum JxError {
    /// The slider was given something other than exactly two images
    #[error("The images parameter takes two image objects, got {found}")]
    WrongImageCount { found: usize },

    /// An image reported a load error
    #[error("Image failed to load: {side} image '{src}'")]
    ImageLoadFailed { side: String, src: String },

    /// Images did not finish loading within the configured timeout
    #[error("Images not loaded after {waited_ms} ms")]
    LoadTimeout { waited_ms: u32 },

    /// Options could not be parsed
    #[error("Invalid options: {reason}")]
    InvalidOptions { reason: String },

    /// An operation needs the slider to be initialized first
    #[error("Slider not initialized: {operation}")]
    NotInitialized { operation: String },

    /// The host document refused an operation
    #[error("DOM error: {operation} - {reason}")]
    Dom { operation: String, reason: String },
}

impl JxError {
    /// Create a WrongImageCount error
    pub fn wrong_image_count(found: usize) -> Self {
        JxError::WrongImageCount { found }
    }

    /// Create an ImageLoadFailed error
    pub fn image_load_failed(side: impl Into<String>, src: impl Into<String>) -> Self {
        JxError::ImageLoadFailed {
            side: side.into(),
            src: src.into(),
        }
    }

    /// Create a LoadTimeout error
    pub fn load_timeout(waited_ms: u32) -> Self {
        JxError::LoadTimeout { waited_ms }
    }

    /// Create an InvalidOptions error
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        JxError::InvalidOptions {
            reason: reason.into(),
        }
    }

    /// Create a NotInitialized error
    pub fn not_initialized(operation: impl Into<String>) -> Self {
        JxError::NotInitialized {
            operation: operation.into(),
        }
    }

    /// Create a Dom error
    pub fn dom(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        JxError::Dom {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether the slider can never initialize after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            JxError::WrongImageCount { .. } | JxError::ImageLoadFailed { .. } | JxError::LoadTimeout { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            JxError::WrongImageCount { .. } => "WRONG_IMAGE_COUNT",
            JxError::ImageLoadFailed { .. } => "IMAGE_LOAD_FAILED",
            JxError::LoadTimeout { .. } => "LOAD_TIMEOUT",
            JxError::InvalidOptions { .. } => "INVALID_OPTIONS",
            JxError::NotInitialized { .. } => "NOT_INITIALIZED",
            JxError::Dom { .. } => "DOM_ERROR",
        }
    }
}
