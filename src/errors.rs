//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Zi Directive Error Module
//!
//! Error types shared by directives, the directive registry and the
//! embedding pipeline.
//!
//! ## Error Categories
//!
//! - **Configuration**: a directive was configured with missing or malformed
//!   arguments; raised only while a pipeline is being built
//! - **InvalidState**: a directive was driven out of lifecycle order, e.g.
//!   `apply` before `configure`; this is a programming defect
//! - **Execution**: a directive could not process a batch; aborts the run
//! - **Validation**: registry or builder misuse (unknown, duplicate or mismatched names)
//! - **Pipeline**: failures while orchestrating several directives
//! - **Io** / **Serde**: loading pipeline configuration
//! - **Internal**: unexpected situations
//!
//! A record that lacks the target field, or whose field holds a kind the
//! directive does not handle, is never an error. Directives leave such
//! records untouched.
//!
//! ## Usage
//!
//! ```rust
//! use zi_directives::errors::{Result, ZiError};
//!
//! fn column(arg: Option<&str>) -> Result<&str> {
//!     arg.ok_or_else(|| ZiError::configuration("text-length", "missing argument 'column'"))
//! }
//!
//! assert!(column(None).is_err());
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zi directives.
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum ZiError {
    /// Required directive argument missing or of the wrong kind.
    #[error("directive '{directive}' configuration error: {message}")]
    Configuration { directive: String, message: String },

    /// Directive lifecycle misuse.
    #[error("directive '{directive}' cannot {operation} while {state}")]
    InvalidState {
        directive: String,
        state: String,
        operation: String,
    },

    /// Unrecoverable per-batch failure raised by a directive.
    #[error("directive '{directive}' failed: {message}")]
    Execution { directive: String, message: String },

    /// Invalid parameters given to the registry or a builder.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct configuration errors.
    pub fn configuration(directive: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Configuration {
            directive: directive.into(),
            message: message.into(),
        }
    }

    /// Helper to construct lifecycle errors.
    pub fn invalid_state(
        directive: impl Into<String>,
        state: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        ZiError::InvalidState {
            directive: directive.into(),
            state: state.into(),
            operation: operation.into(),
        }
    }

    /// Helper to construct execution errors.
    pub fn execution(directive: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Execution {
            directive: directive.into(),
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }

    /// True for errors raised while building a pipeline, before any row flows.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ZiError::Configuration { .. })
    }

    /// True for lifecycle misuse.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ZiError::InvalidState { .. })
    }
}
