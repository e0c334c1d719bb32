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

//! # Zi Directives
//!
//! Row-level directives for Zi wrangling pipelines, and the contract they
//! implement. A directive is configured once with a target column, then maps
//! batches of rows to batches of rows until it is torn down.
//!
//! ## Module Overview
//!
//! - **errors**: `ZiError` and the crate `Result` alias
//! - **value**: `ZiFieldValue`, the closed set of field value kinds
//! - **record**: `ZiRow`, an ordered field map, and `ZiRowBatch`
//! - **arguments**: typed directive arguments and usage definitions
//! - **directive**: the `ZiDirective` contract and `ZiColumnDirective`
//! - **directives**: bundled `text-length` and `text-reverse`
//! - **registry**: directive name to factory mapping
//! - **pipeline**: ordered composition of configured directives
//!
//! ## Feature Flags
//!
//! - `parallel`: enables `ZiPipeline::run_parallel` (Rayon)
//!
//! ## Quick Start
//!
//! ```rust
//! use zi_directives::{ZiArguments, ZiDirectiveRegistry, ZiFieldValue, ZiRow};
//!
//! let registry = ZiDirectiveRegistry::with_builtins();
//! let args = ZiArguments::new("text-length").with_column("column", "name");
//! let directive = registry.configure("text-length", &args).unwrap();
//!
//! let out = directive.apply(vec![ZiRow::new().with_field("name", "hello")]).unwrap();
//! assert_eq!(out[0].get("name"), Some(&ZiFieldValue::Integer(5)));
//! ```
//!
//! ## Error Handling
//!
//! Only configuration and lifecycle misuse produce errors. A row missing the
//! target column, or holding a value kind the directive does not handle,
//! passes through unchanged.

pub mod arguments;
pub mod directive;
pub mod directives;
pub mod errors;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod value;

pub use arguments::{ZiArgumentSpec, ZiArguments, ZiToken, ZiTokenType, ZiUsageDefinition};
pub use directive::{
    execute_directive, ZiColumnDirective, ZiDirective, ZiDirectiveConfig, ZiDirectiveState,
    ZiTextTransform, COLUMN_ARGUMENT,
};
pub use directives::{
    text_length_factory, text_reverse_factory, ZiLengthUnit, ZiTextLength, ZiTextReverse,
    TEXT_LENGTH, TEXT_REVERSE,
};
pub use errors::{Result, ZiError};
pub use pipeline::{ZiPipeline, ZiPipelineBuilder, ZiPipelineConfig, ZiPipelineStepConfig};
pub use record::{ZiRow, ZiRowBatch};
pub use registry::{ZiDirectiveFactory, ZiDirectiveRegistry};
pub use value::{ZiFieldValue, ZiValueKind};
