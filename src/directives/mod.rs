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

//! # Directives Module
//!
//! Bundled reference directives.
//!
//! - **length**: `text-length :column;` replaces text with its length
//! - **reverse**: `text-reverse :column;` reverses text
//!
//! Both are built on [`crate::directive::ZiColumnDirective`] and are created
//! through factory functions registered in
//! [`crate::registry::ZiDirectiveRegistry::with_builtins`].

pub mod length;
pub mod reverse;

pub use length::{
    text_length_factory, ZiLengthUnit, ZiTextLength, ZiTextLengthDirective, TEXT_LENGTH,
};
pub use reverse::{text_reverse_factory, ZiTextReverse, ZiTextReverseDirective, TEXT_REVERSE};
