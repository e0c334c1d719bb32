//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd project team.
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

//! `text-reverse :column;` reverses the text held by a column.
//!
//! Reversal is by code point, so surrogate pairs in UTF-16 terms stay intact.
//! Grapheme clusters are not kept together: `"e\u{301}"` reverses to
//! `"\u{301}e"` and the accent moves to the wrong base character.

use crate::directive::{ZiColumnDirective, ZiDirective, ZiTextTransform};
use crate::value::ZiFieldValue;

pub const TEXT_REVERSE: &str = "text-reverse";

#[derive(Clone, Debug, Default)]
pub struct ZiTextReverse;

impl ZiTextTransform for ZiTextReverse {
    fn name(&self) -> &'static str {
        TEXT_REVERSE
    }

    fn description(&self) -> &'static str {
        "Reverses the text represented by the column."
    }

    fn derive(&self, text: &str) -> ZiFieldValue {
        ZiFieldValue::Text(text.chars().rev().collect())
    }
}

pub type ZiTextReverseDirective = ZiColumnDirective<ZiTextReverse>;

pub fn text_reverse_factory() -> Box<dyn ZiDirective + Send + Sync> {
    Box::new(ZiColumnDirective::new(ZiTextReverse))
}
