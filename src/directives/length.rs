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

//! `text-length :column;` replaces a text column with its length.
//!
//! Length is counted in UTF-16 code units by default, which is what hosts
//! built on UTF-16 strings report: `"héllo"` is 5, but `"😀"` is 2. Use
//! [`ZiTextLength::with_unit`] to count code points or UTF-8 bytes instead.
//! Byte columns are decoded as UTF-8 first and then counted in the same unit,
//! except under [`ZiLengthUnit::Utf8Byte`], which reports the raw byte count
//! so invalid sequences are not inflated by U+FFFD replacement.

use serde::{Deserialize, Serialize};

use crate::directive::{ZiColumnDirective, ZiDirective, ZiTextTransform};
use crate::value::ZiFieldValue;

pub const TEXT_LENGTH: &str = "text-length";

/// Unit used when measuring text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiLengthUnit {
    #[default]
    Utf16CodeUnit,
    CodePoint,
    Utf8Byte,
}

impl ZiLengthUnit {
    pub fn count(&self, text: &str) -> usize {
        match self {
            ZiLengthUnit::Utf16CodeUnit => text.encode_utf16().count(),
            ZiLengthUnit::CodePoint => text.chars().count(),
            ZiLengthUnit::Utf8Byte => text.len(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ZiTextLength {
    unit: ZiLengthUnit,
}

impl ZiTextLength {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(unit: ZiLengthUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> ZiLengthUnit {
        self.unit
    }
}

impl ZiTextTransform for ZiTextLength {
    fn name(&self) -> &'static str {
        TEXT_LENGTH
    }

    fn description(&self) -> &'static str {
        "Computes the length of the string."
    }

    fn derive(&self, text: &str) -> ZiFieldValue {
        let count = self.unit.count(text);
        length_value(count)
    }

    fn derive_bytes(&self, bytes: &[u8]) -> ZiFieldValue {
        match self.unit {
            ZiLengthUnit::Utf8Byte => length_value(bytes.len()),
            ZiLengthUnit::Utf16CodeUnit | ZiLengthUnit::CodePoint => {
                self.derive(&String::from_utf8_lossy(bytes))
            }
        }
    }
}

fn length_value(count: usize) -> ZiFieldValue {
    ZiFieldValue::Integer(i64::try_from(count).unwrap_or(i64::MAX))
}

pub type ZiTextLengthDirective = ZiColumnDirective<ZiTextLength>;

pub fn text_length_factory() -> Box<dyn ZiDirective + Send + Sync> {
    Box::new(ZiColumnDirective::new(ZiTextLength::new()))
}
