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

use serde_json::json;
use zi_directives::record::batch_from_json;
use zi_directives::{
    text_length_factory, text_reverse_factory, ZiArguments, ZiColumnDirective, ZiDirective,
    ZiFieldValue, ZiLengthUnit, ZiRow, ZiTextLength, TEXT_LENGTH, TEXT_REVERSE,
};

fn configured(
    factory: fn() -> Box<dyn ZiDirective + Send + Sync>,
    name: &str,
    column: &str,
) -> Box<dyn ZiDirective + Send + Sync> {
    let mut directive = factory();
    directive
        .configure(&ZiArguments::new(name).with_column("column", column))
        .unwrap();
    directive
}

#[test]
fn reverse_csv_like_body() {
    let op = configured(text_reverse_factory, TEXT_REVERSE, "body");
    let rec = ZiRow::new().with_field("body", "root,joltie, Mars Avenue");
    let out = op.apply(vec![rec]).unwrap();
    assert_eq!(
        out[0].get("body"),
        Some(&ZiFieldValue::from("eunevA sraM ,eitloj,toor"))
    );
}

#[test]
fn reverse_short_word() {
    let op = configured(text_reverse_factory, TEXT_REVERSE, "b");
    let out = op.apply(vec![ZiRow::new().with_field("b", "root")]).unwrap();
    assert_eq!(out[0].to_json(), json!({"b": "toor"}));
}

#[test]
fn length_of_name_is_integer() {
    let op = configured(text_length_factory, TEXT_LENGTH, "name");
    let out = op.apply(vec![ZiRow::new().with_field("name", "hello")]).unwrap();
    assert_eq!(out[0].get("name"), Some(&ZiFieldValue::Integer(5)));
    assert_eq!(out[0].to_json(), json!({"name": 5}));
}

#[test]
fn length_leaves_numbers_alone() {
    let op = configured(text_length_factory, TEXT_LENGTH, "x");
    let out = op.apply(vec![ZiRow::new().with_field("x", 42)]).unwrap();
    assert_eq!(out[0].to_json(), json!({"x": 42}));
}

#[test]
fn reverse_missing_field_is_identity() {
    let op = configured(text_reverse_factory, TEXT_REVERSE, "b");
    let out = op.apply(vec![ZiRow::new().with_field("a", 1)]).unwrap();
    assert_eq!(out[0].to_json(), json!({"a": 1}));
}

#[test]
fn heterogeneous_batch_from_json() {
    let op = configured(text_length_factory, TEXT_LENGTH, "v");
    let batch = batch_from_json(&json!([
        {"id": 1, "v": "four"},
        {"id": 2, "v": null},
        {"id": 3},
        {"id": 4, "v": ["a", "b"]},
        {"v": "😀", "id": 5}
    ]))
    .unwrap();
    let out = op.apply(batch).unwrap();
    let rendered: Vec<_> = out.iter().map(ZiRow::to_json).collect();
    assert_eq!(
        rendered,
        vec![
            json!({"id": 1, "v": 4}),
            json!({"id": 2, "v": null}),
            json!({"id": 3}),
            json!({"id": 4, "v": ["a", "b"]}),
            json!({"v": 2, "id": 5}),
        ]
    );
}

#[test]
fn length_by_code_point() {
    let mut op = ZiColumnDirective::new(ZiTextLength::with_unit(ZiLengthUnit::CodePoint));
    op.configure(&ZiArguments::new(TEXT_LENGTH).with_column("column", "v"))
        .unwrap();
    let out = op.apply(vec![ZiRow::new().with_field("v", "😀😀")]).unwrap();
    assert_eq!(out[0].get("v"), Some(&ZiFieldValue::Integer(2)));
}

#[test]
fn reverse_bytes_written_as_text() {
    let op = configured(text_reverse_factory, TEXT_REVERSE, "raw");
    let out = op
        .apply(vec![ZiRow::new().with_field("raw", "abc".as_bytes())])
        .unwrap();
    assert_eq!(out[0].get("raw").and_then(ZiFieldValue::as_text), Some("cba"));
}
