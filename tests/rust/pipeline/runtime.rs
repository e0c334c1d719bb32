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

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;
use zi_directives::record::{batch_from_json, batch_to_json};
use zi_directives::{ZiDirectiveRegistry, ZiError, ZiPipelineBuilder, ZiRow, ZiRowBatch};

fn pipeline_json() -> serde_json::Value {
    json!({
        "steps": [
            {"directive": "text-reverse", "args": {"column": "body"}},
            {"directive": "text-length", "args": {"column": "name"}}
        ]
    })
}

#[test]
fn pipeline_from_json_runs_in_order() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let pipeline = ZiPipelineBuilder::from_json(&registry, &pipeline_json()).unwrap();
    let batch = batch_from_json(&json!([
        {"name": "hello", "body": "root"},
        {"name": 3, "other": true}
    ]))
    .unwrap();
    let out = pipeline.run(batch).unwrap();
    assert_eq!(
        batch_to_json(&out),
        json!([
            {"name": 5, "body": "toor"},
            {"name": 3, "other": true}
        ])
    );
}

#[test]
fn pipeline_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", pipeline_json()).unwrap();
    let registry = ZiDirectiveRegistry::with_builtins();
    let pipeline = ZiPipelineBuilder::from_json_file(&registry, file.path()).unwrap();
    assert_eq!(pipeline.names(), vec!["text-reverse", "text-length"]);
}

#[test]
fn missing_file_is_io_error() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let dir = tempfile::tempdir().unwrap();
    let err = ZiPipelineBuilder::from_json_file(&registry, dir.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, ZiError::Io(_)));
}

#[test]
fn malformed_config_is_serde_error() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let err = ZiPipelineBuilder::from_json(&registry, &json!({"steps": "nope"})).unwrap_err();
    assert!(matches!(err, ZiError::Serde(_)));
}

#[test]
fn bad_arguments_fail_at_build() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let config = json!({
        "steps": [
            {"directive": "text-reverse", "args": {"column": "body"}},
            {"directive": "text-length", "args": {"col": "name"}}
        ]
    });
    let err = ZiPipelineBuilder::from_json(&registry, &config).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("unknown argument 'col'"));
}

#[test]
fn step_without_args_reports_missing_column() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let config = json!({"steps": [{"directive": "text-length"}]});
    let err = ZiPipelineBuilder::from_json(&registry, &config).unwrap_err();
    assert!(err.to_string().contains("missing required argument 'column'"));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let pipeline = ZiPipelineBuilder::from_json(&registry, &pipeline_json()).unwrap();
    let batch: ZiRowBatch = (0..100)
        .map(|i| {
            ZiRow::new()
                .with_field("name", "x".repeat(i))
                .with_field("body", format!("row-{}", i))
        })
        .collect();
    let sequential = pipeline.run(batch.clone()).unwrap();
    let parallel = pipeline.run_parallel(batch, 7).unwrap();
    assert_eq!(sequential, parallel);
}
