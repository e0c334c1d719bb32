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

//! # Zi Directive Pipeline Module
//!
//! Ordered composition of configured directives, as an embedding host would
//! assemble them. Every directive is configured while the pipeline is built,
//! so argument problems surface from [`ZiPipelineBuilder::build`] before any
//! row flows.
//!
//! ## Configuration
//!
//! Pipelines can be described in JSON:
//!
//! ```json
//! {
//!   "steps": [
//!     {"directive": "text-reverse", "args": {"column": "body"}},
//!     {"directive": "text-length",  "args": {"column": "body"}}
//!   ]
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use zi_directives::{ZiArguments, ZiDirectiveRegistry, ZiPipelineBuilder, ZiRow};
//!
//! let registry = ZiDirectiveRegistry::with_builtins();
//! let mut pipeline = ZiPipelineBuilder::new(&registry)
//!     .directive("text-reverse", &ZiArguments::new("text-reverse").with_column("column", "b"))
//!     .build()
//!     .unwrap();
//!
//! let out = pipeline.run(vec![ZiRow::new().with_field("b", "root")]).unwrap();
//! pipeline.teardown();
//! ```

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::arguments::ZiArguments;
use crate::directive::{execute_directive, ZiDirective};
use crate::errors::{Result, ZiError};
use crate::record::ZiRowBatch;
use crate::registry::ZiDirectiveRegistry;

/// One step of a JSON pipeline description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiPipelineStepConfig {
    pub directive: String,
    #[serde(default)]
    pub args: Value,
}

/// JSON pipeline description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiPipelineConfig {
    pub steps: Vec<ZiPipelineStepConfig>,
}

/// Linear pipeline of configured directives.
#[derive(Debug)]
pub struct ZiPipeline {
    stages: Vec<Box<dyn ZiDirective + Send + Sync>>,
    torn_down: bool,
}

impl ZiPipeline {
    /// Wraps already-configured directives.
    pub fn new(stages: Vec<Box<dyn ZiDirective + Send + Sync>>) -> Self {
        ZiPipeline {
            stages,
            torn_down: false,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(ZiError::pipeline("pipeline", "no directives configured"));
        }
        Ok(())
    }

    /// Runs the batch through each directive in order.
    pub fn run(&self, mut batch: ZiRowBatch) -> Result<ZiRowBatch> {
        for stage in &self.stages {
            batch = execute_directive(stage.as_ref(), batch)?;
        }
        Ok(batch)
    }

    /// Runs the batch as independent chunks of at most `chunk_size` rows.
    pub fn run_chunked(&self, batch: ZiRowBatch, chunk_size: usize) -> Result<ZiRowBatch> {
        let mut out = Vec::with_capacity(batch.len());
        for chunk in split_batch(batch, chunk_size)? {
            out.extend(self.run(chunk)?);
        }
        Ok(out)
    }

    /// Like [`ZiPipeline::run`], reporting `(directive, rows_in, rows_out)`
    /// after each stage.
    pub fn run_with_progress(
        &self,
        mut batch: ZiRowBatch,
        progress: impl Fn(&str, usize, usize),
    ) -> Result<ZiRowBatch> {
        for stage in &self.stages {
            let before = batch.len();
            batch = execute_directive(stage.as_ref(), batch)?;
            progress(stage.name(), before, batch.len());
        }
        Ok(batch)
    }

    /// Processes chunks concurrently against the same configured directives.
    /// Output order matches input order.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, batch: ZiRowBatch, chunk_size: usize) -> Result<ZiRowBatch> {
        use rayon::prelude::*;

        let processed = split_batch(batch, chunk_size)?
            .into_par_iter()
            .map(|chunk| self.run(chunk))
            .collect::<Result<Vec<_>>>()?;
        Ok(processed.into_iter().flatten().collect())
    }

    /// Tears down every directive. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            warn!("pipeline already torn down");
            return;
        }
        self.teardown_stages();
    }

    fn teardown_stages(&mut self) {
        for stage in &mut self.stages {
            stage.teardown();
        }
        self.torn_down = true;
        info!("pipeline with {} directives torn down", self.stages.len());
    }
}

impl Drop for ZiPipeline {
    fn drop(&mut self) {
        if !self.torn_down {
            self.teardown_stages();
        }
    }
}

fn split_batch(batch: ZiRowBatch, chunk_size: usize) -> Result<Vec<ZiRowBatch>> {
    if chunk_size == 0 {
        return Err(ZiError::validation("chunk size must be positive"));
    }
    let mut chunks = Vec::with_capacity(batch.len().div_ceil(chunk_size));
    let mut rows = batch.into_iter();
    loop {
        let chunk: ZiRowBatch = rows.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    Ok(chunks)
}

/// Builder that configures directives from a registry.
pub struct ZiPipelineBuilder<'a> {
    registry: &'a ZiDirectiveRegistry,
    stages: Vec<Box<dyn ZiDirective + Send + Sync>>,
    error: Option<ZiError>,
}

impl<'a> ZiPipelineBuilder<'a> {
    pub fn new(registry: &'a ZiDirectiveRegistry) -> Self {
        ZiPipelineBuilder {
            registry,
            stages: Vec::new(),
            error: None,
        }
    }

    /// Appends a directive configured with `args`. The first failure is kept
    /// and reported by [`ZiPipelineBuilder::build`].
    pub fn directive(mut self, name: &str, args: &ZiArguments) -> Self {
        if self.error.is_none() {
            match self.registry.configure(name, args) {
                Ok(directive) => self.stages.push(directive),
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    /// Appends a directive whose arguments are a JSON object.
    pub fn directive_json(self, name: &str, args: &Value) -> Self {
        if self.error.is_some() {
            return self;
        }
        let resolved = self
            .registry
            .definition(name)
            .and_then(|usage| ZiArguments::from_json(&usage, args));
        match resolved {
            Ok(args) => self.directive(name, &args),
            Err(err) => self.fail(err),
        }
    }

    fn fail(mut self, err: ZiError) -> Self {
        self.error = Some(err);
        self
    }

    pub fn build(mut self) -> Result<ZiPipeline> {
        if let Some(err) = self.error.take() {
            for stage in &mut self.stages {
                stage.teardown();
            }
            return Err(err);
        }
        let pipeline = ZiPipeline::new(std::mem::take(&mut self.stages));
        pipeline.validate()?;
        info!("pipeline built: {}", pipeline.names().join(" -> "));
        Ok(pipeline)
    }

    pub fn from_config(
        registry: &'a ZiDirectiveRegistry,
        config: &ZiPipelineConfig,
    ) -> Result<ZiPipeline> {
        config
            .steps
            .iter()
            .fold(Self::new(registry), |builder, step| {
                builder.directive_json(&step.directive, &step.args)
            })
            .build()
    }

    pub fn from_json(registry: &'a ZiDirectiveRegistry, config: &Value) -> Result<ZiPipeline> {
        let config: ZiPipelineConfig = serde_json::from_value(config.clone())?;
        Self::from_config(registry, &config)
    }

    pub fn from_json_file(
        registry: &'a ZiDirectiveRegistry,
        path: impl AsRef<Path>,
    ) -> Result<ZiPipeline> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: ZiPipelineConfig = serde_json::from_str(&text)?;
        Self::from_config(registry, &config)
    }
}
