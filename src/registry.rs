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

//! # Directive Registry Module
//!
//! Maps directive names to factory functions. The registry is an ordinary
//! value owned by the embedding application: build it with
//! [`ZiDirectiveRegistry::with_builtins`] during start-up and drop or
//! [`ZiDirectiveRegistry::clear`] it on shutdown.
//!
//! ## Registry Operations
//!
//! - Register directive factories with unique names
//! - List registered names and their usage definitions
//! - Create unconfigured directives, or create and configure in one step

use std::collections::HashMap;

use log::{debug, warn};

use crate::arguments::{ZiArguments, ZiUsageDefinition};
use crate::directive::ZiDirective;
use crate::directives::{text_length_factory, text_reverse_factory, TEXT_LENGTH, TEXT_REVERSE};
use crate::errors::{Result, ZiError};

/// Builds a fresh, unconfigured directive.
pub type ZiDirectiveFactory = fn() -> Box<dyn ZiDirective + Send + Sync>;

/// Registry mapping directive names to their factory functions.
#[derive(Debug, Default)]
pub struct ZiDirectiveRegistry {
    inner: HashMap<String, ZiDirectiveFactory>,
}

impl ZiDirectiveRegistry {
    pub fn new() -> Self {
        ZiDirectiveRegistry {
            inner: HashMap::new(),
        }
    }

    /// Creates a registry pre-loaded with the bundled directives.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        self.inner
            .insert(TEXT_LENGTH.to_string(), text_length_factory as ZiDirectiveFactory);
        self.inner
            .insert(TEXT_REVERSE.to_string(), text_reverse_factory as ZiDirectiveFactory);
    }

    /// Registers a factory. Names are unique; registering a taken name fails.
    ///
    /// The key must equal the name the built directive reports, so usage
    /// definitions and error messages always match the registered name.
    pub fn register(&mut self, name: &str, factory: ZiDirectiveFactory) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ZiError::validation("directive name may not be empty"));
        }
        let declared = factory().name();
        if declared != name {
            warn!(
                "refusing to register directive '{}' under name '{}'",
                declared, name
            );
            return Err(ZiError::validation(format!(
                "directive '{}' cannot be registered as '{}'",
                declared, name
            )));
        }
        if self.inner.contains_key(name) {
            warn!("refusing to replace registered directive '{}'", name);
            return Err(ZiError::validation(format!(
                "directive '{}' is already registered",
                name
            )));
        }
        debug!("registered directive '{}'", name);
        self.inner.insert(name.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Result<ZiDirectiveFactory> {
        self.inner
            .get(name)
            .copied()
            .ok_or_else(|| ZiError::validation(format!("unknown directive: {}", name)))
    }

    /// Usage definition of a registered directive.
    pub fn definition(&self, name: &str) -> Result<ZiUsageDefinition> {
        let factory = self.get(name)?;
        Ok(factory().define())
    }

    /// Usage definitions of every registered directive, sorted by name.
    pub fn definitions(&self) -> Vec<ZiUsageDefinition> {
        self.names()
            .into_iter()
            .filter_map(|name| self.inner.get(name).map(|factory| factory().define()))
            .collect()
    }

    /// Creates an unconfigured directive.
    pub fn create(&self, name: &str) -> Result<Box<dyn ZiDirective + Send + Sync>> {
        let factory = self.get(name)?;
        Ok(factory())
    }

    /// Creates a directive and configures it with `args`.
    pub fn configure(
        &self,
        name: &str,
        args: &ZiArguments,
    ) -> Result<Box<dyn ZiDirective + Send + Sync>> {
        let mut directive = self.create(name)?;
        directive.configure(args)?;
        Ok(directive)
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        debug!("clearing {} registered directives", self.inner.len());
        self.inner.clear();
    }
}
