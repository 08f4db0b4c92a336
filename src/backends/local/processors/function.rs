// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ProcessorError;
use crate::traits::{Arguments, Outputs, Processor};

/// Adapts a synchronous closure to the [`Processor`] trait.
///
/// Used for processors registered programmatically through
/// [`ProcessorRegistry::register_fn`](crate::config::ProcessorRegistry::register_fn).
pub struct FnProcessor<F> {
    id: String,
    f: F,
}

impl<F> FnProcessor<F>
where
    F: Fn(Arguments) -> Result<Outputs, ProcessorError> + Send + Sync,
{
    pub fn new(id: impl Into<String>, f: F) -> Self {
        Self { id: id.into(), f }
    }
}

#[async_trait]
impl<F> Processor for FnProcessor<F>
where
    F: Fn(Arguments) -> Result<Outputs, ProcessorError> + Send + Sync,
{
    async fn process(&self, args: Arguments) -> Result<Outputs, ProcessorError> {
        (self.f)(args)
    }

    fn name(&self) -> &str {
        &self.id
    }
}
