// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::PersistenceError;

/// Progress event emitted by the graph executor.
///
/// For each node the executor emits `NodeStarted`, zero or more
/// `ArtifactProduced`, then exactly one of `NodeCompleted` or `NodeFailed`.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent<'a> {
    NodeStarted { source: &'a str, target: &'a str },
    ArtifactProduced { path: &'a str, kind: &'a str },
    NodeCompleted { duration_ms: u64 },
    NodeFailed { duration_ms: u64, message: &'a str },
}

/// Subscriber to executor progress.
///
/// An observer error aborts the run: the run log is the only durable record of
/// progress, so a run that can no longer be recorded must not continue. The
/// exception is `NodeFailed`, where the run is already aborting and the node
/// failure is returned instead.
pub trait RunObserver {
    fn on_event(&mut self, event: &RunEvent<'_>) -> Result<(), PersistenceError>;
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_event(&mut self, _event: &RunEvent<'_>) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Fans every event out to several observers in order.
#[derive(Default)]
pub struct Observers<'a>(Vec<&'a mut dyn RunObserver>);

impl<'a> Observers<'a> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, observer: &'a mut dyn RunObserver) -> Self {
        self.0.push(observer);
        self
    }
}

impl RunObserver for Observers<'_> {
    fn on_event(&mut self, event: &RunEvent<'_>) -> Result<(), PersistenceError> {
        for observer in self.0.iter_mut() {
            observer.on_event(event)?;
        }
        Ok(())
    }
}
