// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod invoker;

pub use executor::GraphExecutor;
pub use invoker::{AmbientKeys, StepInvoker};
