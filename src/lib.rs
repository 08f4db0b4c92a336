// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends; // processor backends
pub mod config; // run config + registry
pub mod context; // artifact context
pub mod engine; // graph executor
pub mod errors; // error handling
pub mod graph; // graph model, files, validation
pub mod observability;
pub mod traits; // unified abstractions
