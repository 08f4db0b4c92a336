// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod function;
pub mod passthrough;
pub mod write_json;

pub use function::*;
pub use passthrough::*;
pub use write_json::*;
