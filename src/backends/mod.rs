// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod command;
pub mod local;
#[cfg(test)]
pub mod stub;
