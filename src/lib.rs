// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // config loading + runtime
pub mod engine;        // translation runner
pub mod errors;        // error handling
pub mod fetch;         // shared HTTP client
pub mod observability;
pub mod schema;        // source format, rules, validation
pub mod traits;        // translator abstraction
pub mod translators;   // one translator per provider
