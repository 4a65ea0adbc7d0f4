// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod runner;

pub use runner::{TranslationOutcome, TranslationRunner, TranslationSummary};
