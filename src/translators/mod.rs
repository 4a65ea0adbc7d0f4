// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Provider translators: fetch a catalog and turn it into a [`SourceFile`](crate::schema::SourceFile).

pub mod common;
pub mod factory;
pub mod font_squirrel;
pub mod google_fonts;
pub mod nerd_fonts;
pub mod open_foundry;

#[cfg(test)]
pub(crate) mod stub;
#[cfg(test)]
mod integration_tests;

pub use factory::TranslatorFactory;
pub use font_squirrel::FontSquirrelTranslator;
pub use google_fonts::GoogleFontsTranslator;
pub use nerd_fonts::NerdFontsTranslator;
pub use open_foundry::OpenFoundryTranslator;
