use async_trait::async_trait;

use crate::config::SourceKind;
use crate::errors::TranslatorError;
use crate::schema::SourceFile;

/// Converts one provider's catalog into a source file.
///
/// Implementations fetch and transform; writing the result and validating it
/// is left to the engine.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self) -> Result<SourceFile, TranslatorError>;

    fn source_kind(&self) -> SourceKind;

    /// Catalog URL the translator reads from.
    fn endpoint(&self) -> String;

    /// File name the translated source is written to, relative to the output directory.
    fn output_file(&self) -> &str;
}
