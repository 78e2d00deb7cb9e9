//! Text tools: preprocessing preview and thesaurus export

mod export_thesaurus;
mod preprocess_text;

pub use export_thesaurus::ExportThesaurusTool;
pub use preprocess_text::PreprocessTextTool;
