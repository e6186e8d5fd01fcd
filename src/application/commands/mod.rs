mod translation;

pub use translation::{RequestTranslationCommand, TranslationCommandService};
