pub mod translation_sync;

pub use translation_sync::{
    MissingConfiguration, SyncOutcome, SyncReport, TranslationSyncJob, TranslationSyncSettings,
};
