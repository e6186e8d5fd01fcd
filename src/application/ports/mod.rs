// src/application/ports/mod.rs
pub mod events;
pub mod lock;
pub mod time;
pub mod translation;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ClockPort = dyn time::Clock;
pub type LockManagerPort = dyn lock::LockManager;
pub type TranslationProviderPort = dyn translation::TranslationProvider;
pub type ArticleEventPublisherPort = dyn events::ArticleEventPublisher;
