// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod article_repos;
pub mod events;
pub mod locks;
pub mod provider;
pub mod repos;
pub mod time;

pub use article_repos::InMemoryArticles;
pub use events::RecordingEvents;
pub use locks::{LockCall, ScriptedLocks};
pub use provider::ScriptedProvider;
pub use repos::{DESK, DONE, FixedSequence, InMemoryVocabularies, InMemoryWorkflow, TODO};
pub use time::{FixedClock, fixed_now};
