pub mod database;
pub mod events;
pub mod lock;
pub mod repositories;
pub mod time;
pub mod translation;
