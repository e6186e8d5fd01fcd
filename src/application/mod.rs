pub mod commands;
pub mod error;
pub mod jobs;
pub mod ports;
pub mod publish;
pub mod services;

pub use error::ApplicationResult;
