// src/domain/mod.rs
pub mod article;
pub mod errors;
pub mod subscriber;
pub mod text;
pub mod translation;
pub mod vocabulary;
pub mod wire;
pub mod workflow;
