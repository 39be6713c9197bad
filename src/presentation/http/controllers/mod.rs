// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod content;
pub mod journalists;
pub mod publishers;
pub mod subscriptions;
