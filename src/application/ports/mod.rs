// src/application/ports/mod.rs
pub mod notification;
pub mod security;
pub mod time;

pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type TokenManagerPort = dyn security::TokenManager;
pub type ClockPort = dyn time::Clock;
pub type MailerPort = dyn notification::Mailer;
pub type BroadcasterPort = dyn notification::Broadcaster;
