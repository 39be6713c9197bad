// src/infrastructure/notifications/mod.rs
mod broadcast;
mod console;
mod smtp;

pub use broadcast::{DisabledBroadcaster, HttpBroadcaster};
pub use console::ConsoleMailer;
pub use smtp::{SmtpMailer, SmtpSettings};
