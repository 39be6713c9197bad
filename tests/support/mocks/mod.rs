// tests/support/mocks/mod.rs
pub mod notifications;
pub mod security;
pub mod store;
pub mod time;

pub use notifications::{
    FailingBroadcaster, FailingMailer, GatedMailer, RecordingBroadcaster, RecordingMailer,
};
pub use security::{PlainPasswordHasher, StaticTokenManager};
pub use store::InMemoryStore;
pub use time::FixedClock;
