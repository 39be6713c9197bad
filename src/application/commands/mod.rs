pub mod content;
pub mod publishers;
pub mod subscriptions;
pub mod users;
