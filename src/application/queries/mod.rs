pub mod content;
pub mod publishers;
pub mod users;
