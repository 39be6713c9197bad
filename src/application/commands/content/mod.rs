// src/application/commands/content/mod.rs
mod create;
mod delete;
mod service;
mod status;
mod update;

pub use create::CreateContentCommand;
pub use delete::DeleteContentCommand;
pub use service::ContentCommandService;
pub use status::{ChangeStatusCommand, ReviewContentCommand};
pub use update::UpdateContentCommand;
