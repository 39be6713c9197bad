pub mod cursor;
pub mod entity;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod value_objects;
pub mod workflow;

pub use cursor::ContentCursor;
pub use entity::{ContentItem, ContentUpdate, NewContentItem, StatusUpdate};
pub use repository::{ContentFilter, ContentReadRepository, ContentWriteRepository};
pub use services::SubscriberResolver;
pub use value_objects::{ApprovalStatus, ContentBody, ContentId, ContentKind, ContentTitle};
pub use workflow::{ReviewDecision, StatusTransition};
