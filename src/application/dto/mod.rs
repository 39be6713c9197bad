pub mod auth;
pub mod content;
pub mod pagination;
pub mod publishers;
pub mod serde_time;
pub mod subscriptions;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use content::ContentDto;
pub use pagination::CursorPage;
pub use publishers::PublisherDto;
pub use subscriptions::SubscriptionsDto;
pub use users::{JournalistDto, UserDto, UserProfileDto};
