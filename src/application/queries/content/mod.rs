mod get;
mod list;
mod service;

pub use get::GetContentQuery;
pub use list::{ContentView, ListContentQuery, MAX_PAGE_SIZE};
pub use service::ContentQueryService;
