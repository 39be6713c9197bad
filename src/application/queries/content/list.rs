use std::str::FromStr;

use super::ContentQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto, CursorPage},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::content::{ApprovalStatus, ContentCursor, ContentFilter, ContentKind},
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Which slice of the catalogue to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentView {
    #[default]
    All,
    /// Items by followed journalists or under followed publishers.
    Subscribed,
}

impl FromStr for ContentView {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "subscribed" => Ok(Self::Subscribed),
            other => Err(ApplicationError::invalid_field(
                "view",
                format!("unknown view '{other}'"),
            )),
        }
    }
}

pub struct ListContentQuery {
    pub kind: ContentKind,
    pub view: ContentView,
    pub status: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

impl ListContentQuery {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            view: ContentView::All,
            status: None,
            cursor: None,
            limit: None,
        }
    }
}

impl ContentQueryService {
    pub async fn list(
        &self,
        viewer: Option<&AuthenticatedUser>,
        query: ListContentQuery,
    ) -> ApplicationResult<CursorPage<ContentDto>> {
        let mut errors = FieldErrors::new();
        let requested = match query.status.as_deref() {
            Some(raw) => errors.take("status", raw.parse::<ApprovalStatus>())?,
            None => None,
        };
        let cursor = match query.cursor.as_deref() {
            Some(raw) => errors.take("cursor", ContentCursor::decode(raw))?,
            None => None,
        };
        errors.finish()?;

        let Some(status) = visible_status(viewer, requested) else {
            return Ok(CursorPage::empty());
        };

        let limit = normalize_limit(query.limit);
        let mut filter = ContentFilter::new(query.kind, limit as usize + 1);
        filter.status = status;
        filter.cursor = cursor;

        if query.view == ContentView::Subscribed {
            let Some(viewer) = viewer else {
                return Ok(CursorPage::empty());
            };
            let subscriptions = self.subscription_repo.subscriptions_of(viewer.id).await?;
            if subscriptions.is_empty() {
                return Ok(CursorPage::empty());
            }
            filter.audience = Some(subscriptions);
        }

        let mut records = self.read_repo.list_page(&filter).await?;
        let next_cursor = if records.len() > limit as usize {
            records.truncate(limit as usize);
            records
                .last()
                .map(|last| ContentCursor::new(last.created_at, last.id.0).encode())
        } else {
            None
        };

        let items = records.into_iter().map(Into::into).collect();
        Ok(CursorPage::new(items, next_cursor))
    }
}

/// Status filter the viewer is entitled to. `None` means the request can only
/// ever yield an empty page; `Some(None)` means no status filter at all.
fn visible_status(
    viewer: Option<&AuthenticatedUser>,
    requested: Option<ApprovalStatus>,
) -> Option<Option<ApprovalStatus>> {
    if viewer.is_some_and(AuthenticatedUser::may_review) {
        return Some(requested);
    }
    match requested {
        None | Some(ApprovalStatus::Approved) => Some(Some(ApprovalStatus::Approved)),
        Some(_) => None,
    }
}

fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(value) => value.min(MAX_PAGE_SIZE),
    }
}
