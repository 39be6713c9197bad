// src/infrastructure/repositories/postgres_content.rs
use super::map_sqlx;
use crate::domain::content::{
    ApprovalStatus, ContentBody, ContentFilter, ContentId, ContentItem, ContentKind,
    ContentReadRepository, ContentTitle, ContentUpdate, ContentWriteRepository, NewContentItem,
    StatusUpdate,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const CONTENT_COLUMNS: &str =
    "id, kind, title, body, status, author_id, publisher_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresContentWriteRepository {
    pool: PgPool,
}

impl PostgresContentWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresContentReadRepository {
    pool: PgPool,
}

impl PostgresContentReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    id: i64,
    kind: String,
    title: String,
    body: String,
    status: String,
    author_id: i64,
    publisher_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for ContentItem {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let kind = row.kind.parse::<ContentKind>()?;
        Ok(ContentItem {
            id: ContentId::new(row.id)?,
            kind,
            title: ContentTitle::new(kind, row.title)?,
            body: ContentBody::new(row.body)?,
            status: row.status.parse::<ApprovalStatus>()?,
            author_id: UserId::new(row.author_id)?,
            publisher_id: row.publisher_id.map(PublisherId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ContentWriteRepository for PostgresContentWriteRepository {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem> {
        let NewContentItem {
            kind,
            title,
            body,
            status,
            author_id,
            publisher_id,
            created_at,
            updated_at,
        } = item;

        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "INSERT INTO content_items (kind, title, body, status, author_id, publisher_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {CONTENT_COLUMNS}"
        ))
        .bind(kind.as_str())
        .bind(title.as_str())
        .bind(body.as_str())
        .bind(status.as_str())
        .bind(i64::from(author_id))
        .bind(publisher_id.map(i64::from))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        ContentItem::try_from(row)
    }

    async fn update_content(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let ContentUpdate {
            id,
            kind,
            title,
            body,
            publisher_id,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "UPDATE content_items
             SET title = $1, body = $2, publisher_id = $3, updated_at = $4
             WHERE id = $5 AND kind = $6
             RETURNING {CONTENT_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(body.as_str())
        .bind(publisher_id.map(i64::from))
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("{} not found", kind.as_str())))?;

        ContentItem::try_from(row)
    }

    async fn update_status(&self, update: StatusUpdate) -> DomainResult<Option<ContentItem>> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "UPDATE content_items
             SET status = $1, updated_at = $2
             WHERE id = $3 AND kind = $4 AND status = $5
             RETURNING {CONTENT_COLUMNS}"
        ))
        .bind(update.next.as_str())
        .bind(update.updated_at)
        .bind(i64::from(update.id))
        .bind(update.kind.as_str())
        .bind(update.expected.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ContentItem::try_from).transpose()
    }

    async fn delete(&self, kind: ContentKind, id: ContentId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1 AND kind = $2")
            .bind(i64::from(id))
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("{} not found", kind.as_str())));
        }
        Ok(())
    }
}

impl PostgresContentReadRepository {
    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &ContentFilter) {
        builder.push(" WHERE kind = ");
        builder.push_bind(filter.kind.as_str());

        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(audience) = &filter.audience {
            let journalists: Vec<i64> = audience.journalists.iter().copied().map(i64::from).collect();
            let publishers: Vec<i64> = audience.publishers.iter().copied().map(i64::from).collect();
            builder.push(" AND (author_id = ANY(");
            builder.push_bind(journalists);
            builder.push(") OR publisher_id = ANY(");
            builder.push_bind(publishers);
            builder.push("))");
        }

        if let Some(cursor) = &filter.cursor {
            builder.push(" AND (created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
    }
}

#[async_trait]
impl ContentReadRepository for PostgresContentReadRepository {
    async fn find_by_id(
        &self,
        kind: ContentKind,
        id: ContentId,
    ) -> DomainResult<Option<ContentItem>> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content_items WHERE id = $1 AND kind = $2"
        ))
        .bind(i64::from(id))
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ContentItem::try_from).transpose()
    }

    async fn list_page(&self, filter: &ContentFilter) -> DomainResult<Vec<ContentItem>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CONTENT_COLUMNS} FROM content_items"));
        Self::apply_conditions(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::try_from(filter.limit).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(ContentItem::try_from).collect()
    }
}
