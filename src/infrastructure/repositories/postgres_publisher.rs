// src/infrastructure/repositories/postgres_publisher.rs
use std::collections::{BTreeMap, BTreeSet};

use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::{
    NewPublisher, Publisher, PublisherId, PublisherName, PublisherRepository, StaffRoster,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresPublisherRepository {
    pool: PgPool,
}

impl PostgresPublisherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roster(&self, table: &str, ids: &[i64]) -> DomainResult<Vec<(i64, i64)>> {
        sqlx::query_as::<_, (i64, i64)>(&format!(
            "SELECT publisher_id, user_id FROM {table} WHERE publisher_id = ANY($1)"
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    /// Loads staff rosters for the given rows in two queries.
    async fn hydrate(&self, rows: Vec<PublisherRow>) -> DomainResult<Vec<Publisher>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut editors = group(self.roster(roster_table(StaffRoster::Editors), &ids).await?)?;
        let mut journalists =
            group(self.roster(roster_table(StaffRoster::Journalists), &ids).await?)?;

        rows.into_iter()
            .map(|row| {
                Ok(Publisher {
                    id: PublisherId::new(row.id)?,
                    name: PublisherName::new(row.name)?,
                    description: row.description,
                    editors: editors.remove(&row.id).unwrap_or_default(),
                    journalists: journalists.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[derive(Debug, FromRow)]
struct PublisherRow {
    id: i64,
    name: String,
    description: String,
}

fn roster_table(roster: StaffRoster) -> &'static str {
    match roster {
        StaffRoster::Editors => "publisher_editors",
        StaffRoster::Journalists => "publisher_journalists",
    }
}

fn group(pairs: Vec<(i64, i64)>) -> DomainResult<BTreeMap<i64, BTreeSet<UserId>>> {
    let mut grouped: BTreeMap<i64, BTreeSet<UserId>> = BTreeMap::new();
    for (publisher_id, user_id) in pairs {
        grouped
            .entry(publisher_id)
            .or_default()
            .insert(UserId::new(user_id)?);
    }
    Ok(grouped)
}

#[async_trait]
impl PublisherRepository for PostgresPublisherRepository {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher> {
        let row = sqlx::query_as::<_, PublisherRow>(
            "INSERT INTO publishers (name, description) VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(publisher.name.as_str())
        .bind(&publisher.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(Publisher {
            id: PublisherId::new(row.id)?,
            name: PublisherName::new(row.name)?,
            description: row.description,
            editors: BTreeSet::new(),
            journalists: BTreeSet::new(),
        })
    }

    async fn find_by_id(&self, id: PublisherId) -> DomainResult<Option<Publisher>> {
        let row = sqlx::query_as::<_, PublisherRow>(
            "SELECT id, name, description FROM publishers WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Publisher>> {
        let rows = sqlx::query_as::<_, PublisherRow>(
            "SELECT id, name, description FROM publishers ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.hydrate(rows).await
    }

    async fn add_staff(
        &self,
        id: PublisherId,
        roster: StaffRoster,
        user_id: UserId,
    ) -> DomainResult<Publisher> {
        sqlx::query(&format!(
            "INSERT INTO {} (publisher_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            roster_table(roster)
        ))
        .bind(i64::from(id))
        .bind(i64::from(user_id))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("publisher not found".into()))
    }
}
