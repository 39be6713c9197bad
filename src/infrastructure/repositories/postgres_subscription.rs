// src/infrastructure/repositories/postgres_subscription.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::publisher::PublisherId;
use crate::domain::subscription::{SubscriptionRepository, Subscriptions};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ids(&self, sql: &str, id: i64) -> DomainResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn execute_pair(&self, sql: &str, left: i64, right: i64) -> DomainResult<()> {
        sqlx::query(sql)
            .bind(left)
            .bind(right)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

fn user_ids(raw: Vec<i64>) -> DomainResult<Vec<UserId>> {
    raw.into_iter().map(UserId::new).collect()
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn follow_journalist(&self, follower: UserId, journalist: UserId) -> DomainResult<()> {
        self.execute_pair(
            "INSERT INTO user_journalist_follows (follower_id, journalist_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
            follower.into(),
            journalist.into(),
        )
        .await
    }

    async fn unfollow_journalist(
        &self,
        follower: UserId,
        journalist: UserId,
    ) -> DomainResult<()> {
        self.execute_pair(
            "DELETE FROM user_journalist_follows WHERE follower_id = $1 AND journalist_id = $2",
            follower.into(),
            journalist.into(),
        )
        .await
    }

    async fn follow_publisher(
        &self,
        follower: UserId,
        publisher: PublisherId,
    ) -> DomainResult<()> {
        self.execute_pair(
            "INSERT INTO user_publisher_follows (follower_id, publisher_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
            follower.into(),
            publisher.into(),
        )
        .await
    }

    async fn unfollow_publisher(
        &self,
        follower: UserId,
        publisher: PublisherId,
    ) -> DomainResult<()> {
        self.execute_pair(
            "DELETE FROM user_publisher_follows WHERE follower_id = $1 AND publisher_id = $2",
            follower.into(),
            publisher.into(),
        )
        .await
    }

    async fn replace(&self, follower: UserId, subscriptions: &Subscriptions) -> DomainResult<()> {
        let follower = i64::from(follower);
        let journalists: Vec<i64> = subscriptions.journalists.iter().copied().map(i64::from).collect();
        let publishers: Vec<i64> = subscriptions.publishers.iter().copied().map(i64::from).collect();

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("DELETE FROM user_journalist_follows WHERE follower_id = $1")
            .bind(follower)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query("DELETE FROM user_publisher_follows WHERE follower_id = $1")
            .bind(follower)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query(
            "INSERT INTO user_journalist_follows (follower_id, journalist_id)
             SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
        )
        .bind(follower)
        .bind(journalists)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        sqlx::query(
            "INSERT INTO user_publisher_follows (follower_id, publisher_id)
             SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
        )
        .bind(follower)
        .bind(publishers)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)
    }

    async fn subscriptions_of(&self, follower: UserId) -> DomainResult<Subscriptions> {
        let follower = i64::from(follower);
        let journalists = self
            .ids(
                "SELECT journalist_id FROM user_journalist_follows
                 WHERE follower_id = $1 ORDER BY journalist_id",
                follower,
            )
            .await?;
        let publishers = self
            .ids(
                "SELECT publisher_id FROM user_publisher_follows
                 WHERE follower_id = $1 ORDER BY publisher_id",
                follower,
            )
            .await?;

        Ok(Subscriptions {
            journalists: user_ids(journalists)?,
            publishers: publishers
                .into_iter()
                .map(PublisherId::new)
                .collect::<DomainResult<_>>()?,
        })
    }

    async fn followers_of_journalist(&self, journalist: UserId) -> DomainResult<Vec<UserId>> {
        let raw = self
            .ids(
                "SELECT follower_id FROM user_journalist_follows WHERE journalist_id = $1",
                journalist.into(),
            )
            .await?;
        user_ids(raw)
    }

    async fn followers_of_publisher(&self, publisher: PublisherId) -> DomainResult<Vec<UserId>> {
        let raw = self
            .ids(
                "SELECT follower_id FROM user_publisher_follows WHERE publisher_id = $1",
                publisher.into(),
            )
            .await?;
        user_ids(raw)
    }
}
