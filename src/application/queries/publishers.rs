// src/application/queries/publishers.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::PublisherDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::publisher::{PublisherId, PublisherRepository},
};

pub struct PublisherQueryService {
    publisher_repo: Arc<dyn PublisherRepository>,
}

impl PublisherQueryService {
    pub fn new(publisher_repo: Arc<dyn PublisherRepository>) -> Self {
        Self { publisher_repo }
    }

    pub async fn list_publishers(&self) -> ApplicationResult<Vec<PublisherDto>> {
        let publishers = self.publisher_repo.list().await?;
        Ok(publishers.into_iter().map(Into::into).collect())
    }

    pub async fn get_publisher(&self, id: i64) -> ApplicationResult<PublisherDto> {
        let not_found = || ApplicationError::not_found("publisher not found");
        let id = PublisherId::new(id).map_err(|_| not_found())?;
        self.publisher_repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(not_found)
    }
}
