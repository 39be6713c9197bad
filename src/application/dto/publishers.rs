use crate::domain::publisher::Publisher;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublisherDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub editors: Vec<i64>,
    pub journalists: Vec<i64>,
}

impl From<Publisher> for PublisherDto {
    fn from(publisher: Publisher) -> Self {
        Self {
            id: publisher.id.into(),
            name: publisher.name.into_inner(),
            description: publisher.description,
            editors: publisher.editors.into_iter().map(Into::into).collect(),
            journalists: publisher.journalists.into_iter().map(Into::into).collect(),
        }
    }
}
