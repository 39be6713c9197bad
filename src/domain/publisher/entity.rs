// src/domain/publisher/entity.rs
use crate::domain::publisher::value_objects::{PublisherId, PublisherName};
use crate::domain::user::UserId;
use std::collections::BTreeSet;

/// A media outlet with separate editor and journalist staff rosters.
#[derive(Debug, Clone)]
pub struct Publisher {
    pub id: PublisherId,
    pub name: PublisherName,
    pub description: String,
    pub editors: BTreeSet<UserId>,
    pub journalists: BTreeSet<UserId>,
}

impl Publisher {
    pub fn employs_journalist(&self, user_id: UserId) -> bool {
        self.journalists.contains(&user_id)
    }

    pub fn employs_editor(&self, user_id: UserId) -> bool {
        self.editors.contains(&user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewPublisher {
    pub name: PublisherName,
    pub description: String,
}

/// Which staff roster a membership change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRoster {
    Editors,
    Journalists,
}

impl StaffRoster {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRoster::Editors => "editors",
            StaffRoster::Journalists => "journalists",
        }
    }
}
