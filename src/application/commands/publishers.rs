// src/application/commands/publishers.rs
use std::sync::Arc;

use tracing::info;

use crate::{
    application::{
        dto::{AuthenticatedUser, PublisherDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::{
        publisher::{NewPublisher, PublisherId, PublisherName, PublisherRepository, StaffRoster},
        user::{Role, UserId, UserRepository},
    },
};

pub struct CreatePublisherCommand {
    pub name: String,
    pub description: Option<String>,
}

pub struct AddStaffCommand {
    pub publisher_id: i64,
    pub user_id: i64,
}

pub struct PublisherCommandService {
    publisher_repo: Arc<dyn PublisherRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl PublisherCommandService {
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            publisher_repo,
            user_repo,
        }
    }

    pub async fn create_publisher(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePublisherCommand,
    ) -> ApplicationResult<PublisherDto> {
        ensure_staff(actor)?;
        let mut errors = FieldErrors::new();
        let name = errors.take("name", PublisherName::new(command.name))?;
        errors.finish()?;
        let Some(name) = name else {
            return Err(ApplicationError::invalid_field("name", "name is required"));
        };

        let created = self
            .publisher_repo
            .insert(NewPublisher {
                name,
                description: command.description.unwrap_or_default(),
            })
            .await?;
        info!(publisher_id = %created.id, "publisher created");
        Ok(created.into())
    }

    pub async fn add_editor(
        &self,
        actor: &AuthenticatedUser,
        command: AddStaffCommand,
    ) -> ApplicationResult<PublisherDto> {
        self.add_staff(actor, command, StaffRoster::Editors).await
    }

    pub async fn add_journalist(
        &self,
        actor: &AuthenticatedUser,
        command: AddStaffCommand,
    ) -> ApplicationResult<PublisherDto> {
        self.add_staff(actor, command, StaffRoster::Journalists).await
    }

    async fn add_staff(
        &self,
        actor: &AuthenticatedUser,
        command: AddStaffCommand,
        roster: StaffRoster,
    ) -> ApplicationResult<PublisherDto> {
        ensure_staff(actor)?;
        let publisher_id = PublisherId::new(command.publisher_id)?;
        if self.publisher_repo.find_by_id(publisher_id).await?.is_none() {
            return Err(ApplicationError::not_found("publisher not found"));
        }

        let user_id = UserId::new(command.user_id)?;
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;
        let required = match roster {
            StaffRoster::Editors => Role::Editor,
            StaffRoster::Journalists => Role::Journalist,
        };
        if user.role != required {
            return Err(ApplicationError::invalid_field(
                "user",
                format!("{} is not a {}", user.username, required.as_str()),
            ));
        }

        let updated = self
            .publisher_repo
            .add_staff(publisher_id, roster, user_id)
            .await?;
        info!(
            publisher_id = %publisher_id,
            user_id = %user_id,
            roster = roster.as_str(),
            "publisher staff updated"
        );
        Ok(updated.into())
    }
}

fn ensure_staff(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.is_staff {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(
            "staff privileges are required to manage publishers",
        ))
    }
}
