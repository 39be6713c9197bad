use tracing::info;

use super::{UserCommandService, password::password_problem};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::user::{EmailAddress, NewUser, PasswordHash, Role, User, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl UserCommandService {
    /// Self-service sign-up. The first account ever created is a staff account.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let mut errors = FieldErrors::new();
        let username = errors.take("username", Username::new(command.username))?;
        let email = errors.take("email", EmailAddress::new(command.email))?;
        if let Some(problem) = password_problem(&command.password) {
            errors.push("password", problem);
        }
        let role = match command.role.as_deref() {
            Some(raw) => errors.take("role", raw.parse::<Role>())?,
            None => Some(Role::default()),
        };
        errors.finish()?;

        let (Some(username), Some(email), Some(role)) = (username, email, role) else {
            return Err(ApplicationError::validation("registration form is incomplete"));
        };

        let existing = self.user_repo.count().await?;
        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let user = self
            .create_and_insert_user(username, email, &command.password, role, existing == 0)
            .await?;
        info!(user_id = %user.id, role = %user.role, is_staff = user.is_staff, "user registered");
        Ok(user.into())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        email: EmailAddress,
        password: &str,
        role: Role,
        is_staff: bool,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(username, email, password_hash, role, self.clock.now())
            .with_staff(is_staff);
        Ok(self.user_repo.insert(new_user).await?)
    }
}
