// tests/support/builders.rs
use super::helpers::{PASSWORD, TestApp};
use news_portal::application::{
    commands::{
        content::CreateContentCommand,
        publishers::{AddStaffCommand, CreatePublisherCommand},
        users::{LoginUserCommand, RegisterUserCommand},
    },
    dto::{AuthenticatedUser, ContentDto, PublisherDto, UserDto},
};
use news_portal::domain::content::ContentKind;

pub async fn register(app: &TestApp, username: &str, role: &str) -> UserDto {
    app.services
        .user_commands
        .register(RegisterUserCommand {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: PASSWORD.into(),
            role: Some(role.into()),
        })
        .await
        .unwrap()
}

/// Token string and the identity it resolves to.
pub async fn sign_in(app: &TestApp, username: &str) -> (String, AuthenticatedUser) {
    let login = app
        .services
        .user_commands
        .login(LoginUserCommand {
            username: username.into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    let user = app.services.authenticate(&login.token.token).await.unwrap();
    (login.token.token, user)
}

pub async fn member(app: &TestApp, username: &str, role: &str) -> AuthenticatedUser {
    register(app, username, role).await;
    sign_in(app, username).await.1
}

/// The cast most workflow tests need. `admin` is registered first and is
/// therefore the staff account.
pub struct Newsroom {
    pub admin: AuthenticatedUser,
    pub editor: AuthenticatedUser,
    pub journalist: AuthenticatedUser,
    pub publisher: PublisherDto,
}

pub async fn newsroom(app: &TestApp) -> Newsroom {
    let admin = member(app, "admin", "reader").await;
    let editor = member(app, "eddie", "editor").await;
    let journalist = member(app, "jess", "journalist").await;

    let publisher = app
        .services
        .publisher_commands
        .create_publisher(
            &admin,
            CreatePublisherCommand {
                name: "Daily Planet".into(),
                description: Some("Metropolis".into()),
            },
        )
        .await
        .unwrap();
    let staff = |user: &AuthenticatedUser| AddStaffCommand {
        publisher_id: publisher.id,
        user_id: user.id.into(),
    };
    app.services
        .publisher_commands
        .add_journalist(&admin, staff(&journalist))
        .await
        .unwrap();
    let publisher = app
        .services
        .publisher_commands
        .add_editor(&admin, staff(&editor))
        .await
        .unwrap();

    Newsroom {
        admin,
        editor,
        journalist,
        publisher,
    }
}

pub async fn submit(
    app: &TestApp,
    author: &AuthenticatedUser,
    kind: ContentKind,
    title: &str,
    publisher_id: Option<i64>,
) -> ContentDto {
    app.services
        .content_commands
        .create(
            author,
            CreateContentCommand {
                kind,
                title: title.into(),
                body: format!("{title} body text"),
                publisher_id,
                status: None,
            },
        )
        .await
        .unwrap()
}
