// tests/accounts.rs
use news_portal::application::{
    commands::{
        publishers::{AddStaffCommand, CreatePublisherCommand},
        users::{LoginUserCommand, RegisterUserCommand},
    },
    error::ApplicationError,
};

mod support;
use support::{PASSWORD, TestApp, member, newsroom, register, sign_in};

fn registration(username: &str, role: Option<&str>) -> RegisterUserCommand {
    RegisterUserCommand {
        username: username.into(),
        email: format!("{username}@example.com"),
        password: PASSWORD.into(),
        role: role.map(Into::into),
    }
}

#[tokio::test]
async fn only_the_first_account_is_staff() {
    let app = TestApp::new();
    let first = register(&app, "founder", "reader").await;
    let second = register(&app, "second", "editor").await;

    assert!(first.is_staff);
    assert!(!second.is_staff);
    assert_eq!(second.role.as_str(), "editor");
}

#[tokio::test]
async fn role_defaults_to_reader() {
    let app = TestApp::new();
    let user = app
        .services
        .user_commands
        .register(registration("quiet", None))
        .await
        .unwrap();
    assert_eq!(user.role.as_str(), "reader");
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let app = TestApp::new();
    register(&app, "taken", "reader").await;

    let err = app
        .services
        .user_commands
        .register(registration("taken", Some("journalist")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn every_invalid_field_is_reported_at_once() {
    let app = TestApp::new();
    let err = app
        .services
        .user_commands
        .register(RegisterUserCommand {
            username: "ab".into(),
            email: "nobody".into(),
            password: "tiny".into(),
            role: Some("publisher".into()),
        })
        .await
        .unwrap_err();

    let mut fields: Vec<_> = err.field_errors().into_iter().map(|e| e.field).collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["email", "password", "role", "username"]);
}

#[tokio::test]
async fn login_checks_password_and_account_state() {
    let app = TestApp::new();
    register(&app, "jess", "journalist").await;

    let wrong = app
        .services
        .user_commands
        .login(LoginUserCommand {
            username: "jess".into(),
            password: "not the password".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(wrong, ApplicationError::Unauthorized(_)));

    let unknown = app
        .services
        .user_commands
        .login(LoginUserCommand {
            username: "nobody".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(unknown, ApplicationError::Unauthorized(_)));

    let (token, user) = sign_in(&app, "jess").await;
    assert_eq!(user.username, "jess");
    let profile = app.services.user_queries.get_profile(&user).await.unwrap();
    assert_eq!(profile.user.username, "jess");
    assert!(profile.expires_in > 0);
    assert!(app.services.authenticate(&token).await.is_ok());
    assert!(app.services.authenticate("forged").await.is_err());

    app.store.deactivate("jess");
    let disabled = app
        .services
        .user_commands
        .login(LoginUserCommand {
            username: "jess".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(disabled, ApplicationError::Forbidden(_)));
    assert!(app.services.user_queries.list_journalists().await.unwrap().is_empty());
}

#[tokio::test]
async fn publishers_are_managed_by_staff_only() {
    let app = TestApp::new();
    let room = newsroom(&app).await;

    let err = app
        .services
        .publisher_commands
        .create_publisher(
            &room.editor,
            CreatePublisherCommand {
                name: "Side Project".into(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let err = app
        .services
        .publisher_commands
        .create_publisher(
            &room.admin,
            CreatePublisherCommand {
                name: "   ".into(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.field_errors()[0].field, "name");

    assert_eq!(room.publisher.editors, vec![i64::from(room.editor.id)]);
    assert_eq!(room.publisher.journalists, vec![i64::from(room.journalist.id)]);

    let reader = member(&app, "rita", "reader").await;
    let err = app
        .services
        .publisher_commands
        .add_journalist(
            &room.admin,
            AddStaffCommand {
                publisher_id: room.publisher.id,
                user_id: reader.id.into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.field_errors()[0].field, "user");

    let err = app
        .services
        .publisher_commands
        .add_editor(
            &room.admin,
            AddStaffCommand {
                publisher_id: 404,
                user_id: room.editor.id.into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn subscriptions_are_sets() {
    let app = TestApp::new();
    let room = newsroom(&app).await;
    let reader = member(&app, "rita", "reader").await;
    let commands = &app.services.subscription_commands;
    let journalist = i64::from(room.journalist.id);

    commands.follow_journalist(&reader, journalist).await.unwrap();
    let subs = commands.follow_journalist(&reader, journalist).await.unwrap();
    assert_eq!(subs.journalists, vec![journalist]);

    let err = commands
        .follow_journalist(&reader, i64::from(room.editor.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let subs = commands.follow_publisher(&reader, room.publisher.id).await.unwrap();
    assert_eq!(subs.publishers, vec![room.publisher.id]);
    let subs = commands.unfollow_journalist(&reader, journalist).await.unwrap();
    assert!(subs.journalists.is_empty());
    assert_eq!(subs.publishers, vec![room.publisher.id]);
}
