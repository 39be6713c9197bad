// src/presentation/web/content.rs
use super::{
    error::{IntoPortalResult, PortalError, PortalResult},
    session::{PortalUser, PortalViewer},
    views::{CollectionView, ViewerView, base_context, page, view_name},
};
use crate::application::{
    commands::content::{CreateContentCommand, DeleteContentCommand, ReviewContentCommand},
    dto::{AuthenticatedUser, ContentDto},
    queries::content::{ContentView, GetContentQuery, ListContentQuery, MAX_PAGE_SIZE},
};
use crate::domain::content::{ApprovalStatus, ContentKind, ReviewDecision};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form,
    extract::{Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub submitted: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub publisher_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct PartyView {
    id: i64,
    name: String,
    followed: bool,
    can_follow: bool,
}

pub async fn list(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    viewer: PortalViewer,
    Query(params): Query<ListParams>,
) -> PortalResult<Html<String>> {
    let viewer_view = viewer.view();
    let view = params
        .view
        .as_deref()
        .map(str::parse::<ContentView>)
        .transpose()
        .into_page(viewer_view.as_ref())?
        .unwrap_or_default();

    let query = ListContentQuery {
        kind,
        view,
        status: None,
        cursor: params.cursor,
        limit: None,
    };
    let items = state
        .services
        .content_queries
        .list(viewer.0.as_ref(), query)
        .await
        .into_page(viewer_view.as_ref())?;

    let mut context = base_context(viewer_view.as_ref());
    context.insert("collection", &CollectionView::from(kind));
    context.insert("view", view_name(view));
    context.insert("items", &items.items);
    context.insert("next_cursor", &items.next_cursor);
    context.insert("submitted", &params.submitted.is_some());
    page("list.html", &context)
}

pub async fn detail(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    viewer: PortalViewer,
    Path(id): Path<i64>,
) -> PortalResult<Html<String>> {
    let viewer_view = viewer.view();
    let services = &state.services;
    let item = services
        .content_queries
        .get(viewer.0.as_ref(), GetContentQuery { kind, id })
        .await
        .into_page(viewer_view.as_ref())?;

    let journalist = services
        .user_queries
        .list_journalists()
        .await
        .into_page(viewer_view.as_ref())?
        .into_iter()
        .find(|journalist| journalist.id == item.author_id);
    let publisher = match item.publisher_id {
        Some(publisher_id) => Some(
            services
                .publisher_queries
                .get_publisher(publisher_id)
                .await
                .into_page(viewer_view.as_ref())?,
        ),
        None => None,
    };
    let subscriptions = match viewer.0.as_ref() {
        Some(user) => Some(
            services
                .user_queries
                .subscriptions(user)
                .await
                .into_page(viewer_view.as_ref())?,
        ),
        None => None,
    };

    let signed_in_other = viewer
        .0
        .as_ref()
        .is_some_and(|user| i64::from(user.id) != item.author_id);
    let author = match journalist {
        Some(journalist) => PartyView {
            followed: subscriptions
                .as_ref()
                .is_some_and(|subs| subs.journalists.contains(&journalist.id)),
            can_follow: signed_in_other,
            id: journalist.id,
            name: journalist.username,
        },
        None => PartyView {
            id: item.author_id,
            name: format!("user #{}", item.author_id),
            followed: false,
            can_follow: false,
        },
    };
    let publisher = publisher.map(|publisher| PartyView {
        followed: subscriptions
            .as_ref()
            .is_some_and(|subs| subs.publishers.contains(&publisher.id)),
        can_follow: viewer.0.is_some(),
        id: publisher.id,
        name: publisher.name,
    });

    let is_author = viewer
        .0
        .as_ref()
        .is_some_and(|user| i64::from(user.id) == item.author_id);
    let can_review = viewer.0.as_ref().is_some_and(AuthenticatedUser::may_review)
        && item.status == ApprovalStatus::Pending;

    let mut context = base_context(viewer_view.as_ref());
    context.insert("collection", &CollectionView::from(kind));
    context.insert("item", &item);
    context.insert("status_label", item.status.label());
    context.insert("author", &author);
    context.insert("publisher", &publisher);
    context.insert("is_author", &is_author);
    context.insert("can_review", &can_review);
    context.insert("here", &format!("{}/{}", CollectionView::from(kind).path, item.id));
    page("detail.html", &context)
}

pub async fn new_form(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    user: PortalUser,
) -> PortalResult<Response> {
    render_form(&state, kind, &user, &ContentForm::default(), BTreeMap::new()).await
}

pub async fn create(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    user: PortalUser,
    Form(form): Form<ContentForm>,
) -> PortalResult<Response> {
    let publisher_id = match form.publisher_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                let mut errors = BTreeMap::new();
                errors.insert("publisher".to_string(), vec![format!("'{raw}' is not a publisher")]);
                return render_form(&state, kind, &user, &form, errors).await;
            }
        },
    };

    let command = CreateContentCommand {
        kind,
        title: form.title.clone(),
        body: form.body.clone(),
        publisher_id,
        status: None,
    };
    match state.services.content_commands.create(&user.0, command).await {
        Ok(_) => Ok(Redirect::to(&format!(
            "{}?submitted=1",
            CollectionView::from(kind).path
        ))
        .into_response()),
        Err(err) if !err.field_errors().is_empty() => {
            let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for error in err.field_errors() {
                errors
                    .entry(error.field.to_string())
                    .or_default()
                    .push(error.message);
            }
            render_form(&state, kind, &user, &form, errors).await
        }
        Err(err) => Err(PortalError::from(err).for_viewer(Some(user.view()))),
    }
}

async fn render_form(
    state: &HttpState,
    kind: ContentKind,
    user: &PortalUser,
    form: &ContentForm,
    errors: BTreeMap<String, Vec<String>>,
) -> PortalResult<Response> {
    let viewer = user.view();
    if !user.0.may_author() {
        return Err(PortalError::status(
            StatusCode::FORBIDDEN,
            "only journalists may submit content",
        )
        .for_viewer(Some(viewer)));
    }

    let publishers = state
        .services
        .publisher_queries
        .list_publishers()
        .await
        .into_page(Some(&viewer))?;

    let status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let mut context = base_context(Some(&viewer));
    context.insert("collection", &CollectionView::from(kind));
    context.insert("requires_publisher", &kind.requires_publisher());
    context.insert("max_title_chars", &kind.max_title_chars());
    context.insert("publishers", &publishers);
    context.insert("form", form);
    context.insert("errors", &errors);
    Ok((status, page("form.html", &context)?).into_response())
}

pub async fn approve(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    user: PortalUser,
    Path(id): Path<i64>,
) -> PortalResult<Redirect> {
    review(&state, kind, &user, id, ReviewDecision::Approve).await
}

pub async fn deny(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    user: PortalUser,
    Path(id): Path<i64>,
) -> PortalResult<Redirect> {
    review(&state, kind, &user, id, ReviewDecision::Deny).await
}

async fn review(
    state: &HttpState,
    kind: ContentKind,
    user: &PortalUser,
    id: i64,
    decision: ReviewDecision,
) -> PortalResult<Redirect> {
    state
        .services
        .content_commands
        .review(&user.0, ReviewContentCommand { kind, id, decision })
        .await
        .into_page(Some(&user.view()))?;
    Ok(Redirect::to(CollectionView::from(kind).path))
}

pub async fn delete(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    user: PortalUser,
    Path(id): Path<i64>,
) -> PortalResult<Redirect> {
    state
        .services
        .content_commands
        .delete(&user.0, DeleteContentCommand { kind, id })
        .await
        .into_page(Some(&user.view()))?;
    Ok(Redirect::to(CollectionView::from(kind).path))
}

#[derive(Debug, Serialize)]
struct PendingSection {
    collection: CollectionView,
    items: Vec<ContentDto>,
}

/// Everything awaiting a decision, both kinds.
pub async fn review_dashboard(
    Extension(state): Extension<HttpState>,
    user: PortalUser,
) -> PortalResult<Html<String>> {
    let viewer: ViewerView = user.view();
    if !user.0.may_review() {
        return Err(
            PortalError::status(StatusCode::FORBIDDEN, "only editors may review content")
                .for_viewer(Some(viewer)),
        );
    }

    let mut sections = Vec::new();
    for kind in [ContentKind::Article, ContentKind::Newsletter] {
        let query = ListContentQuery {
            status: Some(ApprovalStatus::Pending.as_str().to_string()),
            limit: Some(MAX_PAGE_SIZE),
            ..ListContentQuery::new(kind)
        };
        let pending = state
            .services
            .content_queries
            .list(Some(&user.0), query)
            .await
            .into_page(Some(&viewer))?;
        sections.push(PendingSection {
            collection: CollectionView::from(kind),
            items: pending.items,
        });
    }

    let mut context = base_context(Some(&viewer));
    context.insert("sections", &sections);
    page("review.html", &context)
}
