// tests/support/mocks/store.rs
//! One in-memory store behind every repository port.
use async_trait::async_trait;
use news_portal::domain::{
    content::{
        ApprovalStatus, ContentFilter, ContentId, ContentItem, ContentKind,
        ContentReadRepository, ContentUpdate, ContentWriteRepository, NewContentItem,
        StatusUpdate,
    },
    errors::{DomainError, DomainResult},
    publisher::{NewPublisher, Publisher, PublisherId, PublisherRepository, StaffRoster},
    subscription::{SubscriptionRepository, Subscriptions},
    user::{NewUser, Role, User, UserId, UserRepository, Username},
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    users: Vec<User>,
    publishers: Vec<Publisher>,
    journalist_follows: BTreeSet<(UserId, UserId)>,
    publisher_follows: BTreeSet<(UserId, PublisherId)>,
    content: BTreeMap<i64, ContentItem>,
    next_content_id: i64,
    status_writes: usize,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, id: i64) -> Option<ContentItem> {
        self.state.lock().unwrap().content.get(&id).cloned()
    }

    /// Overwrites a status without going through the workflow, as another
    /// process would.
    pub fn force_status(&self, id: i64, status: ApprovalStatus) {
        if let Some(item) = self.state.lock().unwrap().content.get_mut(&id) {
            item.status = status;
        }
    }

    /// Successful conditional status writes so far.
    pub fn status_writes(&self) -> usize {
        self.state.lock().unwrap().status_writes
    }

    pub fn deactivate(&self, username: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state
            .users
            .iter_mut()
            .find(|user| user.username.as_str() == username)
        {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.state.lock().unwrap().users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let user = User {
            id: UserId(state.users.len() as i64 + 1),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_staff: new_user.is_staff,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PublisherRepository for InMemoryStore {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher> {
        let mut state = self.state.lock().unwrap();
        let created = Publisher {
            id: PublisherId(state.publishers.len() as i64 + 1),
            name: publisher.name,
            description: publisher.description,
            editors: BTreeSet::new(),
            journalists: BTreeSet::new(),
        };
        state.publishers.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: PublisherId) -> DomainResult<Option<Publisher>> {
        let state = self.state.lock().unwrap();
        Ok(state.publishers.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Publisher>> {
        Ok(self.state.lock().unwrap().publishers.clone())
    }

    async fn add_staff(
        &self,
        id: PublisherId,
        roster: StaffRoster,
        user_id: UserId,
    ) -> DomainResult<Publisher> {
        let mut state = self.state.lock().unwrap();
        let publisher = state
            .publishers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound("publisher not found".into()))?;
        match roster {
            StaffRoster::Editors => publisher.editors.insert(user_id),
            StaffRoster::Journalists => publisher.journalists.insert(user_id),
        };
        Ok(publisher.clone())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn follow_journalist(&self, follower: UserId, journalist: UserId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.journalist_follows.insert((follower, journalist));
        Ok(())
    }

    async fn unfollow_journalist(
        &self,
        follower: UserId,
        journalist: UserId,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.journalist_follows.remove(&(follower, journalist));
        Ok(())
    }

    async fn follow_publisher(
        &self,
        follower: UserId,
        publisher: PublisherId,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.publisher_follows.insert((follower, publisher));
        Ok(())
    }

    async fn unfollow_publisher(
        &self,
        follower: UserId,
        publisher: PublisherId,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.publisher_follows.remove(&(follower, publisher));
        Ok(())
    }

    async fn replace(&self, follower: UserId, subscriptions: &Subscriptions) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.journalist_follows.retain(|(user, _)| *user != follower);
        state.publisher_follows.retain(|(user, _)| *user != follower);
        for journalist in &subscriptions.journalists {
            state.journalist_follows.insert((follower, *journalist));
        }
        for publisher in &subscriptions.publishers {
            state.publisher_follows.insert((follower, *publisher));
        }
        Ok(())
    }

    async fn subscriptions_of(&self, follower: UserId) -> DomainResult<Subscriptions> {
        let state = self.state.lock().unwrap();
        Ok(Subscriptions {
            journalists: state
                .journalist_follows
                .iter()
                .filter(|(user, _)| *user == follower)
                .map(|(_, journalist)| *journalist)
                .collect(),
            publishers: state
                .publisher_follows
                .iter()
                .filter(|(user, _)| *user == follower)
                .map(|(_, publisher)| *publisher)
                .collect(),
        })
    }

    async fn followers_of_journalist(&self, journalist: UserId) -> DomainResult<Vec<UserId>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .journalist_follows
            .iter()
            .filter(|(_, followed)| *followed == journalist)
            .map(|(user, _)| *user)
            .collect())
    }

    async fn followers_of_publisher(&self, publisher: PublisherId) -> DomainResult<Vec<UserId>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .publisher_follows
            .iter()
            .filter(|(_, followed)| *followed == publisher)
            .map(|(user, _)| *user)
            .collect())
    }
}

#[async_trait]
impl ContentWriteRepository for InMemoryStore {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem> {
        let mut state = self.state.lock().unwrap();
        if !state.users.iter().any(|u| u.id == item.author_id) {
            return Err(DomainError::invalid_field("author", "unknown author"));
        }
        state.next_content_id += 1;
        let created = ContentItem {
            id: ContentId(state.next_content_id),
            kind: item.kind,
            title: item.title,
            body: item.body,
            status: item.status,
            author_id: item.author_id,
            publisher_id: item.publisher_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        state.content.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn update_content(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let mut state = self.state.lock().unwrap();
        let item = state
            .content
            .get_mut(&update.id.0)
            .filter(|item| item.kind == update.kind)
            .ok_or_else(|| DomainError::NotFound("content not found".into()))?;
        item.title = update.title;
        item.body = update.body;
        item.publisher_id = update.publisher_id;
        item.updated_at = update.updated_at;
        Ok(item.clone())
    }

    async fn update_status(&self, update: StatusUpdate) -> DomainResult<Option<ContentItem>> {
        let mut state = self.state.lock().unwrap();
        let Some(item) = state
            .content
            .get_mut(&update.id.0)
            .filter(|item| item.kind == update.kind && item.status == update.expected)
        else {
            return Ok(None);
        };
        item.status = update.next;
        item.updated_at = update.updated_at;
        let updated = item.clone();
        state.status_writes += 1;
        Ok(Some(updated))
    }

    async fn delete(&self, kind: ContentKind, id: ContentId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        match state.content.get(&id.0) {
            Some(item) if item.kind == kind => {
                state.content.remove(&id.0);
                Ok(())
            }
            _ => Err(DomainError::NotFound("content not found".into())),
        }
    }
}

#[async_trait]
impl ContentReadRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        kind: ContentKind,
        id: ContentId,
    ) -> DomainResult<Option<ContentItem>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .content
            .get(&id.0)
            .filter(|item| item.kind == kind)
            .cloned())
    }

    async fn list_page(&self, filter: &ContentFilter) -> DomainResult<Vec<ContentItem>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<ContentItem> = state
            .content
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        items.truncate(filter.limit);
        Ok(items)
    }
}
