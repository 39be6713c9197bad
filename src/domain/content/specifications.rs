// src/domain/content/specifications.rs
//! Access rules for content. Each rule is evaluated per request against the
//! acting principal; read rules hide rather than forbid.
use crate::domain::content::entity::ContentItem;
use crate::domain::user::Principal;

pub struct CanViewContentSpec<'a> {
    viewer: Option<&'a Principal>,
    item: &'a ContentItem,
}

impl<'a> CanViewContentSpec<'a> {
    pub fn new(viewer: Option<&'a Principal>, item: &'a ContentItem) -> Self {
        Self { viewer, item }
    }

    /// Approved content is public. Anything else needs reviewer rights;
    /// authorship alone does not reveal a pending item.
    pub fn is_satisfied(&self) -> bool {
        self.item.status.is_approved() || self.viewer.is_some_and(Principal::may_review)
    }
}

pub struct CanCreateContentSpec<'a> {
    actor: &'a Principal,
}

impl<'a> CanCreateContentSpec<'a> {
    pub fn new(actor: &'a Principal) -> Self {
        Self { actor }
    }

    pub fn is_satisfied(&self) -> bool {
        self.actor.may_author()
    }
}

pub struct CanEditContentSpec<'a> {
    actor: &'a Principal,
    item: &'a ContentItem,
}

impl<'a> CanEditContentSpec<'a> {
    pub fn new(actor: &'a Principal, item: &'a ContentItem) -> Self {
        Self { actor, item }
    }

    pub fn is_satisfied(&self) -> bool {
        self.item.is_authored_by(self.actor.id)
    }
}

pub struct CanReviewContentSpec<'a> {
    actor: &'a Principal,
}

impl<'a> CanReviewContentSpec<'a> {
    pub fn new(actor: &'a Principal) -> Self {
        Self { actor }
    }

    pub fn is_satisfied(&self) -> bool {
        self.actor.may_review()
    }
}

pub struct CanDeleteContentSpec<'a> {
    actor: &'a Principal,
    item: &'a ContentItem,
}

impl<'a> CanDeleteContentSpec<'a> {
    pub fn new(actor: &'a Principal, item: &'a ContentItem) -> Self {
        Self { actor, item }
    }

    pub fn is_satisfied(&self) -> bool {
        self.item.is_authored_by(self.actor.id)
    }
}
