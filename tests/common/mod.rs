//! Blog fixtures shared by the integration tests
//!
//! Comments register themselves in a per-thread collection when created,
//! so every test thread sees only its own comments.

#![allow(dead_code)]

use anyhow::Context;
use authz_assertions::{Action, AttributeAccess, Policy, Record, Scope, ScopedPolicy};
use serde::Deserialize;
use std::borrow::Cow;
use std::cell::RefCell;

thread_local! {
    static COMMENTS: RefCell<Vec<Comment>> = const { RefCell::new(Vec::new()) };
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Parses a JSON list of users
pub fn load_users(json: &str) -> anyhow::Result<Vec<User>> {
    let users = serde_json::from_str(json).context("invalid user fixture")?;
    Ok(users)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: usize,
    pub hidden: bool,
}

impl Comment {
    pub fn new() -> Self {
        Self::create(false)
    }

    pub fn hidden() -> Self {
        Self::create(true)
    }

    fn create(hidden: bool) -> Self {
        COMMENTS.with(|comments| {
            let mut comments = comments.borrow_mut();
            let comment = Comment {
                id: comments.len() + 1,
                hidden,
            };
            comments.push(comment.clone());
            comment
        })
    }

    pub fn is_public(&self) -> bool {
        !self.hidden
    }
}

/// Every comment created on the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Comments;

impl Comments {
    pub fn all(&self) -> Vec<Comment> {
        COMMENTS.with(|comments| comments.borrow().clone())
    }
}

impl Record for Comment {
    type Kind = Comments;

    fn kind(&self) -> Comments {
        Comments
    }
}

pub struct CommentPolicy {
    user: Option<User>,
}

impl Policy for CommentPolicy {
    type User = User;
    type Record = Comment;

    fn new(user: Option<&User>, _record: &Comment) -> Self {
        Self {
            user: user.cloned(),
        }
    }

    fn permitted(&self, action: &Action) -> Option<bool> {
        match action.as_str() {
            "index" => Some(self.user.is_some()),
            _ => None,
        }
    }

    fn permitted_attributes(&self) -> AttributeAccess {
        AttributeAccess::defined(self.user.as_ref().map(|_| "content".into()))
    }

    fn permitted_attributes_for(&self, action: &Action) -> AttributeAccess {
        match action.as_str() {
            "create" => {
                AttributeAccess::defined(self.user.as_ref().map(|_| ["content", "hidden"].into()))
            }
            _ => AttributeAccess::Undefined,
        }
    }

    fn identity() -> Cow<'static, str> {
        Cow::Borrowed("blog::CommentPolicy")
    }
}

pub struct CommentScope {
    user: Option<User>,
    comments: Comments,
}

impl Scope for CommentScope {
    type User = User;
    type Record = Comment;

    fn new(user: Option<&User>, kind: &Comments) -> Self {
        Self {
            user: user.cloned(),
            comments: *kind,
        }
    }

    fn resolve(&self) -> Option<Vec<Comment>> {
        if self.user.is_none() {
            return Some(Vec::new());
        }

        Some(
            self.comments
                .all()
                .into_iter()
                .filter(Comment::is_public)
                .collect(),
        )
    }

    fn identity() -> Cow<'static, str> {
        Cow::Borrowed("blog::CommentPolicy::Scope")
    }
}

impl ScopedPolicy for CommentPolicy {
    type Scope = CommentScope;
}
