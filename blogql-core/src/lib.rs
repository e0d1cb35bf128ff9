//! # blogql-core
//!
//! The in-memory store behind the blog API. Users, posts and comments live in
//! a [`Store`], are changed only through [`Mutations`] (which keep every
//! foreign key valid and cascade deletions), and newly published posts and
//! comments are announced on [`Notifier`] topics.
//!
//! Everything a resolver needs is bundled in a [`Database`], which is owned
//! by the caller and passed explicitly to whoever needs it.

#![warn(
    unused_import_braces,
    unused_imports,
    unused_qualifications,
    missing_debug_implementations,
)]

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_must_use,
)]

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub(crate) fn generate() -> Self {
                $name(Uuid::new_v4().to_string())
            }

            /// Provides access to the id as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(id: &'a str) -> Self {
                $name(id.to_owned())
            }
        }
    };
}

pub mod commands;
pub mod domain;
pub mod error;
pub mod events;
mod mutation;
pub mod notify;
mod query;
pub mod store;

pub use crate::error::{ErrorKind, MutationError};
pub use crate::events::{Event, Topic};
pub use crate::mutation::Mutations;
pub use crate::notify::{Notifier, Subscription};
pub use crate::store::{Store, Tables};

entity_id! {
    /// Identifies a [`User`].
    UserId
}

entity_id! {
    /// Identifies a [`Post`].
    PostId
}

entity_id! {
    /// Identifies a [`Comment`].
    CommentId
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across all users.
    pub email: domain::Email,
    pub age: Option<i32>,
}

/// A post written by a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub author: UserId,
}

/// A comment left by a [`User`] on a [`Post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: UserId,
    pub post: PostId,
}

/// The store and the notifier, owned together and handed to every resolver.
#[derive(Debug, Default)]
pub struct Database {
    pub store: Store,
    pub notifier: Notifier,
}

impl Database {
    /// Creates an empty database with no subscribers.
    pub fn new() -> Self {
        Database::default()
    }

    /// The write side of the database.
    pub fn mutations(&self) -> Mutations<'_> {
        Mutations::new(&self.store, &self.notifier)
    }

    /// Subscribes to posts as they get published.
    pub fn subscribe_posts(&self) -> Subscription {
        self.notifier.subscribe(&Topic::Post)
    }

    /// Subscribes to new comments on `post`, which must exist and be published.
    pub fn subscribe_comments(&self, post: &PostId) -> Result<Subscription, MutationError> {
        let tables = self.store.read();

        match tables.post(post) {
            Some(found) if found.published => Ok(self.notifier.subscribe(&Topic::Comment(post.clone()))),
            _ => Err(MutationError::PostNotFoundOrUnpublished),
        }
    }
}
