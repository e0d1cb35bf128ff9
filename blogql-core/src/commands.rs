//! Inputs to the mutation layer.
//!
//! Update commands only touch the fields that are `Some`. The user's `age` is
//! nullable, so it is doubly optional: `None` leaves it alone, `Some(None)`
//! clears it.

use crate::{domain, PostId, UserId};

/// Register a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: domain::Email,
    pub age: Option<i32>,
}

/// Write a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub published: bool,

    /// Must be an existing user.
    pub author: UserId,
}

/// Comment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComment {
    pub text: String,

    /// Must be an existing user.
    pub author: UserId,

    /// Must be an existing, published post.
    pub post: PostId,
}

/// Change some of a user's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<String>,

    /// Must not belong to any other user.
    pub email: Option<domain::Email>,
    pub age: Option<Option<i32>>,
}

/// Change some of a post's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

/// Change a comment's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateComment {
    pub text: Option<String>,
}
