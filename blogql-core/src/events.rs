//! Notifications published by the mutation layer.

use crate::{Comment, Post, PostId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named channel that events are published on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Newly published posts, named `post`.
    Post,

    /// New comments on one post, named `comment:{postId}`.
    Comment(PostId),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Topic::Post => f.write_str("post"),
            Topic::Comment(ref post) => write!(f, "comment:{}", post),
        }
    }
}

/// A post was created with `published` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPublished {
    pub post: Post,
}

/// A comment was added to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentCreated {
    pub comment: Comment,
}

/// Any event a subscriber can receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Event {
    PostPublished(PostPublished),
    CommentCreated(CommentCreated),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match *self {
            Event::PostPublished(_) => "post_published",
            Event::CommentCreated(_) => "comment_created",
        }
    }

    /// The topic this event belongs on.
    pub fn topic(&self) -> Topic {
        match *self {
            Event::PostPublished(_) => Topic::Post,
            Event::CommentCreated(ref created) => Topic::Comment(created.comment.post.clone()),
        }
    }
}
