//! Read-only lookups over the store.
//!
//! None of these fail. A missing id gives `None`, an unmatched search gives an
//! empty list. Every call takes the read lock once and returns owned rows.

use crate::{Comment, CommentId, Post, PostId, Store, User, UserId};

/// Case-insensitive substring match.
fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Store {
    pub fn find_user_by_id(&self, id: &UserId) -> Option<User> {
        self.read().user(id).cloned()
    }

    pub fn find_post_by_id(&self, id: &PostId) -> Option<Post> {
        self.read().post(id).cloned()
    }

    pub fn find_comment_by_id(&self, id: &CommentId) -> Option<Comment> {
        self.read().comment(id).cloned()
    }

    /// All users, or those whose name contains `filter`.
    pub fn list_users(&self, filter: Option<&str>) -> Vec<User> {
        self.read()
            .users()
            .iter()
            .filter(|user| filter.map_or(true, |filter| matches(&user.name, filter)))
            .cloned()
            .collect()
    }

    /// All posts, or those whose title or body contains `filter`.
    pub fn list_posts(&self, filter: Option<&str>) -> Vec<Post> {
        self.read()
            .posts()
            .iter()
            .filter(|post| {
                filter.map_or(true, |filter| matches(&post.title, filter) || matches(&post.body, filter))
            })
            .cloned()
            .collect()
    }

    pub fn list_comments(&self) -> Vec<Comment> {
        self.read().comments().to_vec()
    }

    pub fn posts_by_author(&self, author: &UserId) -> Vec<Post> {
        self.read()
            .posts()
            .iter()
            .filter(|post| post.author == *author)
            .cloned()
            .collect()
    }

    pub fn comments_by_author(&self, author: &UserId) -> Vec<Comment> {
        self.read()
            .comments()
            .iter()
            .filter(|comment| comment.author == *author)
            .cloned()
            .collect()
    }

    pub fn comments_by_post(&self, post: &PostId) -> Vec<Comment> {
        self.read()
            .comments()
            .iter()
            .filter(|comment| comment.post == *post)
            .cloned()
            .collect()
    }
}
