//! The in-memory tables and the lock guarding them.
//!
//! [`Tables`] only knows how to find, insert and remove rows. Deciding whether
//! a change is allowed, and what else it drags along, belongs to the mutation
//! layer, which holds the write lock for the whole operation.

use crate::{domain::Email, Comment, CommentId, Post, PostId, User, UserId};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashSet;

/// Users, posts and comments in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == *id)
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == *id)
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == *id)
    }

    /// Whether `email` belongs to any user other than `except`.
    pub fn email_in_use(&self, email: &Email, except: Option<&UserId>) -> bool {
        self.users
            .iter()
            .any(|user| user.email == *email && Some(&user.id) != except)
    }

    pub(crate) fn user_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == *id)
    }

    pub(crate) fn post_mut(&mut self, id: &PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == *id)
    }

    pub(crate) fn comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|comment| comment.id == *id)
    }

    pub(crate) fn insert_user(&mut self, user: User) {
        self.users.push(user);
    }

    pub(crate) fn insert_post(&mut self, post: Post) {
        self.posts.push(post);
    }

    pub(crate) fn insert_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub(crate) fn remove_user(&mut self, id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|user| user.id == *id)?;
        Some(self.users.remove(index))
    }

    pub(crate) fn remove_post(&mut self, id: &PostId) -> Option<Post> {
        let index = self.posts.iter().position(|post| post.id == *id)?;
        Some(self.posts.remove(index))
    }

    pub(crate) fn remove_comment(&mut self, id: &CommentId) -> Option<Comment> {
        let index = self.comments.iter().position(|comment| comment.id == *id)?;
        Some(self.comments.remove(index))
    }

    /// Removes every post written by `author`, returning their ids.
    pub(crate) fn remove_posts_by_author(&mut self, author: &UserId) -> HashSet<PostId> {
        let mut removed = HashSet::new();
        self.posts.retain(|post| {
            if post.author == *author {
                removed.insert(post.id.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Removes every comment matching `predicate`, returning how many went.
    pub(crate) fn remove_comments_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Comment) -> bool,
    {
        let before = self.comments.len();
        self.comments.retain(|comment| !predicate(comment));
        before - self.comments.len()
    }
}

/// The shared, lock-guarded tables.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Takes the shared read lock. Writers wait until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write()
    }

    /// A consistent copy of every table.
    pub fn snapshot(&self) -> Tables {
        self.tables.read().clone()
    }
}

#[path = "store_tests.rs"]
#[cfg(test)]
mod tests;
