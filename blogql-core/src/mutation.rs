//! The write side of the store.
//!
//! Each operation takes the store's write lock once, checks its preconditions,
//! applies the change together with any cascade, and only then releases the
//! lock. A failed check returns before anything is touched. Notifications go
//! out after the lock is released, so two writers racing on the same topic may
//! announce in a different order than their rows were stored. Events from one
//! writer arrive in the order it made them.

use crate::commands::{CreateComment, CreatePost, CreateUser, UpdateComment, UpdatePost, UpdateUser};
use crate::events::{CommentCreated, Event, PostPublished};
use crate::{Comment, CommentId, MutationError, Notifier, Post, PostId, Store, User, UserId};
use log::debug;

/// Creates, updates and deletes users, posts and comments.
#[derive(Debug, Clone, Copy)]
pub struct Mutations<'a> {
    store: &'a Store,
    notifier: &'a Notifier,
}

impl<'a> Mutations<'a> {
    pub fn new(store: &'a Store, notifier: &'a Notifier) -> Self {
        Mutations {
            store,
            notifier,
        }
    }

    pub fn create_user(&self, data: CreateUser) -> Result<User, MutationError> {
        let mut tables = self.store.write();

        if tables.email_in_use(&data.email, None) {
            return Err(MutationError::EmailTaken);
        }

        let user = User {
            id: UserId::generate(),
            name: data.name,
            email: data.email,
            age: data.age,
        };
        tables.insert_user(user.clone());

        debug!("user {}: created", user.id);
        Ok(user)
    }

    /// Creates a post. Published posts are announced on the `post` topic.
    pub fn create_post(&self, data: CreatePost) -> Result<Post, MutationError> {
        let post = {
            let mut tables = self.store.write();

            if tables.user(&data.author).is_none() {
                return Err(MutationError::AuthorNotFound);
            }

            let post = Post {
                id: PostId::generate(),
                title: data.title,
                body: data.body,
                published: data.published,
                author: data.author,
            };
            tables.insert_post(post.clone());
            post
        };

        debug!("post {}: created by user {}; published: {}", post.id, post.author, post.published);

        if post.published {
            self.announce(Event::PostPublished(PostPublished {
                post: post.clone(),
            }));
        }

        Ok(post)
    }

    /// Creates a comment on a published post and announces it on that post's topic.
    pub fn create_comment(&self, data: CreateComment) -> Result<Comment, MutationError> {
        let comment = {
            let mut tables = self.store.write();

            if tables.user(&data.author).is_none() {
                return Err(MutationError::AuthorNotFound);
            }

            match tables.post(&data.post) {
                Some(post) if post.published => {}
                _ => return Err(MutationError::PostNotFoundOrUnpublished),
            }

            let comment = Comment {
                id: CommentId::generate(),
                text: data.text,
                author: data.author,
                post: data.post,
            };
            tables.insert_comment(comment.clone());
            comment
        };

        debug!("comment {}: created on post {} by user {}", comment.id, comment.post, comment.author);

        self.announce(Event::CommentCreated(CommentCreated {
            comment: comment.clone(),
        }));

        Ok(comment)
    }

    /// Deletes a user along with their posts, their comments, and every
    /// comment on those posts.
    pub fn delete_user(&self, id: &UserId) -> Result<User, MutationError> {
        let mut tables = self.store.write();

        let user = tables.remove_user(id).ok_or(MutationError::UserNotFound)?;
        let removed_posts = tables.remove_posts_by_author(id);
        let removed_comments = tables.remove_comments_where(|comment| {
            comment.author == *id || removed_posts.contains(&comment.post)
        });

        debug!("user {}: deleted with {} posts and {} comments", id, removed_posts.len(), removed_comments);
        Ok(user)
    }

    /// Deletes a post and every comment on it.
    pub fn delete_post(&self, id: &PostId) -> Result<Post, MutationError> {
        let mut tables = self.store.write();

        let post = tables.remove_post(id).ok_or(MutationError::PostNotFound)?;
        let removed_comments = tables.remove_comments_where(|comment| comment.post == *id);

        debug!("post {}: deleted with {} comments", id, removed_comments);
        Ok(post)
    }

    pub fn delete_comment(&self, id: &CommentId) -> Result<Comment, MutationError> {
        let mut tables = self.store.write();

        let comment = tables.remove_comment(id).ok_or(MutationError::CommentNotFound)?;

        debug!("comment {}: deleted", id);
        Ok(comment)
    }

    /// Applies the present fields. The new email, if any, must not belong to
    /// another user; keeping one's own email is fine.
    pub fn update_user(&self, id: &UserId, data: UpdateUser) -> Result<User, MutationError> {
        let mut tables = self.store.write();

        if tables.user(id).is_none() {
            return Err(MutationError::UserNotFound);
        }

        if let Some(ref email) = data.email {
            if tables.email_in_use(email, Some(id)) {
                return Err(MutationError::EmailTaken);
            }
        }

        let user = tables.user_mut(id).ok_or(MutationError::UserNotFound)?;
        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(age) = data.age {
            user.age = age;
        }

        debug!("user {}: updated", id);
        Ok(user.clone())
    }

    pub fn update_post(&self, id: &PostId, data: UpdatePost) -> Result<Post, MutationError> {
        let mut tables = self.store.write();

        let post = tables.post_mut(id).ok_or(MutationError::PostNotFound)?;
        if let Some(title) = data.title {
            post.title = title;
        }
        if let Some(body) = data.body {
            post.body = body;
        }
        if let Some(published) = data.published {
            post.published = published;
        }

        debug!("post {}: updated; published: {}", id, post.published);
        Ok(post.clone())
    }

    pub fn update_comment(&self, id: &CommentId, data: UpdateComment) -> Result<Comment, MutationError> {
        let mut tables = self.store.write();

        let comment = tables.comment_mut(id).ok_or(MutationError::CommentNotFound)?;
        if let Some(text) = data.text {
            comment.text = text;
        }

        debug!("comment {}: updated", id);
        Ok(comment.clone())
    }

    /// Publishes `event` on the topic it belongs to. Must not be called with
    /// the store lock held.
    fn announce(&self, event: Event) {
        let topic = event.topic();
        self.notifier.publish(&topic, event);
    }
}

#[path = "mutation_tests.rs"]
#[cfg(test)]
mod tests;
