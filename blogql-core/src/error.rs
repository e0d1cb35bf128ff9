//! Error types for the domain and the mutation layer.

use thiserror::Error;

/// The provided email address is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("email address is malformed")]
pub struct InvalidEmail;

/// Broad classification of a [`MutationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An entity id did not resolve.
    NotFound,

    /// The change would break a uniqueness constraint.
    Conflict,

    /// A foreign key is missing its target, or the target is in the wrong state.
    InvalidReference,
}

/// A mutation was refused. The store is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MutationError {
    #[error("email is already in use")]
    EmailTaken,

    #[error("author does not exist")]
    AuthorNotFound,

    #[error("post does not exist or is not published")]
    PostNotFoundOrUnpublished,

    #[error("user does not exist")]
    UserNotFound,

    #[error("post does not exist")]
    PostNotFound,

    #[error("comment does not exist")]
    CommentNotFound,
}

impl MutationError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            MutationError::EmailTaken => ErrorKind::Conflict,
            MutationError::AuthorNotFound | MutationError::PostNotFoundOrUnpublished => ErrorKind::InvalidReference,
            MutationError::UserNotFound | MutationError::PostNotFound | MutationError::CommentNotFound => ErrorKind::NotFound,
        }
    }
}
