use std::fmt::Display;
use std::pin::Pin;
use std::time::Duration;

use blogql_core::commands::{CreateComment, CreatePost, CreateUser, UpdateComment, UpdatePost, UpdateUser};
use blogql_core::domain::Email;
use blogql_core::{Comment, CommentId, ErrorKind, Event, MutationError, Post, PostId, User, UserId};
use futures::{future, stream, Stream, StreamExt};
use juniper::{graphql_object, graphql_subscription, graphql_value, FieldError, FieldResult, GraphQLInputObject, Nullable, Value, ID};

use super::Context;

fn mutation_error(err: MutationError) -> FieldError {
    let extensions: Value = match err.kind() {
        ErrorKind::NotFound => graphql_value!({ "code": "NOT_FOUND" }),
        ErrorKind::Conflict => graphql_value!({ "code": "CONFLICT" }),
        ErrorKind::InvalidReference => graphql_value!({ "code": "INVALID_REFERENCE" }),
    };
    FieldError::new(err, extensions)
}

fn bad_input(message: impl Display) -> FieldError {
    FieldError::new(message, graphql_value!({ "code": "BAD_USER_INPUT" }))
}

fn email(address: String) -> FieldResult<Email> {
    Email::new(address).map_err(bad_input)
}

/// A field that may be left out but must not be set to `null`.
fn present<T>(field: &str, value: Nullable<T>) -> FieldResult<Option<T>> {
    match value {
        Nullable::ImplicitNull => Ok(None),
        Nullable::ExplicitNull => Err(bad_input(format!("`{}` cannot be null", field))),
        Nullable::Some(value) => Ok(Some(value)),
    }
}

/// A field that may be left out, set, or cleared with an explicit `null`.
fn nullable<T>(value: Nullable<T>) -> Option<Option<T>> {
    match value {
        Nullable::ImplicitNull => None,
        Nullable::ExplicitNull => Some(None),
        Nullable::Some(value) => Some(Some(value)),
    }
}

fn user_id(id: ID) -> UserId {
    UserId::from(id.to_string())
}

fn post_id(id: ID) -> PostId {
    PostId::from(id.to_string())
}

fn comment_id(id: ID) -> CommentId {
    CommentId::from(id.to_string())
}

pub struct Query;

#[graphql_object(context = Context)]
impl Query {
    /// Users whose name contains `query`, ignoring case. All users without one.
    fn users(context: &Context, query: Option<String>) -> Vec<UserQL> {
        context.store.list_users(query.as_deref()).into_iter().map(UserQL).collect()
    }

    /// Posts whose title or body contains `query`, ignoring case.
    fn posts(context: &Context, query: Option<String>) -> Vec<PostQL> {
        context.store.list_posts(query.as_deref()).into_iter().map(PostQL).collect()
    }

    fn comments(context: &Context) -> Vec<CommentQL> {
        context.store.list_comments().into_iter().map(CommentQL).collect()
    }

    fn user(context: &Context, id: ID) -> Option<UserQL> {
        context.store.find_user_by_id(&user_id(id)).map(UserQL)
    }

    fn post(context: &Context, id: ID) -> Option<PostQL> {
        context.store.find_post_by_id(&post_id(id)).map(PostQL)
    }
}

pub struct UserQL(User);

#[graphql_object(context = Context, name = "User")]
impl UserQL {
    fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    fn name(&self) -> &str {
        &self.0.name
    }

    fn email(&self) -> &str {
        self.0.email.as_str()
    }

    fn age(&self) -> Option<i32> {
        self.0.age
    }

    fn posts(&self, context: &Context) -> Vec<PostQL> {
        context.store.posts_by_author(&self.0.id).into_iter().map(PostQL).collect()
    }

    fn comments(&self, context: &Context) -> Vec<CommentQL> {
        context.store.comments_by_author(&self.0.id).into_iter().map(CommentQL).collect()
    }
}

pub struct PostQL(Post);

#[graphql_object(context = Context, name = "Post")]
impl PostQL {
    fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    fn title(&self) -> &str {
        &self.0.title
    }

    fn body(&self) -> &str {
        &self.0.body
    }

    fn published(&self) -> bool {
        self.0.published
    }

    fn author(&self, context: &Context) -> FieldResult<UserQL> {
        context.store.find_user_by_id(&self.0.author)
            .map(UserQL)
            .ok_or_else(|| FieldError::from("author no longer exists"))
    }

    fn comments(&self, context: &Context) -> Vec<CommentQL> {
        context.store.comments_by_post(&self.0.id).into_iter().map(CommentQL).collect()
    }
}

pub struct CommentQL(Comment);

#[graphql_object(context = Context, name = "Comment")]
impl CommentQL {
    fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    fn text(&self) -> &str {
        &self.0.text
    }

    fn author(&self, context: &Context) -> FieldResult<UserQL> {
        context.store.find_user_by_id(&self.0.author)
            .map(UserQL)
            .ok_or_else(|| FieldError::from("author no longer exists"))
    }

    fn post(&self, context: &Context) -> FieldResult<PostQL> {
        context.store.find_post_by_id(&self.0.post)
            .map(PostQL)
            .ok_or_else(|| FieldError::from("post no longer exists"))
    }
}

#[derive(GraphQLInputObject)]
struct CreateUserInput {
    name: String,
    email: String,
    age: Option<i32>,
}

impl CreateUserInput {
    fn into_command(self) -> FieldResult<CreateUser> {
        Ok(CreateUser {
            name: self.name,
            email: email(self.email)?,
            age: self.age,
        })
    }
}

#[derive(GraphQLInputObject)]
struct CreatePostInput {
    title: String,
    body: String,
    published: bool,
    author: ID,
}

#[derive(GraphQLInputObject)]
struct CreateCommentInput {
    text: String,
    author: ID,
    post: ID,
}

#[derive(GraphQLInputObject)]
struct UpdateUserInput {
    name: Nullable<String>,
    email: Nullable<String>,
    age: Nullable<i32>,
}

impl UpdateUserInput {
    fn into_command(self) -> FieldResult<UpdateUser> {
        Ok(UpdateUser {
            name: present("name", self.name)?,
            email: present("email", self.email)?.map(email).transpose()?,
            age: nullable(self.age),
        })
    }
}

#[derive(GraphQLInputObject)]
struct UpdatePostInput {
    title: Nullable<String>,
    body: Nullable<String>,
    published: Nullable<bool>,
}

impl UpdatePostInput {
    fn into_command(self) -> FieldResult<UpdatePost> {
        Ok(UpdatePost {
            title: present("title", self.title)?,
            body: present("body", self.body)?,
            published: present("published", self.published)?,
        })
    }
}

#[derive(GraphQLInputObject)]
struct UpdateCommentInput {
    text: Nullable<String>,
}

pub struct Mutation;

#[graphql_object(context = Context)]
impl Mutation {
    fn create_user(context: &Context, data: CreateUserInput) -> FieldResult<UserQL> {
        let command = data.into_command()?;

        context.mutations().create_user(command).map(UserQL).map_err(mutation_error)
    }

    fn create_post(context: &Context, data: CreatePostInput) -> FieldResult<PostQL> {
        let command = CreatePost {
            title: data.title,
            body: data.body,
            published: data.published,
            author: user_id(data.author),
        };

        context.mutations().create_post(command).map(PostQL).map_err(mutation_error)
    }

    fn create_comment(context: &Context, data: CreateCommentInput) -> FieldResult<CommentQL> {
        let command = CreateComment {
            text: data.text,
            author: user_id(data.author),
            post: post_id(data.post),
        };

        context.mutations().create_comment(command).map(CommentQL).map_err(mutation_error)
    }

    fn update_user(context: &Context, id: ID, data: UpdateUserInput) -> FieldResult<UserQL> {
        let command = data.into_command()?;

        context.mutations().update_user(&user_id(id), command).map(UserQL).map_err(mutation_error)
    }

    fn update_post(context: &Context, id: ID, data: UpdatePostInput) -> FieldResult<PostQL> {
        let command = data.into_command()?;

        context.mutations().update_post(&post_id(id), command).map(PostQL).map_err(mutation_error)
    }

    fn update_comment(context: &Context, id: ID, data: UpdateCommentInput) -> FieldResult<CommentQL> {
        let command = UpdateComment {
            text: present("text", data.text)?,
        };

        context.mutations().update_comment(&comment_id(id), command).map(CommentQL).map_err(mutation_error)
    }

    /// Deletes the user, their posts, and every comment by them or on their posts.
    fn delete_user(context: &Context, id: ID) -> FieldResult<UserQL> {
        context.mutations().delete_user(&user_id(id)).map(UserQL).map_err(mutation_error)
    }

    /// Deletes the post and its comments.
    fn delete_post(context: &Context, id: ID) -> FieldResult<PostQL> {
        context.mutations().delete_post(&post_id(id)).map(PostQL).map_err(mutation_error)
    }

    fn delete_comment(context: &Context, id: ID) -> FieldResult<CommentQL> {
        context.mutations().delete_comment(&comment_id(id)).map(CommentQL).map_err(mutation_error)
    }
}

type PostStream = Pin<Box<dyn Stream<Item = Result<PostQL, FieldError>> + Send>>;
type CommentStream = Pin<Box<dyn Stream<Item = Result<CommentQL, FieldError>> + Send>>;
type CountStream = Pin<Box<dyn Stream<Item = Result<i32, FieldError>> + Send>>;

pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Posts as they get published.
    async fn post(context: &Context) -> PostStream {
        let posts = context.subscribe_posts().filter_map(|event| {
            future::ready(match event {
                Event::PostPublished(published) => Some(Ok::<_, FieldError>(PostQL(published.post))),
                _ => None,
            })
        });

        Box::pin(posts)
    }

    /// New comments on one post. The post must exist and be published.
    async fn comment(context: &Context, post_id: ID) -> CommentStream {
        match context.subscribe_comments(&PostId::from(post_id.to_string())) {
            Ok(subscription) => {
                let comments = subscription.filter_map(|event| {
                    future::ready(match event {
                        Event::CommentCreated(created) => Some(Ok::<_, FieldError>(CommentQL(created.comment))),
                        _ => None,
                    })
                });

                Box::pin(comments)
            }
            Err(err) => Box::pin(stream::once(future::ready(Err::<CommentQL, _>(mutation_error(err))))),
        }
    }

    /// Counts up from one, once a second.
    async fn count() -> CountStream {
        let ticks = stream::unfold(0, |count| async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let next = count + 1;
            Some((Ok::<_, FieldError>(next), next))
        });

        Box::pin(ticks)
    }
}
