use blogql::graphql::{schema, Context, Schema};
use blogql_core::commands::{CreateComment, CreatePost, CreateUser};
use blogql_core::domain::Email;
use blogql_core::{Database, Post, User};
use futures::{FutureExt, StreamExt};
use juniper::{graphql_value, Value, ValuesStream, Variables};
use pretty_assertions::assert_eq;

/// Resolves a single-field subscription into the stream of that field's values.
async fn subscribe<'a>(schema: &'a Schema, ctx: &'a Context, query: &'a str) -> ValuesStream<'a> {
    let (value, errors) = juniper::resolve_into_stream(query, None, schema, &Variables::new(), ctx)
        .await
        .unwrap();
    assert!(errors.is_empty(), "{:?}", errors);

    match value {
        Value::Object(fields) => match fields.into_iter().next() {
            Some((_, Value::Scalar(stream))) => stream,
            Some((name, _)) => panic!("field {} did not resolve to a stream", name),
            None => panic!("no subscription field selected"),
        },
        _ => panic!("subscription did not resolve to an object"),
    }
}

fn user(ctx: &Context, name: &str) -> User {
    ctx.mutations().create_user(CreateUser {
        name: name.to_owned(),
        email: Email::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
        age: None,
    }).unwrap()
}

fn post(ctx: &Context, author: &User, title: &str, published: bool) -> Post {
    ctx.mutations().create_post(CreatePost {
        title: title.to_owned(),
        body: "Body".to_owned(),
        published,
        author: author.id.clone(),
    }).unwrap()
}

fn comment(ctx: &Context, author: &User, on: &Post, text: &str) {
    ctx.mutations().create_comment(CreateComment {
        text: text.to_owned(),
        author: author.id.clone(),
        post: on.id.clone(),
    }).unwrap();
}

#[tokio::test]
async fn post_streams_newly_published_posts() {
    let schema = schema();
    let ctx = Context::new(Database::new());
    let andrew = user(&ctx, "Andrew");

    let mut posts = subscribe(&schema, &ctx, "subscription { post { title author { name } } }").await;

    post(&ctx, &andrew, "Draft", false);
    post(&ctx, &andrew, "GraphQL 101", true);

    let received = posts.next().await.unwrap().unwrap();
    assert_eq!(
        graphql_value!({ "title": "GraphQL 101", "author": { "name": "Andrew" } }),
        received,
    );
    assert!(posts.next().now_or_never().is_none());
}

#[tokio::test]
async fn comment_streams_only_its_own_post() {
    let schema = schema();
    let ctx = Context::new(Database::new());
    let andrew = user(&ctx, "Andrew");
    let sarah = user(&ctx, "Sarah");
    let first = post(&ctx, &andrew, "First", true);
    let second = post(&ctx, &andrew, "Second", true);

    let query = format!("subscription {{ comment(postId: \"{}\") {{ text author {{ name }} }} }}", second.id);
    let mut comments = subscribe(&schema, &ctx, &query).await;

    comment(&ctx, &sarah, &first, "On the first");
    comment(&ctx, &sarah, &second, "On the second");

    let received = comments.next().await.unwrap().unwrap();
    assert_eq!(
        graphql_value!({ "text": "On the second", "author": { "name": "Sarah" } }),
        received,
    );
    assert!(comments.next().now_or_never().is_none());
}

#[tokio::test]
async fn comment_on_a_missing_post_yields_one_error() {
    let schema = schema();
    let ctx = Context::new(Database::new());

    let mut comments = subscribe(&schema, &ctx, "subscription { comment(postId: \"nope\") { id } }").await;

    let err = comments.next().await.unwrap().unwrap_err();
    assert_eq!("post does not exist or is not published", err.error().message());
    assert_eq!(&graphql_value!({ "code": "INVALID_REFERENCE" }), err.error().extensions());
    assert!(comments.next().await.is_none());
}

#[tokio::test]
async fn comment_on_an_unpublished_post_yields_one_error() {
    let schema = schema();
    let ctx = Context::new(Database::new());
    let andrew = user(&ctx, "Andrew");
    let draft = post(&ctx, &andrew, "Draft", false);

    let query = format!("subscription {{ comment(postId: \"{}\") {{ id }} }}", draft.id);
    let mut comments = subscribe(&schema, &ctx, &query).await;

    let err = comments.next().await.unwrap().unwrap_err();
    assert_eq!(&graphql_value!({ "code": "INVALID_REFERENCE" }), err.error().extensions());
    assert!(comments.next().await.is_none());
    assert_eq!(0, ctx.notifier.topic_count());
}

#[tokio::test(start_paused = true)]
async fn count_ticks_from_one() {
    let schema = schema();
    let ctx = Context::new(Database::new());

    let mut count = subscribe(&schema, &ctx, "subscription { count }").await;

    assert_eq!(graphql_value!(1), count.next().await.unwrap().unwrap());
    assert_eq!(graphql_value!(2), count.next().await.unwrap().unwrap());
}

#[tokio::test]
async fn dropping_a_subscription_unregisters_it() {
    let schema = schema();
    let ctx = Context::new(Database::new());
    let andrew = user(&ctx, "Andrew");
    let live = post(&ctx, &andrew, "Live", true);

    let query = format!("subscription {{ comment(postId: \"{}\") {{ id }} }}", live.id);
    let comments = subscribe(&schema, &ctx, &query).await;
    assert_eq!(1, ctx.notifier.topic_count());

    drop(comments);

    assert_eq!(0, ctx.notifier.topic_count());
}
