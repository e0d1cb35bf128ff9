use blogql::graphql::{schema, Context};
use blogql_core::commands::{CreateComment, CreatePost, CreateUser};
use blogql_core::domain::Email;
use blogql_core::Database;
use juniper::{graphql_value, ExecutionError, Value, Variables};
use pretty_assertions::assert_eq;

async fn run(ctx: &Context, query: &str) -> (Value, Vec<ExecutionError<juniper::DefaultScalarValue>>) {
    juniper::execute(query, None, &schema(), &Variables::new(), ctx)
        .await
        .unwrap()
}

fn error_code(errors: &[ExecutionError<juniper::DefaultScalarValue>]) -> Option<Value> {
    errors.first().map(|e| e.error().extensions().clone())
}

fn seeded() -> (Context, String, String) {
    let ctx = Context::new(Database::new());
    let andrew = ctx.mutations().create_user(CreateUser {
        name: "Andrew".to_owned(),
        email: Email::new("andrew@example.com").unwrap(),
        age: Some(27)
    }).unwrap();
    let sarah = ctx.mutations().create_user(CreateUser {
        name: "Sarah".to_owned(),
        email: Email::new("sarah@example.com").unwrap(),
        age: None
    }).unwrap();
    let post = ctx.mutations().create_post(CreatePost {
        title: "GraphQL 101".to_owned(),
        body: "Start here".to_owned(),
        published: true,
        author: andrew.id.clone()
    }).unwrap();
    ctx.mutations().create_comment(CreateComment {
        text: "Thanks!".to_owned(),
        author: sarah.id.clone(),
        post: post.id.clone()
    }).unwrap();

    (ctx, andrew.id.to_string(), post.id.to_string())
}

#[tokio::test]
async fn create_user_returns_the_new_user() {
    let ctx = Context::new(Database::new());

    let (data, errors) = run(&ctx, r#"
        mutation {
            createUser(data: { name: "Andrew", email: "andrew@example.com", age: 27 }) {
                name
                email
                age
                posts { id }
            }
        }
    "#).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        graphql_value!({
            "createUser": {
                "name": "Andrew",
                "email": "andrew@example.com",
                "age": 27,
                "posts": []
            }
        }),
        data,
    );
    assert_eq!(1, ctx.store.list_users(None).len());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (ctx, _, _) = seeded();

    let (_, errors) = run(&ctx, r#"
        mutation {
            createUser(data: { name: "Imposter", email: "andrew@example.com" }) { id }
        }
    "#).await;

    assert_eq!(1, errors.len());
    assert_eq!("email is already in use", errors[0].error().message());
    assert_eq!(Some(graphql_value!({ "code": "CONFLICT" })), error_code(&errors));
    assert_eq!(2, ctx.store.list_users(None).len());
}

#[tokio::test]
async fn malformed_email_is_bad_input() {
    let ctx = Context::new(Database::new());

    let (_, errors) = run(&ctx, r#"
        mutation {
            createUser(data: { name: "Nobody", email: "not an address" }) { id }
        }
    "#).await;

    assert_eq!(Some(graphql_value!({ "code": "BAD_USER_INPUT" })), error_code(&errors));
    assert!(ctx.store.list_users(None).is_empty());
}

#[tokio::test]
async fn unknown_author_is_an_invalid_reference() {
    let ctx = Context::new(Database::new());

    let (_, errors) = run(&ctx, r#"
        mutation {
            createPost(data: { title: "T", body: "B", published: true, author: "nobody" }) { id }
        }
    "#).await;

    assert_eq!(Some(graphql_value!({ "code": "INVALID_REFERENCE" })), error_code(&errors));
}

#[tokio::test]
async fn nested_relations_resolve() {
    let (ctx, _, post_id) = seeded();

    let query = format!(r#"
        {{
            post(id: "{}") {{
                title
                author {{ name }}
                comments {{
                    text
                    author {{ name }}
                }}
            }}
        }}
    "#, post_id);
    let (data, errors) = run(&ctx, &query).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        graphql_value!({
            "post": {
                "title": "GraphQL 101",
                "author": { "name": "Andrew" },
                "comments": [
                    { "text": "Thanks!", "author": { "name": "Sarah" } }
                ]
            }
        }),
        data,
    );
}

#[tokio::test]
async fn search_filters_users_and_posts() {
    let (ctx, _, _) = seeded();

    let (data, errors) = run(&ctx, r#"
        {
            users(query: "SAR") { name }
            posts(query: "start") { title }
            missing: user(id: "nobody") { name }
        }
    "#).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        graphql_value!({
            "users": [{ "name": "Sarah" }],
            "posts": [{ "title": "GraphQL 101" }],
            "missing": null
        }),
        data,
    );
}

#[tokio::test]
async fn update_user_clears_age_with_explicit_null() {
    let (ctx, andrew_id, _) = seeded();

    let query = format!(r#"
        mutation {{
            updateUser(id: "{}", data: {{ age: null }}) {{ name age }}
        }}
    "#, andrew_id);
    let (data, errors) = run(&ctx, &query).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        graphql_value!({ "updateUser": { "name": "Andrew", "age": null } }),
        data,
    );
}

#[tokio::test]
async fn update_user_refuses_null_name() {
    let (ctx, andrew_id, _) = seeded();

    let query = format!(r#"
        mutation {{
            updateUser(id: "{}", data: {{ name: null }}) {{ name }}
        }}
    "#, andrew_id);
    let (_, errors) = run(&ctx, &query).await;

    assert_eq!(Some(graphql_value!({ "code": "BAD_USER_INPUT" })), error_code(&errors));
    assert_eq!(1, ctx.store.list_users(Some("andrew")).len());
}

#[tokio::test]
async fn delete_user_cascades() {
    let (ctx, andrew_id, post_id) = seeded();

    let query = format!(r#"
        mutation {{
            deleteUser(id: "{}") {{ name }}
        }}
    "#, andrew_id);
    let (data, errors) = run(&ctx, &query).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(graphql_value!({ "deleteUser": { "name": "Andrew" } }), data);

    let (data, errors) = run(&ctx, r#"
        {
            users { name }
            posts { id }
            comments { id }
        }
    "#).await;

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        graphql_value!({
            "users": [{ "name": "Sarah" }],
            "posts": [],
            "comments": []
        }),
        data,
    );
    assert!(ctx.store.find_post_by_id(&post_id.as_str().into()).is_none());
}

#[tokio::test]
async fn deleting_a_missing_comment_is_not_found() {
    let ctx = Context::new(Database::new());

    let (_, errors) = run(&ctx, r#"
        mutation { deleteComment(id: "nope") { id } }
    "#).await;

    assert_eq!(Some(graphql_value!({ "code": "NOT_FOUND" })), error_code(&errors));
}
