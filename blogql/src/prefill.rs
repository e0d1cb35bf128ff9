use blogql_core::commands::{CreateComment, CreatePost, CreateUser};
use blogql_core::domain::Email;
use blogql_core::Database;
use log::info;

use crate::Error;

/// Loads the demo users, posts and comments through the regular mutations.
pub fn prefill(db: &Database) -> Result<(), Error> {
    let m = db.mutations();

    let andrew = m.create_user(CreateUser {
        name: String::from("Andrew"),
        email: Email::new("andrew@example.com")?,
        age: Some(27),
    })?;
    let sarah = m.create_user(CreateUser {
        name: String::from("Sarah"),
        email: Email::new("sarah@example.com")?,
        age: None,
    })?;
    let mike = m.create_user(CreateUser {
        name: String::from("Mike"),
        email: Email::new("mike@example.com")?,
        age: None,
    })?;

    let intro = m.create_post(CreatePost {
        title: String::from("GraphQL 101"),
        body: String::from("This is how to use GraphQL..."),
        published: true,
        author: andrew.id.clone(),
    })?;
    m.create_post(CreatePost {
        title: String::from("GraphQL 201"),
        body: String::from("This is an advanced GraphQL post..."),
        published: false,
        author: andrew.id.clone(),
    })?;
    let music = m.create_post(CreatePost {
        title: String::from("Programming Music"),
        body: String::from("Tracks that keep me going."),
        published: true,
        author: sarah.id.clone(),
    })?;

    m.create_comment(CreateComment {
        text: String::from("This worked well for me. Thanks!"),
        author: sarah.id.clone(),
        post: intro.id.clone(),
    })?;
    m.create_comment(CreateComment {
        text: String::from("Glad you enjoyed it."),
        author: andrew.id.clone(),
        post: intro.id,
    })?;
    m.create_comment(CreateComment {
        text: String::from("This did not work."),
        author: mike.id.clone(),
        post: music.id.clone(),
    })?;
    m.create_comment(CreateComment {
        text: String::from("Nevermind. I got it to work."),
        author: mike.id,
        post: music.id,
    })?;

    let tables = db.store.snapshot();
    info!(
        "prefilled {} users, {} posts and {} comments",
        tables.users().len(),
        tables.posts().len(),
        tables.comments().len(),
    );

    Ok(())
}
