use std::ops;
use std::sync::Arc;

use blogql_core::Database;
use juniper::RootNode;

mod schema;
pub mod endpoint;

pub use self::schema::{Mutation, Query, Subscription};

pub type Schema = RootNode<'static, Query, Mutation, Subscription>;

pub fn schema() -> Schema {
    Schema::new(Query, Mutation, Subscription)
}

/// Per-request resolver context. Every request shares the same database.
#[derive(Clone, Debug)]
pub struct Context {
    inner: Arc<Database>,
}

impl Context {
    pub fn new(database: Database) -> Self {
        Context {
            inner: Arc::new(database),
        }
    }
}

impl ops::Deref for Context {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl juniper::Context for Context {}
