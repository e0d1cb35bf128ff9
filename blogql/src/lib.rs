#![warn(
    unused_import_braces,
    unused_imports,
    unused_qualifications,
)]

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_must_use,
)]

pub mod graphql;
mod prefill;

use std::net::SocketAddr;

use blogql_core::Database;
use log::info;

pub use crate::prefill::prefill;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Server settings, normally taken from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub listen: SocketAddr,
    pub prefill: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: SocketAddr::from(([0, 0, 0, 0], 2777)),
            prefill: false,
        }
    }
}

pub async fn start_blog_server(config: Config) -> Result<(), Error> {
    let db = Database::new();

    if config.prefill {
        prefill(&db)?;
    }

    let context = graphql::Context::new(db);

    info!("listening on {}", config.listen);
    graphql::endpoint::serve(context, config.listen).await;

    Ok(())
}
