use std::net::SocketAddr;
use std::sync::Arc;

use juniper_graphql_ws::ConnectionConfig;
use log::info;
use warp::Filter;

use super::{schema, Context};

/// Serves `POST /graphql`, the GraphiQL page at `GET /graphiql`, and
/// graphql-ws subscriptions on `/subscriptions` until the process stops.
pub async fn serve(context: Context, addr: SocketAddr) {
    let request_context = context.clone();
    let context_extractor = warp::any().map(move || request_context.clone()).boxed();
    let graphql_filter = juniper_warp::make_graphql_filter(schema(), context_extractor);

    let subscriptions = warp::path("subscriptions").and(juniper_warp::subscriptions::make_ws_filter(
        Arc::new(schema()),
        ConnectionConfig::new(context),
    ));

    let graphql = warp::path("graphql").and(warp::post()).and(graphql_filter);

    let graphiql = warp::path("graphiql")
        .and(warp::get())
        .and(juniper_warp::graphiql_filter("/graphql", Some("/subscriptions")));

    let routes = subscriptions
        .or(graphql)
        .or(graphiql)
        .with(warp::log("blogql::http"));

    info!("graphql endpoint at http://{}/graphql", addr);
    info!("graphiql at http://{}/graphiql", addr);

    warp::serve(routes).run(addr).await
}
