use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
    Json,
};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::storage::DocumentStore;
use crate::ui::Icons;

pub mod schema;
pub mod types;

pub use schema::{build_schema, MutationRoot, PokedexSchema, QueryRoot};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the application router over a document store
pub fn router(store: Arc<dyn DocumentStore>) -> Router {
    let schema = build_schema(store);

    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(schema)
}

pub async fn start_server(addr: SocketAddr, store: Arc<dyn DocumentStore>) -> anyhow::Result<()> {
    tracing::info!("Serving document {}", store.location());
    let app = router(store);

    tracing::info!("Starting server on {}", addr);
    println!("{} GraphQL endpoint at http://{}{}", Icons::GLOBE, addr, GRAPHQL_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn graphql_handler(State(schema): State<PokedexSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
