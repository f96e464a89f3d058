//! Live server: renders the list and detail routes straight from the
//! content repository
//!
//! The shared pagination state lives behind a `tokio::sync::Mutex`; the
//! load-more route takes the lock with `try_lock`, so overlapping requests
//! are rejected instead of racing (single outstanding fetch at a time,
//! append order equals arrival order).

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

use crate::cms::ContentClient;
use crate::content::{resolve_detail, DisplayRecord, LoadOutcome, Paginator};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Caravel;

/// Server state shared across request handlers
struct ServerState {
    client: ContentClient,
    renderer: TemplateRenderer,
    site: SiteData,
    content_type: String,
    date_fallback: String,
    paginator: Mutex<Paginator>,
}

/// Payload returned by the load-more route
#[derive(Serialize)]
struct LoadMorePage {
    results: Vec<DisplayRecord>,
    has_more: bool,
}

/// Start the server, seeding pagination state from the first listing page.
pub async fn start(app: &Caravel, ip: &str, port: u16) -> Result<()> {
    let client = app.content_client()?;
    let config = &app.config;

    let first_page = client
        .get_by_type(&config.content_type, config.page_size)
        .await?;
    let paginator = Paginator::from_page(&first_page, &config.date_fallback);
    tracing::info!(
        "loaded first page: {} posts, more={}",
        paginator.items().len(),
        paginator.has_more()
    );

    let state = Arc::new(ServerState {
        client,
        renderer: TemplateRenderer::new()?,
        site: SiteData::from_config(config),
        content_type: config.content_type.clone(),
        date_fallback: config.date_fallback.clone(),
        paginator: Mutex::new(paginator),
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/post/:slug", get(post_detail))
        .route("/api/load-more", post(load_more))
        .fallback_service(ServeDir::new(&app.public_dir))
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Post list from the current pagination state
async fn index(State(state): State<Arc<ServerState>>) -> Response {
    let paginator = state.paginator.lock().await;
    match state
        .renderer
        .render_index(&state.site, paginator.items(), paginator.has_more())
    {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!("failed to render index: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "render error").into_response()
        }
    }
}

/// Post detail, resolved on demand.
///
/// Slugs already present in the materialized list render as regular pages;
/// anything else is the fallback path: still resolved live, but flagged to
/// the template so it can show the loading treatment.
async fn post_detail(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let is_fallback = {
        let paginator = state.paginator.lock().await;
        !paginator.items().iter().any(|item| item.uid == slug)
    };

    let record = match state.client.get_by_uid(&state.content_type, &slug).await {
        Ok(record) => record,
        Err(err) if err.is_not_found() => {
            return (StatusCode::NOT_FOUND, "post não encontrado").into_response();
        }
        Err(err) => {
            tracing::error!("failed to resolve {}: {}", slug, err);
            return (StatusCode::BAD_GATEWAY, "content repository error").into_response();
        }
    };

    let detail = resolve_detail(&record, &state.date_fallback);
    match state.renderer.render_post(&state.site, &detail, is_fallback) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!("failed to render {}: {}", slug, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "render error").into_response()
        }
    }
}

/// Advance the shared pagination state by one page.
///
/// 409 when a fetch is already in flight, 204 once the cursor is
/// exhausted, 502 when the repository fails.
async fn load_more(State(state): State<Arc<ServerState>>) -> Response {
    let Ok(mut paginator) = state.paginator.try_lock() else {
        return (StatusCode::CONFLICT, "load already in progress").into_response();
    };

    match paginator.load_more(&state.client).await {
        Ok(LoadOutcome::Appended(count)) => {
            let items = paginator.items();
            let results = items[items.len() - count..].to_vec();
            Json(LoadMorePage {
                results,
                has_more: paginator.has_more(),
            })
            .into_response()
        }
        Ok(LoadOutcome::Exhausted) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            tracing::error!("load more failed: {}", err);
            (StatusCode::BAD_GATEWAY, "content repository error").into_response()
        }
    }
}
