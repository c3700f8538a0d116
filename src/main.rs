mod config;
mod error;
mod location;
mod nearby;
mod net;
mod places;
mod search_state;
mod sessions;
mod types;
mod view;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use config::Config;
use location::ReportedLocation;
use nearby::{NearbyPage, Timeouts};
use net::response::{ResponseError, Result};
use places::GooglePlacesClient;
use sessions::Sessions;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};
use types::{
    dto::session::{CategoryRequest, LatLngInput, MountRequest, MountResponse, SelectionResponse},
    point::GeoPoint,
};
use view::PageView;

type Page = NearbyPage<GooglePlacesClient, ReportedLocation>;

#[derive(Clone)]
struct AppState {
    sessions: Arc<Sessions<Page>>,
    places: GooglePlacesClient,
    default_center: GeoPoint,
    timeouts: Timeouts,
}

impl AppState {
    async fn page(&self, id: u64) -> Result<Arc<Page>> {
        self.sessions
            .get(id)
            .await
            .ok_or(ResponseError::not_found("No session with this id"))
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let state = AppState {
        sessions: Arc::new(Sessions::default()),
        places: GooglePlacesClient::new(
            reqwest::Client::new(),
            config.places_url.clone(),
            config.google_api_key.clone(),
        ),
        default_center: config.default_center,
        timeouts: Timeouts {
            search: config.search_timeout,
            location: config.location_timeout,
        },
    };

    tokio::spawn(state.sessions.clone().expire_idle(config.session_idle));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Running on {addr}");

    axum::Server::bind(&addr)
        .serve(app(state).into_make_service())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/sessions", post(mount))
        .route("/sessions/:id", get(get_view))
        .route("/sessions/:id", delete(unmount))
        .route("/sessions/:id/map-ready", post(map_ready))
        .route("/sessions/:id/category", put(set_category))
        .route("/sessions/:id/center", put(set_center))
        .route("/sessions/:id/selection", delete(deselect))
        .route("/sessions/:id/selection/:place_id", post(select))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[instrument(skip(app))]
async fn mount(
    State(app): State<AppState>,
    Json(request): Json<MountRequest>,
) -> Result<(StatusCode, Json<MountResponse>)> {
    let position = request.position.map(GeoPoint::try_from).transpose()?;
    let page = NearbyPage::new(
        app.places.clone(),
        Some(ReportedLocation(position)),
        app.default_center,
        app.timeouts,
    );
    let (id, page) = app.sessions.mount(page).await;
    Ok((
        StatusCode::CREATED,
        Json(MountResponse {
            id,
            view: page.view().await,
        }),
    ))
}

async fn get_view(State(app): State<AppState>, Path(id): Path<u64>) -> Result<Json<PageView>> {
    Ok(Json(app.page(id).await?.view().await))
}

async fn unmount(State(app): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    if !app.sessions.unmount(id).await {
        return Err(ResponseError::not_found("No session with this id"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// The handlers below settle the search they trigger before answering. When a
// newer request supersedes it, the answer carries whatever the newer one left.

#[instrument(skip(app))]
async fn map_ready(State(app): State<AppState>, Path(id): Path<u64>) -> Result<Json<PageView>> {
    let page = app.page(id).await?;
    page.map_ready().await;
    Ok(Json(page.view().await))
}

#[instrument(skip(app))]
async fn set_category(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<PageView>> {
    let page = app.page(id).await?;
    page.set_category(request.category).await;
    Ok(Json(page.view().await))
}

#[instrument(skip(app))]
async fn set_center(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<LatLngInput>,
) -> Result<Json<PageView>> {
    let center = GeoPoint::try_from(input)?;
    let page = app.page(id).await?;
    page.set_center(center).await;
    Ok(Json(page.view().await))
}

async fn select(
    State(app): State<AppState>,
    Path((id, place_id)): Path<(u64, String)>,
) -> Result<Json<SelectionResponse>> {
    let page = app.page(id).await?;
    let effects = page.select(&place_id).await?;
    Ok(Json(SelectionResponse {
        effects,
        view: page.view().await,
    }))
}

async fn deselect(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SelectionResponse>> {
    let page = app.page(id).await?;
    let effects = page.deselect().await;
    Ok(Json(SelectionResponse {
        effects,
        view: page.view().await,
    }))
}
