//! Router assembly.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

/// Which of the three generation surfaces this process serves.
///
/// The flows began life as separate apps; running a subset keeps that
/// deployment shape available.
#[derive(Clone, Copy, Debug)]
pub struct Surfaces {
    pub images: bool,
    pub speech: bool,
    pub vision: bool,
}

impl Default for Surfaces {
    fn default() -> Self {
        Self {
            images: true,
            speech: true,
            vision: true,
        }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState, surfaces: Surfaces) -> Router {
    let mut api = Router::new();
    if surfaces.images {
        api = api.merge(routes::images::router());
    }
    if surfaces.speech {
        api = api.merge(routes::speech::router());
    }
    if surfaces.vision {
        api = api.merge(routes::vision::router());
    }

    Router::new()
        .route("/health", axum::routing::get(routes::health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
