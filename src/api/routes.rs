//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::ErrorResponse;
use super::state::AppState;
use super::system::{self, HealthResponse};
use super::v1::{
    self, BookmarkResponse, CreateBookmarkRequest, PaginatedBookmarks, UpdateBookmarkRequest,
    UpdateStatusRequest,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// Applies the turbofish to every handler that is generic over the
/// Database trait.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookmarks API",
        version = "0.1.0",
        description = "Read-later bookmark inbox",
        license(name = "MIT")
    ),
    paths(
        system::health,
        v1::list_bookmarks,
        v1::get_bookmark,
        v1::create_bookmark,
        v1::update_bookmark,
        v1::update_bookmark_status,
        v1::delete_bookmark,
    ),
    components(
        schemas(
            HealthResponse,
            BookmarkResponse,
            PaginatedBookmarks,
            CreateBookmarkRequest,
            UpdateBookmarkRequest,
            UpdateStatusRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "bookmarks", description = "Bookmark management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router. The Scalar UI is mounted at `/docs` only when
/// `enable_docs` is set.
pub fn create_router<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    let system_routes = Router::new().route("/health", get(system::health));

    let bookmark_routes = routes!(D => {
        get "/api/v1/bookmarks" => v1::list_bookmarks,
        post "/api/v1/bookmarks" => v1::create_bookmark,
        get "/api/v1/bookmarks/{id}" => v1::get_bookmark,
        put "/api/v1/bookmarks/{id}" => v1::update_bookmark,
        delete "/api/v1/bookmarks/{id}" => v1::delete_bookmark,
        patch "/api/v1/bookmarks/{id}/status" => v1::update_bookmark_status,
    });

    let mut router = system_routes.merge(bookmark_routes);
    if enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
