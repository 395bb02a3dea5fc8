//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    html::error_view,
    tag::{
        create_tag_endpoint, delete_tag_endpoint, get_edit_tag_page, get_new_tag_page,
        get_tags_page, remove_subtag_endpoint, remove_supertag_endpoint, unexclude_tag_endpoint,
        update_tag_endpoint,
    },
    tagset::{add_tags_endpoint, remove_tag_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TAGS_VIEW, get(get_tags_page))
        .route(endpoints::NEW_TAG_VIEW, get(get_new_tag_page))
        .route(endpoints::EDIT_TAG_VIEW, get(get_edit_tag_page))
        .route(endpoints::POST_TAG, post(create_tag_endpoint))
        .route(endpoints::PUT_TAG, put(update_tag_endpoint))
        .route(endpoints::DELETE_TAG, delete(delete_tag_endpoint))
        .route(endpoints::REMOVE_SUBTAG, delete(remove_subtag_endpoint))
        .route(endpoints::REMOVE_SUPERTAG, delete(remove_supertag_endpoint))
        .route(endpoints::REMOVE_EXCLUSION, delete(unexclude_tag_endpoint))
        .route(endpoints::ADD_TAGSET_TAGS, post(add_tags_endpoint))
        .route(endpoints::REMOVE_TAGSET_TAG, delete(remove_tag_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the tags page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TAGS_VIEW)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Page Not Found",
            "404",
            "Page not found",
            "Check the address or head back to the tag listing.",
        ),
    )
        .into_response()
}
