//! Endpoints for adding tags to and removing tags from a tag set.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    tag::{TagId, TagRef},
    tagset::{
        TagSetId,
        core::{add_tags_to_tagset, remove_tags_from_tagset},
        domain::AddTagsFormData,
        form::parse_tag_names,
    },
};

/// The state needed for the tag set endpoints.
#[derive(Debug, Clone)]
pub struct TagSetEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TagSetEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the bulk tag entry form: a comma-separated list of tag names.
///
/// Names are trimmed, empty tokens dropped, and unknown names created on the
/// fly. Consistency errors (for example, two mutually excluding names in one
/// submission) reject the whole batch.
pub async fn add_tags_endpoint(
    Path(tagset_id): Path<TagSetId>,
    State(state): State<TagSetEndpointState>,
    Form(form_data): Form<AddTagsFormData>,
) -> Response {
    let names = parse_tag_names(&form_data.tag_names);
    let references: Vec<TagRef> = names.into_iter().map(TagRef::from).collect();

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match add_tags_to_tagset(tagset_id, &references, true, &connection) {
        Ok(()) => Alert::Success {
            message: "Tags added".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Remove a single tag from a tag set.
///
/// Removing a tag that is not a member is a silent no-op; its supertags stay
/// in the set.
pub async fn remove_tag_endpoint(
    Path((tagset_id, tag_id)): Path<(TagSetId, TagId)>,
    State(state): State<TagSetEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match remove_tags_from_tagset(tagset_id, &[TagRef::from(tag_id)], &connection) {
        Ok(()) => Alert::Success {
            message: "Tag removed".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
