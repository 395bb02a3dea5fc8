//! Tag creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    tag::{DEFAULT_TAG_COLOR, TagColor, TagName, create_tag, domain::TagFormData},
};

/// The state needed for creating a tag.
#[derive(Debug, Clone)]
pub struct CreateTagEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTagEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the tag creation page.
pub async fn get_new_tag_page() -> Response {
    new_tag_view().into_response()
}

/// Handle tag creation form submission.
pub async fn create_tag_endpoint(
    State(state): State<CreateTagEndpointState>,
    Form(new_tag): Form<TagFormData>,
) -> Response {
    let name = match TagName::new(&new_tag.name) {
        Ok(name) => name,
        Err(error) => {
            return new_tag_form_view(&format!("Error: {error}")).into_response();
        }
    };

    let color = match &new_tag.color {
        Some(color) if !color.trim().is_empty() => match TagColor::new(color) {
            Ok(color) => color,
            Err(error) => {
                return new_tag_form_view(&format!("Error: {error}")).into_response();
            }
        },
        _ => TagColor::default(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_tag(name, color, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::TAGS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::DuplicateTagName) => Error::DuplicateTagName.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a tag: {error}");

            error.into_alert_response()
        }
    }
}

fn new_tag_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TAG_VIEW).into_html();
    let form = new_tag_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Tag", &content)
}

fn new_tag_form_view(error_message: &str) -> Markup {
    let create_tag_endpoint = endpoints::POST_TAG;

    html! {
        form
            hx-post=(create_tag_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Tag Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Tag Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="color"
                    class=(FORM_LABEL_STYLE)
                {
                    "Color"
                }

                input
                    id="color"
                    type="color"
                    name="color"
                    value=(format!("#{DEFAULT_TAG_COLOR}"))
                    class="h-10 w-20 cursor-pointer rounded border border-gray-300 dark:border-gray-600";
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Tag" }
        }
    }
}
