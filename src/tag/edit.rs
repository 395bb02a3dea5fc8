//! Tag edit page, update endpoint, and relation removal endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, tag_badge,
    },
    navigation::NavBar,
    relation::{
        get_direct_exclusions, get_direct_subtags, get_direct_supertags, include_tag,
        unexclude_tag, uninclude_tag,
    },
    tag::{Tag, TagColor, TagId, TagName, TagRef, domain::TagFormData, get_tag, update_tag},
    tagset::parse_tag_names,
};

/// The state needed for the tag edit page and endpoints.
#[derive(Debug, Clone)]
pub struct EditTagState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTagState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the edit page for a tag, listing its direct relations.
pub async fn get_edit_tag_page(
    Path(tag_id): Path<TagId>,
    State(state): State<EditTagState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let tag = get_tag(tag_id, &connection)?;
    let supertags = get_direct_supertags(tag_id, &connection)?;
    let subtags = get_direct_subtags(tag_id, &connection)?;
    let exclusions = get_direct_exclusions(tag_id, &connection)?;

    Ok(edit_tag_view(&tag, &supertags, &subtags, &exclusions).into_response())
}

/// Handle the edit form submission: rename, recolor, and attach supertags.
///
/// The `supertags` form field is a comma-separated list of tag names; each
/// named tag is made a supertag of the edited tag. A name that does not
/// resolve, or an inclusion the consistency rules reject, fails the request
/// with an alert.
pub async fn update_tag_endpoint(
    Path(tag_id): Path<TagId>,
    State(state): State<EditTagState>,
    Form(form_data): Form<TagFormData>,
) -> Response {
    let name = match TagName::new(&form_data.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let color = match &form_data.color {
        Some(color) if !color.trim().is_empty() => match TagColor::new(color) {
            Ok(color) => color,
            Err(error) => return error.into_alert_response(),
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

    if let Err(error) = update_tag(tag_id, name, color, &connection) {
        return error.into_alert_response();
    }

    let supertag_names = form_data
        .supertags
        .as_deref()
        .map(parse_tag_names)
        .unwrap_or_default();

    for supertag_name in supertag_names {
        if let Err(error) = include_tag(
            &TagRef::from(supertag_name.as_str()),
            &TagRef::from(tag_id),
            false,
            &connection,
        ) {
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::TAGS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Stop the tag including the given subtag.
pub async fn remove_subtag_endpoint(
    Path((tag_id, subtag_id)): Path<(TagId, TagId)>,
    State(state): State<EditTagState>,
) -> Response {
    with_connection(&state, |connection| {
        uninclude_tag(
            &TagRef::from(tag_id),
            &TagRef::from(subtag_id),
            connection,
        )
    })
}

/// Stop the given supertag including the tag.
pub async fn remove_supertag_endpoint(
    Path((tag_id, supertag_id)): Path<(TagId, TagId)>,
    State(state): State<EditTagState>,
) -> Response {
    with_connection(&state, |connection| {
        uninclude_tag(
            &TagRef::from(supertag_id),
            &TagRef::from(tag_id),
            connection,
        )
    })
}

/// Remove the exclusion between the tag and the given tag.
pub async fn unexclude_tag_endpoint(
    Path((tag_id, excluded_id)): Path<(TagId, TagId)>,
    State(state): State<EditTagState>,
) -> Response {
    with_connection(&state, |connection| {
        unexclude_tag(
            &TagRef::from(tag_id),
            &TagRef::from(excluded_id),
            connection,
        )
    })
}

fn with_connection(
    state: &EditTagState,
    operation: impl FnOnce(&Connection) -> Result<(), Error>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match operation(&connection) {
        Ok(()) => Alert::Success {
            message: "Relation removed".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn edit_tag_view(tag: &Tag, supertags: &[Tag], subtags: &[Tag], exclusions: &[Tag]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TAGS_VIEW).into_html();
    let update_url = endpoints::format_endpoint(endpoints::PUT_TAG, tag.id);

    let relation_list = |heading: &str, related_tags: &[Tag], remove_route: &str| {
        html! {
            div class="w-full"
            {
                h2 class="text-lg font-semibold mb-2" { (heading) }

                @if related_tags.is_empty() {
                    p class="text-sm text-gray-500 dark:text-gray-400" { "None" }
                }

                ul class="space-y-2"
                {
                    @for related_tag in related_tags {
                        li class="flex items-center gap-3" data-relation-item="true"
                        {
                            (tag_badge(related_tag.name.as_ref(), related_tag.color.as_ref()))

                            button
                                hx-delete=(
                                    endpoints::format_endpoint(
                                        &endpoints::format_endpoint(remove_route, tag.id),
                                        related_tag.id,
                                    )
                                )
                                hx-target="closest li"
                                hx-swap="delete"
                                hx-target-error="#alert-container"
                                class=(BUTTON_DELETE_STYLE)
                            {
                                "Remove"
                            }
                        }
                    }
                }
            }
        }
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_url)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Tag Name" }

                    input
                        id="name"
                        type="text"
                        name="name"
                        value=(tag.name)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="color" class=(FORM_LABEL_STYLE) { "Color" }

                    input
                        id="color"
                        type="color"
                        name="color"
                        value=(tag.color)
                        class="h-10 w-20 cursor-pointer rounded border border-gray-300 dark:border-gray-600";
                }

                div
                {
                    label for="supertags" class=(FORM_LABEL_STYLE) { "Add Supertags" }

                    input
                        id="supertags"
                        type="text"
                        name="supertags"
                        placeholder="Comma-separated tag names"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Tag" }
            }

            div class="w-full mt-8 space-y-6"
            {
                (relation_list("Supertags", supertags, endpoints::REMOVE_SUPERTAG))
                (relation_list("Subtags", subtags, endpoints::REMOVE_SUBTAG))
                (relation_list("Excluded Tags", exclusions, endpoints::REMOVE_EXCLUSION))
            }
        }
    };

    base(&format!("Edit {}", tag.name), &content)
}
