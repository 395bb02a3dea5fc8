//! Tags listing page.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, tag_badge,
    },
    navigation::NavBar,
    tag::{Tag, TagId, get_all_tags},
};

/// The state needed for the tags listing page.
#[derive(Debug, Clone)]
pub struct TagsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TagsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A tag with its formatted edit URL for template rendering.
#[derive(Debug, Clone)]
struct TagWithEditUrl {
    pub tag: Tag,
    pub edit_url: String,
    pub tagset_count: u32,
}

/// Render the tags listing page with tag set usage counts.
pub async fn get_tags_page(State(state): State<TagsPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let tags = get_all_tags(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve tags: {error}"))?;

    let tagsets_per_tag = count_tagsets_per_tag(&connection)
        .inspect_err(|error| tracing::error!("Could not count tag sets per tag: {error}"))?;

    let tags_with_edit_urls = tags
        .into_iter()
        .map(|tag| {
            let tagset_count = *tagsets_per_tag.get(&tag.id).unwrap_or(&0);

            TagWithEditUrl {
                edit_url: endpoints::format_endpoint(endpoints::EDIT_TAG_VIEW, tag.id),
                tag,
                tagset_count,
            }
        })
        .collect::<Vec<_>>();

    Ok(tags_view(&tags_with_edit_urls).into_response())
}

fn count_tagsets_per_tag(connection: &Connection) -> Result<HashMap<TagId, u32>, Error> {
    let result: Result<HashMap<TagId, u32>, rusqlite::Error> = connection
        .prepare("SELECT tag_id, COUNT(1) FROM tag_set_membership GROUP BY tag_id")?
        .query_map((), |row| {
            let tag_id = row.get(0)?;
            let count = row.get(1)?;

            Ok((tag_id, count))
        })?
        .collect();

    result.map_err(Error::from)
}

fn tags_view(tags: &[TagWithEditUrl]) -> Markup {
    let new_tag_route = endpoints::NEW_TAG_VIEW;
    let nav_bar = NavBar::new(endpoints::TAGS_VIEW).into_html();

    let table_row = |tag_with_url: &TagWithEditUrl| {
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_TAG, tag_with_url.tag.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? This will remove it from {} tag set(s) \
            and drop all of its relations.",
            tag_with_url.tag.name, tag_with_url.tagset_count
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (tag_badge(tag_with_url.tag.name.as_ref(), tag_with_url.tag.color.as_ref()))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (tag_with_url.tagset_count)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &tag_with_url.edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Tags" }

                    a href=(new_tag_route) class=(LINK_STYLE)
                    {
                        "Create Tag"
                    }
                }

                section class="dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Name"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Tag Sets"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for tag_with_url in tags {
                                (table_row(tag_with_url))
                            }

                            @if tags.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No tags created yet. "
                                        a href=(new_tag_route) class=(LINK_STYLE)
                                        {
                                            "Create your first tag"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Tags", &content)
}
