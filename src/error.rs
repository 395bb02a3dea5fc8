//! Defines the app level error type and conversions to HTTP responses and alerts.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::alert::Alert;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A tag reference (name or ID) could not be resolved to an existing tag.
    #[error("the reference does not refer to a known tag")]
    NoSuchTag,

    /// A tag was asked to exclude itself.
    #[error("a tag may not exclude itself")]
    SelfExclusion,

    /// An inclusion or exclusion edge would contradict an existing edge
    /// between the same two tags.
    #[error("a tag may not simultaneously include and exclude another tag")]
    SimultaneousInclusionExclusion,

    /// An inclusion edge would create a cycle in the inclusion graph.
    #[error("the inclusion would create a cycle")]
    CircularInclusion,

    /// An exclusion was requested between two tags that share at least one
    /// transitive subtag.
    #[error("tags with a common subtag may not exclude each other")]
    CommonSubtagExclusion,

    /// An operation would place two mutually excluding tags in the same tag
    /// set, or exclude two tags that are already jointly present in one.
    #[error("the tags exclude each other")]
    MutualExclusion,

    /// An operation would require a tag set to contain two excluding tags
    /// once supertags are taken into account.
    #[error("the tags have mutually exclusive supertags")]
    MutuallyExclusiveSupertags,

    /// A propagating inclusion would silently evict an existing tag set
    /// member that the new supertags exclude.
    #[error("adding the supertag would remove an excluded tag from a tag set")]
    SupertagAdditionWouldRemoveExcluded,

    /// An empty string was used to create a tag name.
    #[error("Tag name cannot be empty")]
    EmptyTagName,

    /// A tag name longer than the storage bound was used.
    #[error("Tag name cannot be longer than 256 bytes")]
    TagNameTooLong,

    /// A string that is not a six-digit hex color was used as a tag color.
    #[error("\"{0}\" is not a valid hex color")]
    InvalidTagColor(String),

    /// The tag name used to create a tag already exists in the database.
    #[error("a tag with the same name already exists")]
    DuplicateTagName,

    /// Tried to update a tag that does not exist.
    #[error("tried to update a tag that is not in the database")]
    UpdateMissingTag,

    /// Tried to delete a tag that does not exist.
    #[error("tried to delete a tag that is not in the database")]
    DeleteMissingTag,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("tag.name") =>
            {
                Error::DuplicateTagName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_alert_response()
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NoSuchTag => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "No such tag".to_owned(),
                    details: "One of the given tag names or IDs does not refer to a known tag."
                        .to_owned(),
                },
            ),
            Error::SelfExclusion => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid exclusion".to_owned(),
                    details: "A tag cannot exclude itself.".to_owned(),
                },
            ),
            Error::SimultaneousInclusionExclusion => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Conflicting relation".to_owned(),
                    details: "A tag cannot simultaneously include and exclude another tag."
                        .to_owned(),
                },
            ),
            Error::CircularInclusion => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Circular inclusion".to_owned(),
                    details: "The inclusion would create a cycle, which is not allowed.".to_owned(),
                },
            ),
            Error::CommonSubtagExclusion => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid exclusion".to_owned(),
                    details: "Tags that share a subtag cannot exclude each other.".to_owned(),
                },
            ),
            Error::MutualExclusion => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Mutually exclusive tags".to_owned(),
                    details: "The tags exclude each other and cannot be part of the same tag set."
                        .to_owned(),
                },
            ),
            Error::MutuallyExclusiveSupertags => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Mutually exclusive supertags".to_owned(),
                    details: "The tags, or some of their supertags, exclude each other.".to_owned(),
                },
            ),
            Error::SupertagAdditionWouldRemoveExcluded => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Inclusion would remove tags".to_owned(),
                    details: "Updating existing tag sets with the new supertag would silently \
                    remove tags it excludes. Remove those tags first."
                        .to_owned(),
                },
            ),
            Error::EmptyTagName => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Invalid tag name".to_owned(),
                    details: "Tag name cannot be empty.".to_owned(),
                },
            ),
            Error::TagNameTooLong => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Invalid tag name".to_owned(),
                    details: "Tag name cannot be longer than 256 bytes.".to_owned(),
                },
            ),
            Error::InvalidTagColor(color) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Invalid tag color".to_owned(),
                    details: format!("\"{color}\" is not a six-digit hex color."),
                },
            ),
            Error::DuplicateTagName => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate tag name".to_owned(),
                    details: "A tag with that name already exists. \
                    Choose a different name, or edit the existing tag."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingTag => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update tag".to_owned(),
                    details: "The tag could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTag => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete tag".to_owned(),
                    details: "The tag could not be found. \
                    Try refreshing the page to see if the tag has already been deleted."
                        .to_owned(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The requested resource could not be found.".to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
