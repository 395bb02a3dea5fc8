//! Tag management: domain types, persistence, reference resolution, and the
//! tag pages.

mod create;
pub(crate) mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod resolve;

pub use create::{create_tag_endpoint, get_new_tag_page};
pub use db::{
    create_tag, create_tag_table, delete_tag, get_all_tags, get_tag, get_tag_by_name, update_tag,
};
pub use delete::delete_tag_endpoint;
pub use domain::{
    DEFAULT_TAG_COLOR, MAX_TAG_NAME_LENGTH, Tag, TagColor, TagFormData, TagId, TagName,
};
pub use edit::{
    get_edit_tag_page, remove_subtag_endpoint, remove_supertag_endpoint, unexclude_tag_endpoint,
    update_tag_endpoint,
};
pub use list::get_tags_page;
pub use resolve::{TagRef, resolve_tag, resolve_tags};
