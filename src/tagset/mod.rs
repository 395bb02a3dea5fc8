//! Tag sets: collections of tags attached to host entities.

pub(crate) mod core;
pub(crate) mod db;
mod domain;
mod endpoints;
mod form;

pub use self::core::{add_tags_to_tagset, remove_tags_from_tagset};
pub use db::{
    contains_tag, count_members, create_tagset, create_tagset_tables, get_members,
    get_or_create_tagset, get_tagset, get_tagsets_containing, on_host_deleted,
};
pub use domain::{AddTagsFormData, TagSet, TagSetId};
pub use endpoints::{add_tags_endpoint, remove_tag_endpoint};
pub use form::parse_tag_names;
