//! The inclusion and exclusion relations between tags.
//!
//! [db] holds the raw edge primitives, [reachability] the transitive
//! queries, and [engine] the consistency-checked mutations that are the only
//! public write path.

pub(crate) mod db;
pub(crate) mod engine;
pub(crate) mod reachability;

pub use db::{are_excluding, get_direct_exclusions, get_direct_subtags, get_direct_supertags};
pub use engine::{exclude_tag, include_tag, unexclude_tag, uninclude_tag};
pub use reachability::{
    get_all_subtags, get_all_supertags, get_indirect_subtags, get_indirect_supertags, includes,
};

pub use db::create_relation_tables;
