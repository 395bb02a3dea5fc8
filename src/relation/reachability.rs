//! Transitive queries over the inclusion relation.
//!
//! All queries are computed on demand with an iterative breadth-first
//! traversal. The inclusion graph is kept acyclic by the consistency checks
//! in [crate::relation::engine], but diamonds are legal, so traversal keeps
//! a visited set to avoid revisiting shared subgraphs.

use std::collections::{HashSet, VecDeque};

use rusqlite::Connection;

use crate::{
    Error,
    relation::db::{get_direct_subtags, get_direct_supertags},
    tag::{Tag, TagId},
};

/// Whether `supertag` includes `subtag`, directly or transitively.
///
/// Always false when both IDs are equal: no tag includes itself.
pub fn includes(supertag_id: TagId, subtag_id: TagId, connection: &Connection) -> Result<bool, Error> {
    if supertag_id == subtag_id {
        return Ok(false);
    }

    let mut visited = HashSet::from([supertag_id]);
    let mut queue = VecDeque::from([supertag_id]);

    while let Some(current) = queue.pop_front() {
        for tag in get_direct_subtags(current, connection)? {
            if tag.id == subtag_id {
                return Ok(true);
            }

            if visited.insert(tag.id) {
                queue.push_back(tag.id);
            }
        }
    }

    Ok(false)
}

/// Get the set of tags the given tag includes, directly or transitively.
///
/// The tag itself is not part of the result. Ordering is unspecified.
pub fn get_all_subtags(tag_id: TagId, connection: &Connection) -> Result<HashSet<Tag>, Error> {
    collect_reachable(tag_id, connection, get_direct_subtags)
}

/// Get the set of tags that include the given tag, directly or transitively.
///
/// The tag itself is not part of the result. Ordering is unspecified.
pub fn get_all_supertags(tag_id: TagId, connection: &Connection) -> Result<HashSet<Tag>, Error> {
    collect_reachable(tag_id, connection, get_direct_supertags)
}

/// Get the tag's *indirect* subtags: subtags of its direct subtags, with the
/// direct subtags themselves removed.
pub fn get_indirect_subtags(tag_id: TagId, connection: &Connection) -> Result<HashSet<Tag>, Error> {
    let mut all_subtags = get_all_subtags(tag_id, connection)?;

    for direct_subtag in get_direct_subtags(tag_id, connection)? {
        all_subtags.remove(&direct_subtag);
    }

    Ok(all_subtags)
}

/// Get the tag's *indirect* supertags: supertags of its direct supertags,
/// with the direct supertags themselves removed.
pub fn get_indirect_supertags(
    tag_id: TagId,
    connection: &Connection,
) -> Result<HashSet<Tag>, Error> {
    let mut all_supertags = get_all_supertags(tag_id, connection)?;

    for direct_supertag in get_direct_supertags(tag_id, connection)? {
        all_supertags.remove(&direct_supertag);
    }

    Ok(all_supertags)
}

fn collect_reachable(
    tag_id: TagId,
    connection: &Connection,
    neighbours: fn(TagId, &Connection) -> Result<Vec<Tag>, Error>,
) -> Result<HashSet<Tag>, Error> {
    let mut reached = HashSet::new();
    let mut visited = HashSet::from([tag_id]);
    let mut queue = VecDeque::from([tag_id]);

    while let Some(current) = queue.pop_front() {
        for tag in neighbours(current, connection)? {
            if visited.insert(tag.id) {
                queue.push_back(tag.id);
                reached.insert(tag);
            }
        }
    }

    Ok(reached)
}
