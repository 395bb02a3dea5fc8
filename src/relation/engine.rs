//! Consistency-checked mutations of the tag relations.
//!
//! These functions are the only public write path for inclusion and
//! exclusion edges. Each one runs as a single check-then-apply transaction:
//! every invariant check reads under the same transaction as the subsequent
//! writes, and a failed precondition aborts the call with no side effects.

use std::collections::HashSet;

use rusqlite::Connection;

use crate::{
    Error,
    relation::{
        db::{
            add_exclusion_edge, add_inclusion_edge, are_excluding, get_direct_exclusions,
            remove_exclusion_edge, remove_inclusion_edge,
        },
        reachability::{get_all_subtags, get_all_supertags, includes},
    },
    tag::{Tag, TagId, TagRef, resolve_tag},
    tagset::{
        TagSetId,
        db::{get_members, get_tagsets_containing, insert_member, share_a_tagset},
    },
};

/// Make `supertag` include `subtag`.
///
/// A tag that includes another tag will always be present in any tag set
/// that the other tag is added to. Asking a tag to include itself is a
/// silent no-op, and so is re-adding an existing inclusion.
///
/// If `update_tagsets` is true, the new supertag and all of its own
/// supertags are also added to every tag set that already contains the
/// subtag or any of the subtag's transitive subtags, re-establishing the
/// supertag-closure property in those sets.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NoSuchTag] if either reference does not resolve,
/// - [Error::SimultaneousInclusionExclusion] if the two tags exclude each
///   other,
/// - [Error::CircularInclusion] if the subtag already includes the supertag,
/// - [Error::MutuallyExclusiveSupertags] if the combined supertag closures
///   of the two tags contain a mutually excluding pair,
/// - [Error::SupertagAdditionWouldRemoveExcluded] if `update_tagsets` is
///   true and updating an affected tag set would silently remove a member
///   that the new supertags exclude.
pub fn include_tag(
    supertag: &TagRef,
    subtag: &TagRef,
    update_tagsets: bool,
    connection: &Connection,
) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    let supertag = resolve_tag(supertag, false, &transaction)?;
    let subtag = resolve_tag(subtag, false, &transaction)?;

    if supertag.id == subtag.id {
        return Ok(());
    }

    if are_excluding(supertag.id, subtag.id, &transaction)? {
        return Err(Error::SimultaneousInclusionExclusion);
    }

    if includes(subtag.id, supertag.id, &transaction)? {
        return Err(Error::CircularInclusion);
    }

    let mut combined = get_all_supertags(supertag.id, &transaction)?;
    combined.extend(get_all_supertags(subtag.id, &transaction)?);
    combined.insert(supertag.clone());
    combined.insert(subtag.clone());

    if contains_mutually_exclusive_pair(&combined, &transaction)? {
        return Err(Error::MutuallyExclusiveSupertags);
    }

    if update_tagsets {
        let mut tags_to_add = get_all_supertags(supertag.id, &transaction)?;
        tags_to_add.insert(supertag.clone());

        let mut excluded_by_tags_to_add = HashSet::new();
        for tag in &tags_to_add {
            for excluded_tag in get_direct_exclusions(tag.id, &transaction)? {
                excluded_by_tags_to_add.insert(excluded_tag.id);
            }
        }

        // Updating a tag set must never silently evict a member, so every
        // affected set is checked before any of them is touched.
        let affected_tagsets = tagsets_containing_subtree(&subtag, &transaction)?;

        for tagset_id in &affected_tagsets {
            for member in get_members(*tagset_id, &transaction)? {
                if excluded_by_tags_to_add.contains(&member.id) {
                    return Err(Error::SupertagAdditionWouldRemoveExcluded);
                }
            }
        }

        add_inclusion_edge(supertag.id, subtag.id, &transaction)?;

        for tagset_id in affected_tagsets {
            for tag in &tags_to_add {
                insert_member(tagset_id, tag.id, &transaction)?;
            }
        }
    } else {
        add_inclusion_edge(supertag.id, subtag.id, &transaction)?;
    }

    transaction.commit()?;

    Ok(())
}

/// Stop `supertag` including `subtag`. Removing an absent inclusion is a
/// no-op.
///
/// Tag sets are not updated: members that were added by the inclusion stay
/// where they are.
///
/// # Errors
///
/// This function will return an [Error::NoSuchTag] if either reference does
/// not resolve.
pub fn uninclude_tag(
    supertag: &TagRef,
    subtag: &TagRef,
    connection: &Connection,
) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    let supertag = resolve_tag(supertag, false, &transaction)?;
    let subtag = resolve_tag(subtag, false, &transaction)?;

    remove_inclusion_edge(supertag.id, subtag.id, &transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Make two tags exclude each other.
///
/// Tags that exclude each other will never be present in the same tag set.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NoSuchTag] if either reference does not resolve,
/// - [Error::SelfExclusion] if both references resolve to the same tag,
/// - [Error::SimultaneousInclusionExclusion] if either tag includes the
///   other, even indirectly,
/// - [Error::CommonSubtagExclusion] if the tags share a transitive subtag,
/// - [Error::MutualExclusion] if some tag set currently contains both tags.
pub fn exclude_tag(a: &TagRef, b: &TagRef, connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    let a = resolve_tag(a, false, &transaction)?;
    let b = resolve_tag(b, false, &transaction)?;

    if a.id == b.id {
        return Err(Error::SelfExclusion);
    }

    if includes(a.id, b.id, &transaction)? || includes(b.id, a.id, &transaction)? {
        return Err(Error::SimultaneousInclusionExclusion);
    }

    let subtags_of_a = get_all_subtags(a.id, &transaction)?;
    let subtags_of_b = get_all_subtags(b.id, &transaction)?;

    if !subtags_of_a.is_disjoint(&subtags_of_b) {
        return Err(Error::CommonSubtagExclusion);
    }

    if share_a_tagset(a.id, b.id, &transaction)? {
        return Err(Error::MutualExclusion);
    }

    add_exclusion_edge(a.id, b.id, &transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Stop two tags excluding each other. Removing an absent exclusion is a
/// no-op.
///
/// # Errors
///
/// This function will return an [Error::NoSuchTag] if either reference does
/// not resolve.
pub fn unexclude_tag(a: &TagRef, b: &TagRef, connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    let a = resolve_tag(a, false, &transaction)?;
    let b = resolve_tag(b, false, &transaction)?;

    remove_exclusion_edge(a.id, b.id, &transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Whether any two distinct tags in the set exclude each other.
pub(crate) fn contains_mutually_exclusive_pair(
    tags: &HashSet<Tag>,
    connection: &Connection,
) -> Result<bool, Error> {
    let ids: HashSet<TagId> = tags.iter().map(|tag| tag.id).collect();

    for tag in tags {
        for excluded_tag in get_direct_exclusions(tag.id, connection)? {
            if ids.contains(&excluded_tag.id) {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// The IDs of every tag set containing the given tag or any of its
/// transitive subtags.
fn tagsets_containing_subtree(
    tag: &Tag,
    connection: &Connection,
) -> Result<HashSet<TagSetId>, Error> {
    let mut tagsets: HashSet<TagSetId> =
        get_tagsets_containing(tag.id, connection)?.into_iter().collect();

    for subtag in get_all_subtags(tag.id, connection)? {
        tagsets.extend(get_tagsets_containing(subtag.id, connection)?);
    }

    Ok(tagsets)
}
