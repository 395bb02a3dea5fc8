//! Consistency-checked mutations of tag set memberships.
//!
//! The only public write path for memberships. Additions are closed under
//! supertags and may evict members that the incoming tags exclude; removals
//! are deliberately not closed under subtags, so dropping a broad category
//! keeps the specific tags in place.

use rusqlite::Connection;

use crate::{
    Error,
    relation::{
        db::are_excluding, engine::contains_mutually_exclusive_pair,
        reachability::get_all_supertags,
    },
    tag::{TagRef, resolve_tags},
    tagset::{
        TagSetId,
        db::{delete_member, get_members, insert_member},
    },
};

/// Add the referenced tags, and all of their supertags, to the tag set.
///
/// Members that are excluded by any of the incoming tags (supertags
/// included) are removed in the same transaction, so the set never holds a
/// mutually excluding pair. Adding tags that are already members is a no-op,
/// as is adding an empty list of references.
///
/// Unknown names are created when `create_nonexisting` is true; unknown IDs
/// never are.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NoSuchTag] if a reference does not resolve and cannot be
///   created,
/// - [Error::MutualExclusion] if two of the referenced tags exclude each
///   other,
/// - [Error::MutuallyExclusiveSupertags] if the referenced tags plus their
///   supertag closure contain a mutually excluding pair.
///
/// On error the tag set is left unchanged.
pub fn add_tags_to_tagset(
    tagset_id: TagSetId,
    references: &[TagRef],
    create_nonexisting: bool,
    connection: &Connection,
) -> Result<(), Error> {
    if references.is_empty() {
        return Ok(());
    }

    let transaction = connection.unchecked_transaction()?;

    let tags = resolve_tags(references, create_nonexisting, &transaction)?;

    if contains_mutually_exclusive_pair(&tags, &transaction)? {
        return Err(Error::MutualExclusion);
    }

    let mut combined = tags.clone();
    for tag in &tags {
        combined.extend(get_all_supertags(tag.id, &transaction)?);
    }

    if contains_mutually_exclusive_pair(&combined, &transaction)? {
        return Err(Error::MutuallyExclusiveSupertags);
    }

    for present_tag in get_members(tagset_id, &transaction)? {
        for new_tag in &combined {
            if are_excluding(new_tag.id, present_tag.id, &transaction)? {
                delete_member(tagset_id, present_tag.id, &transaction)?;
                break;
            }
        }
    }

    for tag in &combined {
        insert_member(tagset_id, tag.id, &transaction)?;
    }

    transaction.commit()?;

    Ok(())
}

/// Remove the referenced tags from the tag set.
///
/// All references are resolved before anything is removed, so a bad
/// reference cannot leave a partial removal behind. Removing a tag that is
/// not a member is a silent no-op, as is removing an empty list. Supertags
/// that were added by closure stay in the set.
///
/// # Errors
///
/// This function will return an [Error::NoSuchTag] if any reference does not
/// resolve; in that case the tag set is left unchanged.
pub fn remove_tags_from_tagset(
    tagset_id: TagSetId,
    references: &[TagRef],
    connection: &Connection,
) -> Result<(), Error> {
    if references.is_empty() {
        return Ok(());
    }

    let transaction = connection.unchecked_transaction()?;

    let tags = resolve_tags(references, false, &transaction)?;

    for tag in &tags {
        delete_member(tagset_id, tag.id, &transaction)?;
    }

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod add_tags_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        relation::engine::{exclude_tag, include_tag},
        tag::{Tag, TagColor, TagName, TagRef, create_tag, get_tag_by_name},
        tagset::db::{contains_tag, count_members, create_tagset, get_members, insert_member},
    };

    use super::{add_tags_to_tagset, remove_tags_from_tagset};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not create database tables");
        connection
    }

    fn create_test_tag(name: &str, connection: &Connection) -> Tag {
        create_tag(
            TagName::new_unchecked(name),
            TagColor::default(),
            connection,
        )
        .expect("Could not create test tag")
    }

    fn member_set(tagset_id: crate::tagset::TagSetId, connection: &Connection) -> HashSet<Tag> {
        get_members(tagset_id, connection)
            .expect("Could not get members")
            .into_iter()
            .collect()
    }

    #[test]
    fn add_inserts_the_tag() {
        let connection = get_test_db_connection();
        let tag = create_test_tag("Programming", &connection);
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&tag)], false, &connection)
            .expect("Could not add tag");

        assert_eq!(contains_tag(tagset.id, tag.id, &connection), Ok(true));
    }

    #[test]
    fn add_closes_over_supertags() {
        let connection = get_test_db_connection();
        let programming = create_test_tag("Programming", &connection);
        let python = create_test_tag("Python", &connection);
        let django = create_test_tag("Django", &connection);
        include_tag(
            &TagRef::from(&programming),
            &TagRef::from(&python),
            false,
            &connection,
        )
        .unwrap();
        include_tag(
            &TagRef::from(&python),
            &TagRef::from(&django),
            false,
            &connection,
        )
        .unwrap();
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&django)], false, &connection)
            .expect("Could not add tag");

        assert_eq!(
            member_set(tagset.id, &connection),
            HashSet::from([django, python, programming])
        );
    }

    #[test]
    fn add_evicts_members_excluded_by_new_tag() {
        let connection = get_test_db_connection();
        let programming = create_test_tag("Programming", &connection);
        let knowledge_management = create_test_tag("Knowledge Management", &connection);
        exclude_tag(
            &TagRef::from(&programming),
            &TagRef::from(&knowledge_management),
            &connection,
        )
        .unwrap();
        let tagset = create_tagset(&connection).unwrap();
        insert_member(tagset.id, knowledge_management.id, &connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&programming)], false, &connection)
            .expect("Could not add tag");

        assert_eq!(
            member_set(tagset.id, &connection),
            HashSet::from([programming])
        );
    }

    #[test]
    fn add_evicts_members_excluded_by_a_supertag_of_the_new_tag() {
        let connection = get_test_db_connection();
        let science = create_test_tag("Science", &connection);
        let physics = create_test_tag("Physics", &connection);
        let mysticism = create_test_tag("Mysticism", &connection);
        include_tag(
            &TagRef::from(&science),
            &TagRef::from(&physics),
            false,
            &connection,
        )
        .unwrap();
        exclude_tag(&TagRef::from(&science), &TagRef::from(&mysticism), &connection).unwrap();
        let tagset = create_tagset(&connection).unwrap();
        insert_member(tagset.id, mysticism.id, &connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&physics)], false, &connection)
            .expect("Could not add tag");

        assert_eq!(
            member_set(tagset.id, &connection),
            HashSet::from([physics, science])
        );
    }

    #[test]
    fn add_rejects_mutually_excluding_batch() {
        let connection = get_test_db_connection();
        let fire = create_test_tag("Fire", &connection);
        let water = create_test_tag("Water", &connection);
        exclude_tag(&TagRef::from(&fire), &TagRef::from(&water), &connection).unwrap();
        let tagset = create_tagset(&connection).unwrap();

        let result = add_tags_to_tagset(
            tagset.id,
            &[TagRef::from(&fire), TagRef::from(&water)],
            false,
            &connection,
        );

        assert_eq!(result, Err(Error::MutualExclusion));
        assert_eq!(count_members(tagset.id, &connection), Ok(0));
    }

    #[test]
    fn add_rejects_batch_with_mutually_exclusive_supertags() {
        let connection = get_test_db_connection();
        let fire = create_test_tag("Fire", &connection);
        let water = create_test_tag("Water", &connection);
        let flame = create_test_tag("Flame", &connection);
        let wave = create_test_tag("Wave", &connection);
        exclude_tag(&TagRef::from(&fire), &TagRef::from(&water), &connection).unwrap();
        include_tag(&TagRef::from(&fire), &TagRef::from(&flame), false, &connection).unwrap();
        include_tag(&TagRef::from(&water), &TagRef::from(&wave), false, &connection).unwrap();
        let tagset = create_tagset(&connection).unwrap();

        let result = add_tags_to_tagset(
            tagset.id,
            &[TagRef::from(&flame), TagRef::from(&wave)],
            false,
            &connection,
        );

        assert_eq!(result, Err(Error::MutuallyExclusiveSupertags));
        assert_eq!(count_members(tagset.id, &connection), Ok(0));
    }

    #[test]
    fn add_with_mixed_references_and_missing_name_changes_nothing() {
        let connection = get_test_db_connection();
        let by_handle = create_test_tag("ByHandle", &connection);
        let by_id = create_test_tag("ById", &connection);
        create_test_tag("existing-name", &connection);
        let tagset = create_tagset(&connection).unwrap();

        let result = add_tags_to_tagset(
            tagset.id,
            &[
                TagRef::from(&by_handle),
                TagRef::from(by_id.id),
                TagRef::from("existing-name"),
                TagRef::from("no-such-name"),
            ],
            false,
            &connection,
        );

        assert_eq!(result, Err(Error::NoSuchTag));
        assert_eq!(count_members(tagset.id, &connection), Ok(0));
    }

    #[test]
    fn add_creates_unknown_names_on_request() {
        let connection = get_test_db_connection();
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from("Fresh")], true, &connection)
            .expect("Could not add new tag");

        let tag = get_tag_by_name(&TagName::new_unchecked("Fresh"), &connection)
            .expect("Tag was not created");
        assert_eq!(contains_tag(tagset.id, tag.id, &connection), Ok(true));
    }

    #[test]
    fn add_is_idempotent() {
        let connection = get_test_db_connection();
        let tag = create_test_tag("Programming", &connection);
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&tag)], false, &connection).unwrap();
        add_tags_to_tagset(tagset.id, &[TagRef::from(&tag)], false, &connection).unwrap();

        assert_eq!(count_members(tagset.id, &connection), Ok(1));
    }

    #[test]
    fn add_with_no_references_is_a_noop() {
        let connection = get_test_db_connection();
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[], false, &connection).expect("Empty add should succeed");

        assert_eq!(count_members(tagset.id, &connection), Ok(0));
    }

    #[test]
    fn members_supertag_closure_holds_after_every_add() {
        let connection = get_test_db_connection();
        let programming = create_test_tag("Programming", &connection);
        let python = create_test_tag("Python", &connection);
        let django = create_test_tag("Django", &connection);
        let web_development = create_test_tag("Web Development", &connection);
        include_tag(
            &TagRef::from(&programming),
            &TagRef::from(&python),
            false,
            &connection,
        )
        .unwrap();
        include_tag(
            &TagRef::from(&python),
            &TagRef::from(&django),
            false,
            &connection,
        )
        .unwrap();
        include_tag(
            &TagRef::from(&web_development),
            &TagRef::from(&django),
            false,
            &connection,
        )
        .unwrap();
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&django)], false, &connection).unwrap();

        let members = member_set(tagset.id, &connection);
        for member in &members {
            for supertag in
                crate::relation::reachability::get_all_supertags(member.id, &connection).unwrap()
            {
                assert!(
                    members.contains(&supertag),
                    "member {member} is missing supertag {supertag}"
                );
            }
        }
    }

    #[test]
    fn remove_only_removes_the_given_tags() {
        let connection = get_test_db_connection();
        let programming = create_test_tag("Programming", &connection);
        let python = create_test_tag("Python", &connection);
        include_tag(
            &TagRef::from(&programming),
            &TagRef::from(&python),
            false,
            &connection,
        )
        .unwrap();
        let tagset = create_tagset(&connection).unwrap();
        add_tags_to_tagset(tagset.id, &[TagRef::from(&python)], false, &connection).unwrap();

        remove_tags_from_tagset(tagset.id, &[TagRef::from(&python)], &connection)
            .expect("Could not remove tag");

        // The supertag added by closure stays.
        assert_eq!(
            member_set(tagset.id, &connection),
            HashSet::from([programming])
        );
    }

    #[test]
    fn remove_of_non_member_is_a_noop() {
        let connection = get_test_db_connection();
        let member = create_test_tag("Member", &connection);
        let outsider = create_test_tag("Outsider", &connection);
        let tagset = create_tagset(&connection).unwrap();
        add_tags_to_tagset(tagset.id, &[TagRef::from(&member)], false, &connection).unwrap();

        let result = remove_tags_from_tagset(tagset.id, &[TagRef::from(&outsider)], &connection);

        assert_eq!(result, Ok(()));
        assert_eq!(member_set(tagset.id, &connection), HashSet::from([member]));
    }

    #[test]
    fn remove_with_unresolvable_name_removes_nothing() {
        let connection = get_test_db_connection();
        let member = create_test_tag("Member", &connection);
        let tagset = create_tagset(&connection).unwrap();
        add_tags_to_tagset(tagset.id, &[TagRef::from(&member)], false, &connection).unwrap();

        let result = remove_tags_from_tagset(
            tagset.id,
            &[TagRef::from(&member), TagRef::from("no-such-name")],
            &connection,
        );

        assert_eq!(result, Err(Error::NoSuchTag));
        assert_eq!(member_set(tagset.id, &connection), HashSet::from([member]));
    }

    #[test]
    fn remove_with_no_references_is_a_noop() {
        let connection = get_test_db_connection();
        let tagset = create_tagset(&connection).unwrap();

        let result = remove_tags_from_tagset(tagset.id, &[], &connection);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn add_then_remove_leaves_the_tag_absent() {
        let connection = get_test_db_connection();
        let tag = create_test_tag("Programming", &connection);
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&tag)], false, &connection).unwrap();
        remove_tags_from_tagset(tagset.id, &[TagRef::from(&tag)], &connection).unwrap();

        assert_eq!(contains_tag(tagset.id, tag.id, &connection), Ok(false));
    }

    #[test]
    fn no_two_members_exclude_each_other_after_adds() {
        let connection = get_test_db_connection();
        let fire = create_test_tag("Fire", &connection);
        let water = create_test_tag("Water", &connection);
        let earth = create_test_tag("Earth", &connection);
        exclude_tag(&TagRef::from(&fire), &TagRef::from(&water), &connection).unwrap();
        exclude_tag(&TagRef::from(&water), &TagRef::from(&earth), &connection).unwrap();
        let tagset = create_tagset(&connection).unwrap();

        add_tags_to_tagset(tagset.id, &[TagRef::from(&fire)], false, &connection).unwrap();
        add_tags_to_tagset(tagset.id, &[TagRef::from(&water)], false, &connection).unwrap();
        add_tags_to_tagset(tagset.id, &[TagRef::from(&earth)], false, &connection).unwrap();

        let members = member_set(tagset.id, &connection);
        for member in &members {
            for other in &members {
                if member != other {
                    assert_eq!(
                        crate::relation::db::are_excluding(member.id, other.id, &connection),
                        Ok(false),
                        "members {member} and {other} exclude each other"
                    );
                }
            }
        }
        // Each add evicted the previous member.
        assert_eq!(members, HashSet::from([earth]));
    }
}
