//! Copy-on-write guarantees of the list builders
//!
//! Deriving any number of builders from one parent must leave the parent
//! observably unchanged, and siblings must not share state.

use proptest::prelude::*;
use strata_structure::{
    DocumentListBuilder, DocumentTypeListBuilder, SerializeOptions, SortOrderingItem,
};
use strata_test_utils::test_context;

#[test]
fn siblings_derived_from_one_parent_are_independent() {
    let parent = DocumentListBuilder::new(test_context()).id("all");

    let movies = parent.filter(r#"_type == "movie""#).title("Movies");
    let books = parent.filter(r#"_type == "book""#).title("Books");

    assert_eq!(parent.get_filter(), None);
    assert_eq!(movies.get_schema_type(), Some("movie"));
    assert_eq!(books.get_schema_type(), Some("book"));
    assert_eq!(movies.get_title(), Some("Movies"));
    assert_eq!(books.get_title(), Some("Books"));
}

#[test]
fn serialization_does_not_change_the_builder() {
    let builder = DocumentListBuilder::new(test_context())
        .id("movies")
        .filter(r#"_type == "movie""#);

    let first = builder.serialize(&SerializeOptions::at_root()).unwrap();
    let second = builder.serialize(&SerializeOptions::at_root()).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.options.filter, second.options.filter);
    assert_eq!(builder.get_filter(), Some(r#"_type == "movie""#));
}

#[test]
fn type_list_child_override_leaves_parent_intact() {
    let parent = DocumentTypeListBuilder::documents_of_type(test_context(), "movie");
    let _overridden = parent.child(
        strata_structure::DocumentBuilder::new()
            .id("custom")
            .document_id("doc-1"),
    );

    let list = parent.serialize(&SerializeOptions::at_root()).unwrap();
    assert!(list.can_handle_intent.is_some());
}

proptest! {
    #[test]
    fn any_setter_chain_leaves_parent_unchanged(
        id in "[a-z]{1,12}",
        title in "[A-Za-z ]{1,20}",
        api_version in "20[0-9]{2}-[0-1][0-9]-[0-3][0-9]",
        field in "[a-z]{1,10}",
    ) {
        let parent = DocumentListBuilder::new(test_context()).id(&id);

        let derived = parent
            .title(&title)
            .api_version(&api_version)
            .default_ordering(vec![SortOrderingItem::asc(&field)])
            .unwrap();

        prop_assert_eq!(parent.get_id(), Some(id.as_str()));
        prop_assert_eq!(parent.get_title(), None);
        prop_assert_eq!(parent.get_api_version(), None);
        prop_assert_eq!(parent.get_default_ordering(), None);

        prop_assert_eq!(derived.get_title(), Some(title.as_str()));
        prop_assert_eq!(derived.get_api_version(), Some(api_version.as_str()));
        prop_assert_eq!(
            derived.get_default_ordering(),
            Some(&[SortOrderingItem::asc(&field)][..])
        );
    }
}
