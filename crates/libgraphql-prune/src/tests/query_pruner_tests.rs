use crate::prune_document;
use crate::tests::utils::assert_residual;
use crate::tests::utils::extract_selection_set;
use crate::tests::utils::normalize;
use crate::tests::utils::parse_doc;
use crate::tests::utils::prune;
use crate::tests::utils::prune_with_variables;
use crate::PruneError;
use crate::PruneOutcome;
use crate::QueryNode;
use crate::QueryPruner;
use crate::VariableBindings;
use serde_json::json;

// =============================================================================
// Whole-Document Outcomes
// =============================================================================

#[test]
fn fully_cached_query_is_fully_satisfied() {
    let outcome = prune(
        "query Me { me { id name } }",
        &json!({ "me": { "id": "1", "name": "Ada" } }),
    );
    assert_eq!(outcome, PruneOutcome::FullySatisfied);
}

#[test]
fn nothing_cached_leaves_the_document_unchanged() {
    let doc = parse_doc("query Feed($n: Int) { feed(first: $n) { id title } }");
    let variables: VariableBindings = [("n", json!(10))].into_iter().collect();

    let outcome = prune_document(doc.clone(), &json!({}), variables).unwrap();
    assert_eq!(outcome, PruneOutcome::Residual(QueryNode::Document(doc)));
}

#[test]
fn partially_cached_nested_query() {
    assert_residual(
        prune(
            "{ viewer { id settings { theme locale } posts { title } } }",
            &json!({
                "viewer": {
                    "id": "1",
                    "settings": { "theme": "dark" },
                },
            }),
        ),
        "{ viewer { settings { locale } posts { title } } }",
    );
}

#[test]
fn leaf_cached_as_null_is_not_refetched() {
    assert_residual(
        prune("{ nickname email }", &json!({ "nickname": null })),
        "{ email }",
    );
}

#[test]
fn object_cached_as_null_is_not_refetched() {
    assert_residual(
        prune(
            "{ bestFriend { id } count }",
            &json!({ "bestFriend": null }),
        ),
        "{ count }",
    );
}

#[test]
fn inline_fragments_are_pruned_in_place() {
    assert_residual(
        prune(
            "{ node { ... on User { id name } ... on Bot { id } } }",
            &json!({ "node": { "id": "1" } }),
        ),
        "{ node { ... on User { name } } }",
    );
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn list_field_is_pruned_to_what_every_element_has() {
    assert_residual(
        prune(
            "{ users { a b } }",
            &json!({ "users": [{ "a": 1, "b": 2 }, { "a": 1 }] }),
        ),
        "{ users { b } }",
    );
}

#[test]
fn fully_cached_list_is_fully_satisfied() {
    let outcome = prune(
        "{ users { id } }",
        &json!({ "users": [{ "id": "1" }, { "id": "2" }] }),
    );
    assert!(outcome.is_fully_satisfied());
}

// =============================================================================
// Fragments
// =============================================================================

#[test]
fn fragment_satisfied_everywhere_is_removed_with_its_spreads() {
    assert_residual(
        prune(
            "{ user { ...Names email } } fragment Names on User { first last }",
            &json!({ "user": { "first": "A", "last": "L" } }),
        ),
        "{ user { email } }",
    );
}

#[test]
fn fragment_shared_between_spreads_keeps_what_any_site_needs() {
    assert_residual(
        prune(
            "{ x { ...F } y { ...F } } fragment F on T { a b }",
            &json!({ "x": { "a": 1, "b": 1 }, "y": { "a": 1 } }),
        ),
        "{ x { ...F } y { ...F } } fragment F on T { b }",
    );
}

#[test]
fn fragment_spread_under_an_uncached_field_is_kept_whole() {
    let source = "{ me { ...U } friend { ...U } } fragment U on User { name }";
    assert_residual(
        prune(source, &json!({ "me": { "name": "Ada" } })),
        source,
    );
}

#[test]
fn fragment_spread_from_a_kept_whole_fragment_is_kept_whole() {
    let source = "{ me { ...U } friend { ...V } } \
        fragment V on User { ...U } \
        fragment U on User { name }";
    assert_residual(
        prune(source, &json!({ "me": { "name": "Ada" } })),
        source,
    );
}

#[test]
fn fragment_spread_only_in_a_pruned_field_is_removed() {
    assert_residual(
        prune(
            "{ a b { ...F } } fragment F on T { c }",
            &json!({ "b": null }),
        ),
        "{ a }",
    );
}

#[test]
fn dangling_spread_is_removed() {
    assert_residual(
        prune("{ a ...Missing }", &json!({})),
        "{ a }",
    );
}

// =============================================================================
// Variables
// =============================================================================

#[test]
fn variable_arguments_select_the_cached_entry() {
    let variables: VariableBindings = [("id", json!(7))].into_iter().collect();
    assert_residual(
        prune_with_variables(
            "query ($id: ID) { user(id: $id) { name } other }",
            &json!({ r#"user|{"id":"7"}"#: { "name": "Ada" } }),
            variables,
        ),
        "query ($id: ID) { other }",
    );
}

#[test]
fn different_argument_values_miss_the_cache() {
    let variables: VariableBindings = [("id", json!(8))].into_iter().collect();
    let source = "query ($id: ID) { user(id: $id) { name } }";
    assert_residual(
        prune_with_variables(
            source,
            &json!({ r#"user|{"id":"7"}"#: { "name": "Ada" } }),
            variables,
        ),
        source,
    );
}

#[test]
fn unbound_variable_is_an_error() {
    let result = QueryPruner::new(&json!({}))
        .prune(parse_doc("query ($id: ID) { user(id: $id) { name } }"));

    match result {
        Err(PruneError::UnboundVariable { field_name, variable_name }) => {
            assert_eq!(field_name, "user");
            assert_eq!(variable_name, "id");
        },
        other => panic!("Expected UnboundVariable, got: {other:?}"),
    }
}

// =============================================================================
// Non-Query Operations
// =============================================================================

#[test]
fn mutations_pass_through_untouched() {
    let doc = parse_doc(
        "mutation Rename { rename(name: \"x\") { id name } } { id }",
    );
    let outcome = prune_document(
        doc.clone(),
        &json!({ "id": "1", "rename|{\"name\":\"x\"}": { "id": "1", "name": "x" } }),
        VariableBindings::new(),
    ).unwrap();

    let residual = outcome.into_document().unwrap();
    assert_eq!(residual.definitions, vec![doc.definitions[0].clone()]);
}

#[test]
fn fragment_shared_with_a_mutation_is_kept_whole() {
    let source =
        "{ me { ...U } } mutation M { update { ...U } } fragment U on User { name }";
    assert_residual(
        prune(source, &json!({ "me": { "name": "Ada" } })),
        source,
    );
}

#[test]
fn fragment_shared_with_a_subscription_is_kept_whole() {
    let source = "{ me { ...U } } subscription { changed { ...U } } \
        fragment U on User { name id }";
    assert_residual(
        prune(source, &json!({ "me": { "id": "1" } })),
        source,
    );
}

#[test]
fn subscription_alone_is_never_fully_satisfied() {
    let source = "subscription { ticks { at } }";
    assert_residual(
        prune(source, &json!({ "ticks": [] })),
        source,
    );
}

// =============================================================================
// Roots and Parsing
// =============================================================================

#[test]
fn selection_set_root_is_pruned_as_a_query_body() {
    let outcome = QueryPruner::new(&json!({ "a": 1 }))
        .prune(extract_selection_set("{ a b }"))
        .unwrap();

    match outcome {
        PruneOutcome::Residual(QueryNode::SelectionSet(selection_set)) => {
            let names: Vec<_> =
                selection_set.items.iter()
                    .map(|selection| match selection {
                        crate::ast::operation::Selection::Field(field) =>
                            field.name.as_str(),
                        other => panic!("Expected a field, got: {other:?}"),
                    })
                    .collect();
            assert_eq!(names, vec!["b"]);
        },
        other => panic!("Expected a residual selection set, got: {other:?}"),
    }
}

#[test]
fn fully_cached_selection_set_root_is_fully_satisfied() {
    let outcome = QueryPruner::new(&json!({ "a": 1 }))
        .prune(extract_selection_set("{ a }"))
        .unwrap();
    assert_eq!(outcome, PruneOutcome::FullySatisfied);
}

#[test]
fn prune_str_parses_and_prunes() {
    let outcome = QueryPruner::new(&json!({ "a": 1 }))
        .prune_str("{ a b }")
        .unwrap();
    assert_eq!(
        outcome.into_document().map(|doc| doc.to_string()),
        Some(normalize("{ b }")),
    );
}

#[test]
fn prune_str_reports_parse_errors() {
    let result = QueryPruner::new(&json!({})).prune_str("{ a ");
    assert!(matches!(result, Err(PruneError::Parse(_))));
}
