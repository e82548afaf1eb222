//! Helpers shared by the pruning tests.

use crate::ast;
use crate::CacheValue;
use crate::PruneOutcome;
use crate::QueryNode;
use crate::QueryPruner;
use crate::VariableBindings;

pub(super) fn parse_doc(source: &str) -> ast::operation::Document {
    ast::operation::parse(source).unwrap()
}

/// Parses and re-prints `source` so it can be compared with printed pruning
/// output regardless of the original formatting.
pub(super) fn normalize(source: &str) -> String {
    parse_doc(source).to_string()
}

pub(super) fn prune(source: &str, cache: &CacheValue) -> PruneOutcome {
    QueryPruner::new(cache)
        .prune(parse_doc(source))
        .unwrap()
}

pub(super) fn prune_with_variables(
    source: &str,
    cache: &CacheValue,
    variables: VariableBindings,
) -> PruneOutcome {
    QueryPruner::new(cache)
        .with_variables(variables)
        .prune(parse_doc(source))
        .unwrap()
}

/// Asserts that `outcome` holds a residual document printing the same as
/// `expected`.
#[track_caller]
pub(super) fn assert_residual(outcome: PruneOutcome, expected: &str) {
    match outcome {
        PruneOutcome::Residual(QueryNode::Document(doc)) =>
            assert_eq!(doc.to_string(), normalize(expected)),
        other => panic!("Expected a residual document, got: {other:?}"),
    }
}

/// The shorthand selection set of the first definition in `source`.
///
/// # Panics
/// Panics if the first definition is not a shorthand query.
pub(super) fn extract_selection_set(source: &str) -> ast::operation::SelectionSet {
    match parse_doc(source).definitions.into_iter().next() {
        Some(ast::operation::Definition::Operation(
            ast::operation::OperationDefinition::SelectionSet(selection_set),
        )) => selection_set,
        other => panic!("Expected a shorthand query, got: {other:?}"),
    }
}

/// The first field selected by the first definition in `source`.
///
/// # Panics
/// Panics if the first selection is not a field.
pub(super) fn first_field(source: &str) -> ast::operation::Field {
    match extract_selection_set(source).items.into_iter().next() {
        Some(ast::operation::Selection::Field(field)) => field,
        other => panic!("Expected a field, got: {other:?}"),
    }
}
