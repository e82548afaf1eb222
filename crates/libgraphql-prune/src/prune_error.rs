use crate::ast;
use crate::QueryNodeKind;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a prune call.
///
/// Cache state never produces an error: dangling fragment spreads, empty
/// lists and fully-cached subtrees are all handled by removal. Every variant
/// here points at caller misuse, so none of them are worth retrying with the
/// same inputs.
#[derive(Clone, Debug, Error)]
pub enum PruneError {
    #[error(
        "Fragments can only be resolved against a `Document` root, but the \
        pruning root is a `{root_kind:?}`"
    )]
    MalformedRoot {
        root_kind: QueryNodeKind,
    },

    #[error("Error parsing executable document: {0}")]
    Parse(Arc<ast::operation::ParseError>),

    #[error(
        "The `{field_name}` field references the variable `${variable_name}`, \
        but no (non-null) value is bound to it"
    )]
    UnboundVariable {
        field_name: String,
        variable_name: String,
    },
}
