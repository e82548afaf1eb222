//! Computes the residual part of a GraphQL query that still needs to be
//! fetched, given an in-memory cache snapshot that may already satisfy some
//! (or all) of it.
//!
//! The cache snapshot is a [`CacheValue`] (a `serde_json::Value`) shaped like
//! the query: each object maps [`CacheKey`]s to nested scopes, and list fields
//! hold arrays of element scopes. [`QueryPruner`] walks the query alongside
//! the snapshot, removes what the cache already has, and returns either the
//! residual document or [`PruneOutcome::FullySatisfied`].
//!
//! Only query operations are pruned. Mutations and subscriptions pass through
//! untouched.

pub mod ast;
mod cache_key;
mod cache_scope_stack;
mod cleanup;
mod fragment_liveness;
mod prune_error;
mod prune_middleware;
mod query_node;
mod query_pruner;
mod variable_bindings;
mod verdicts;
mod walker;

pub use cache_key::CacheKey;
pub use cache_scope_stack::CacheLookup;
pub use cache_scope_stack::CacheScopeStack;
pub use cache_scope_stack::CacheValue;
pub use cleanup::collapse_empty;
pub use cleanup::remove_satisfied;
pub use fragment_liveness::remove_dead_fragments;
pub use prune_error::PruneError;
pub use prune_middleware::PruneMiddleware;
pub use prune_middleware::ScopeTraceMiddleware;
pub use query_node::QueryNode;
pub use query_node::QueryNodeKind;
pub use query_pruner::prune_document;
pub use query_pruner::PruneOutcome;
pub use query_pruner::QueryPruner;
pub use variable_bindings::VariableBindings;
pub use verdicts::SelectionSetVerdicts;
pub use verdicts::SelectionVerdict;
pub use verdicts::Verdicts;
pub use walker::walk_against_cache;

#[cfg(test)]
mod tests;
