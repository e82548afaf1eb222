use crate::ast;
use crate::cleanup;
use crate::fragment_liveness;
use crate::walker;
use crate::CacheScopeStack;
use crate::CacheValue;
use crate::PruneError;
use crate::PruneMiddleware;
use crate::QueryNode;
use crate::VariableBindings;
use std::sync::Arc;

type Result<T> = std::result::Result<T, PruneError>;

/// What is left to fetch after pruning a query against a cache snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum PruneOutcome {
    /// The cache satisfies everything; no request is needed.
    FullySatisfied,

    /// The part of the query the cache could not satisfy.
    Residual(QueryNode),
}
impl PruneOutcome {
    /// The residual document, or `None` when fully satisfied (or when the
    /// pruned root was not a document).
    pub fn into_document(self) -> Option<ast::operation::Document> {
        match self {
            Self::FullySatisfied => None,
            Self::Residual(node) => node.into_document(),
        }
    }

    pub fn is_fully_satisfied(&self) -> bool {
        matches!(self, Self::FullySatisfied)
    }
}

/// Prunes queries against a cache snapshot.
///
/// A [`QueryPruner`] runs three passes over the query:
///
/// 1. [`walk_against_cache`](crate::walk_against_cache) decides, selection by
///    selection, what the cache already satisfies.
/// 2. [`remove_satisfied`](crate::remove_satisfied) removes those selections
///    and collapses anything left empty.
/// 3. [`remove_dead_fragments`](crate::remove_dead_fragments) drops dangling
///    spreads and unreachable fragment definitions.
///
/// # Example
///
/// ```
/// use libgraphql_prune::PruneOutcome;
/// use libgraphql_prune::QueryPruner;
///
/// let cache = serde_json::json!({
///     "me": { "id": "1", "name": "Ada" },
/// });
///
/// let outcome = QueryPruner::new(&cache)
///     .prune_str("{ me { id name email } }")
///     .unwrap();
///
/// let residual = outcome.into_document().unwrap();
/// assert_eq!(
///     residual.to_string(),
///     libgraphql_prune::ast::operation::parse("{ me { email } }")
///         .unwrap()
///         .to_string(),
/// );
/// ```
#[derive(Debug)]
pub struct QueryPruner<'cache, 'mw> {
    cache: &'cache CacheValue,
    middleware: Vec<&'mw mut dyn PruneMiddleware>,
    variables: VariableBindings,
}
impl<'cache, 'mw> QueryPruner<'cache, 'mw> {
    pub fn new(cache: &'cache CacheValue) -> Self {
        Self {
            cache,
            middleware: vec![],
            variables: VariableBindings::default(),
        }
    }

    /// Add a [`PruneMiddleware`] after any previously added middleware.
    pub fn with_middleware(mut self, middleware: &'mw mut dyn PruneMiddleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn with_variables(mut self, variables: VariableBindings) -> Self {
        self.variables = variables;
        self
    }

    /// Prunes `root` against the cache snapshot.
    ///
    /// Yields [`PruneOutcome::FullySatisfied`] instead of a document with no
    /// definitions left (or instead of a non-document root that was removed
    /// entirely).
    pub fn prune(self, root: impl Into<QueryNode>) -> Result<PruneOutcome> {
        let mut root = root.into();
        let mut cache_stack = CacheScopeStack::with_root(self.cache);

        let verdicts = walker::walk_against_cache(
            &mut root,
            &mut cache_stack,
            &self.variables,
            self.middleware,
        )?;

        let Some(root) = cleanup::remove_satisfied(root, &verdicts) else {
            log::debug!("Pruning removed the root entirely.");
            return Ok(PruneOutcome::FullySatisfied);
        };

        let Some(root) = fragment_liveness::remove_dead_fragments(root)? else {
            log::debug!("Pruning removed the root entirely.");
            return Ok(PruneOutcome::FullySatisfied);
        };

        Ok(match root {
            QueryNode::Document(doc) if doc.definitions.is_empty() => {
                log::debug!("The cache satisfies the whole document.");
                PruneOutcome::FullySatisfied
            },
            root => PruneOutcome::Residual(root),
        })
    }

    /// Parses `content` as an executable document and prunes it.
    pub fn prune_str(self, content: &str) -> Result<PruneOutcome> {
        let doc = ast::operation::parse(content)
            .map_err(|err| PruneError::Parse(Arc::new(err)))?;
        self.prune(doc)
    }
}

/// Convenience wrapper around [`QueryPruner`] for callers without
/// middleware.
pub fn prune_document(
    doc: ast::operation::Document,
    cache: &CacheValue,
    variables: VariableBindings,
) -> Result<PruneOutcome> {
    QueryPruner::new(cache)
        .with_variables(variables)
        .prune(doc)
}
