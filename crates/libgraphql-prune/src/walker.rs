use crate::ast;
use crate::cache_scope_stack::CacheLookup;
use crate::query_node;
use crate::CacheKey;
use crate::CacheScopeStack;
use crate::CacheValue;
use crate::prune_middleware::MiddlewareChain;
use crate::PruneError;
use crate::PruneMiddleware;
use crate::QueryNode;
use crate::SelectionSetVerdicts;
use crate::SelectionVerdict;
use crate::VariableBindings;
use crate::Verdicts;
use crate::fragment_liveness;
use indexmap::IndexMap;
use indexmap::IndexSet;

type Result<T> = std::result::Result<T, PruneError>;

/// Walks every query body in `root` alongside `cache_stack` and records what
/// the cache already satisfies.
///
/// Mutations, subscriptions and fragment definitions are never walked
/// directly. A fragment is only walked through a spread inside a query, and
/// what is decided there is recorded against the fragment *definition*: every
/// spread of the same fragment shares (and merges into) those verdicts.
///
/// A fragment is only pruned where every spread of it agrees, so a fragment
/// spread from somewhere the walk does not reach (a mutation or subscription,
/// or a subtree that is kept whole because the cache has no entry for it) is
/// pinned: it gets no verdicts and keeps its original selection set. So does
/// every fragment spread from a pinned one.
///
/// `root` itself is only modified where a middleware replaced a field.
pub fn walk_against_cache<'cache>(
    root: &mut QueryNode,
    cache_stack: &mut CacheScopeStack<'cache>,
    variables: &VariableBindings,
    middleware: Vec<&mut dyn PruneMiddleware>,
) -> Result<Verdicts> {
    // Bodies are walked as copies so that fragments can still be resolved
    // against the untouched root while the walk is underway.
    let mut walked_bodies = vec![];
    let (fragment_rewrites, pinned_fragments) = {
        let mut walker = QueryWalker {
            cache_stack,
            expanding_fragments: vec![],
            fragment_rewrites: IndexMap::new(),
            middleware: MiddlewareChain::new(middleware),
            pinned_fragments: non_query_spreads(root),
            root: &*root,
            variables,
        };

        for (def_idx, selection_set) in query_bodies(root) {
            let mut body = selection_set.clone();
            let verdicts = walker.walk_selection_set(&mut body)?;
            walked_bodies.push((def_idx, body, verdicts));
        }

        let mut pinned_fragments = walker.pinned_fragments;
        if let Some(doc) = root.as_document() {
            fragment_liveness::add_transitive_spreads(doc, &mut pinned_fragments);
        }
        (walker.fragment_rewrites, pinned_fragments)
    };

    let mut verdicts = Verdicts::new();
    for (def_idx, body, body_verdicts) in walked_bodies {
        if let Some(selection_set) = query_body_mut(root, def_idx) {
            *selection_set = body;
        }
        verdicts.insert(def_idx, body_verdicts);
    }
    for (def_idx, walked) in fragment_rewrites {
        if pinned_fragments.contains(&walked.fragment_name) {
            log::debug!(
                "Keeping fragment `{}` whole: it is also spread where the \
                cache was not consulted.",
                walked.fragment_name,
            );
            continue;
        }
        query_node::replace_fragment_selection_set(
            root,
            def_idx,
            walked.selection_set,
        )?;
        verdicts.insert(def_idx, walked.verdicts);
    }

    log::debug!(
        "Walked {} selection set(s) against the cache.",
        verdicts.len(),
    );
    Ok(verdicts)
}

/// A fragment's selection set as last walked through a spread, plus the
/// verdicts merged across every spread walked so far.
struct WalkedFragment {
    fragment_name: String,
    selection_set: ast::operation::SelectionSet,
    verdicts: SelectionSetVerdicts,
}

struct QueryWalker<'root, 'stack, 'cache, 'vars, 'mw> {
    cache_stack: &'stack mut CacheScopeStack<'cache>,
    expanding_fragments: Vec<String>,
    fragment_rewrites: IndexMap<usize, WalkedFragment>,
    middleware: MiddlewareChain<'mw>,
    pinned_fragments: IndexSet<String>,
    root: &'root QueryNode,
    variables: &'vars VariableBindings,
}
impl<'root, 'stack, 'cache, 'vars, 'mw> QueryWalker<'root, 'stack, 'cache, 'vars, 'mw> {
    fn walk_selection_set(
        &mut self,
        selection_set: &mut ast::operation::SelectionSet,
    ) -> Result<SelectionSetVerdicts> {
        use ast::operation::Selection;

        let mut verdicts = SelectionSetVerdicts::new();
        for (idx, selection) in selection_set.items.iter_mut().enumerate() {
            match selection {
                Selection::Field(field) => {
                    let verdict = self.walk_field(field)?;
                    verdicts.insert(idx, verdict);
                },

                Selection::InlineFragment(inline_fragment) => {
                    let children =
                        self.walk_selection_set(&mut inline_fragment.selection_set)?;
                    verdicts.insert(idx, SelectionVerdict::Descended(children));
                },

                Selection::FragmentSpread(spread) =>
                    self.walk_fragment_spread(spread.fragment_name.as_str())?,
            }
        }
        Ok(verdicts)
    }

    fn walk_field(
        &mut self,
        field: &mut ast::operation::Field,
    ) -> Result<SelectionVerdict> {
        let cache_key = CacheKey::for_field(field, self.variables)?;
        let lookup = self.cache_stack.lookup(&cache_key);

        if field.selection_set.items.is_empty() {
            return Ok(match lookup {
                CacheLookup::Found(_) => {
                    log::trace!("Leaf `{cache_key}` is satisfied by the cache.");
                    SelectionVerdict::Satisfied
                },
                CacheLookup::Missing | CacheLookup::NoScope =>
                    SelectionVerdict::Needed,
            });
        }

        Ok(match lookup {
            CacheLookup::NoScope =>
                SelectionVerdict::Descended(
                    self.walk_selection_set(&mut field.selection_set)?,
                ),

            CacheLookup::Missing => {
                log::trace!("`{cache_key}` is not cached; keeping it whole.");
                fragment_liveness::collect_spread_names(
                    &field.selection_set,
                    &mut self.pinned_fragments,
                );
                SelectionVerdict::Undecided
            },

            CacheLookup::Found(CacheValue::Null) => {
                log::trace!("`{cache_key}` is cached as `null`.");
                SelectionVerdict::Satisfied
            },

            CacheLookup::Found(CacheValue::Array(elements)) => {
                if elements.is_empty() {
                    log::trace!("`{cache_key}` is cached as an empty list.");
                    return Ok(SelectionVerdict::Satisfied);
                }

                log::trace!(
                    "Fanning `{cache_key}` out over {} cached elements.",
                    elements.len(),
                );
                let mut merged: Option<SelectionSetVerdicts> = None;
                for element in elements {
                    let element_verdicts = self.walk_field_scope(field, element)?;
                    merged = Some(match merged {
                        Some(prev) => prev.merge(element_verdicts),
                        None => element_verdicts,
                    });
                }
                SelectionVerdict::Descended(merged.unwrap_or_default())
            },

            CacheLookup::Found(scope) =>
                SelectionVerdict::Descended(self.walk_field_scope(field, scope)?),
        })
    }

    /// Walks `field`'s children with `scope` pushed as the current cache
    /// scope, dispatching middleware on the way in and out.
    fn walk_field_scope(
        &mut self,
        field: &mut ast::operation::Field,
        scope: &'cache CacheValue,
    ) -> Result<SelectionSetVerdicts> {
        self.cache_stack.push(scope);
        self.middleware.enter_selection_set(field, &*self.cache_stack);

        let result = self.walk_selection_set(&mut field.selection_set);
        if result.is_ok()
            && let Some(replacement) =
                self.middleware.leave_selection_set(field, &*self.cache_stack) {
            *field = replacement;
        }

        self.cache_stack.pop();
        result
    }

    fn walk_fragment_spread(&mut self, fragment_name: &str) -> Result<()> {
        if self.expanding_fragments.iter().any(|name| name == fragment_name) {
            log::trace!(
                "Not re-entering fragment `{fragment_name}` from within itself.",
            );
            return Ok(());
        }

        let root = self.root;
        let Some((def_idx, frag_def)) = query_node::find_fragment(root, fragment_name)? else {
            log::trace!("Spread of undefined fragment `{fragment_name}`.");
            return Ok(());
        };

        let mut selection_set = match self.fragment_rewrites.get(&def_idx) {
            Some(walked) => walked.selection_set.clone(),
            None => frag_def.selection_set.clone(),
        };

        self.expanding_fragments.push(fragment_name.to_string());
        let result = self.walk_selection_set(&mut selection_set);
        self.expanding_fragments.pop();
        let verdicts = result?;

        let verdicts = match self.fragment_rewrites.swap_remove(&def_idx) {
            Some(prev) => prev.verdicts.merge(verdicts),
            None => verdicts,
        };
        self.fragment_rewrites.insert(def_idx, WalkedFragment {
            fragment_name: fragment_name.to_string(),
            selection_set,
            verdicts,
        });
        Ok(())
    }
}

fn query_selection_set(
    def: &ast::operation::Definition,
) -> Option<&ast::operation::SelectionSet> {
    use ast::operation::Definition;
    use ast::operation::OperationDefinition as OpDef;

    match def {
        Definition::Operation(OpDef::Query(query)) => Some(&query.selection_set),
        Definition::Operation(OpDef::SelectionSet(selection_set)) => Some(selection_set),
        _ => None,
    }
}

fn query_selection_set_mut(
    def: &mut ast::operation::Definition,
) -> Option<&mut ast::operation::SelectionSet> {
    use ast::operation::Definition;
    use ast::operation::OperationDefinition as OpDef;

    match def {
        Definition::Operation(OpDef::Query(query)) => Some(&mut query.selection_set),
        Definition::Operation(OpDef::SelectionSet(selection_set)) => Some(selection_set),
        _ => None,
    }
}

/// Names of the fragments spread directly by mutations and subscriptions.
fn non_query_spreads(root: &QueryNode) -> IndexSet<String> {
    use ast::operation::Definition;
    use ast::operation::OperationDefinition as OpDef;

    let mut spread_names = IndexSet::new();
    fn non_query_body<'a>(
        def: &'a ast::operation::Definition,
    ) -> Option<&'a ast::operation::SelectionSet> {
        match def {
            Definition::Operation(OpDef::Mutation(mutation)) => Some(&mutation.selection_set),
            Definition::Operation(OpDef::Subscription(subscription)) =>
                Some(&subscription.selection_set),
            _ => None,
        }
    }

    match root {
        QueryNode::Document(doc) => {
            for selection_set in doc.definitions.iter().filter_map(non_query_body) {
                fragment_liveness::collect_spread_names(selection_set, &mut spread_names);
            }
        },
        QueryNode::Definition(def) => {
            if let Some(selection_set) = non_query_body(def) {
                fragment_liveness::collect_spread_names(selection_set, &mut spread_names);
            }
        },
        QueryNode::SelectionSet(_) => (),
    }
    spread_names
}

/// Every query body in `root`, paired with the index of its definition.
fn query_bodies(root: &QueryNode) -> Vec<(usize, &ast::operation::SelectionSet)> {
    match root {
        QueryNode::Document(doc) =>
            doc.definitions.iter()
                .enumerate()
                .filter_map(|(idx, def)| {
                    query_selection_set(def).map(|selection_set| (idx, selection_set))
                })
                .collect(),

        QueryNode::Definition(def) =>
            query_selection_set(def)
                .map(|selection_set| (0, selection_set))
                .into_iter()
                .collect(),

        QueryNode::SelectionSet(selection_set) => vec![(0, selection_set)],
    }
}

fn query_body_mut(
    root: &mut QueryNode,
    def_idx: usize,
) -> Option<&mut ast::operation::SelectionSet> {
    match root {
        QueryNode::Document(doc) =>
            doc.definitions.get_mut(def_idx).and_then(query_selection_set_mut),
        QueryNode::Definition(def) => query_selection_set_mut(def),
        QueryNode::SelectionSet(selection_set) => Some(selection_set),
    }
}
