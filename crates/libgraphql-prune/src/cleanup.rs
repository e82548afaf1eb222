use crate::ast;
use crate::QueryNode;
use crate::SelectionSetVerdicts;
use crate::SelectionVerdict;
use crate::Verdicts;
use std::collections::HashSet;

/// Rebuilds `root` without the selections `verdicts` marks as
/// [`SelectionVerdict::Satisfied`].
///
/// Removal cascades upwards: a field, operation or fragment definition whose
/// selection set had items before the rebuild and has none after it is
/// removed too, and so is any inline fragment left with an empty selection
/// set. Leaf fields (whose selection set was always empty) are unaffected by
/// that rule.
///
/// Returns `None` when `root` itself is removed. A `Document` root is never
/// removed, but it may come back without any definitions.
pub fn remove_satisfied(root: QueryNode, verdicts: &Verdicts) -> Option<QueryNode> {
    Rebuild {
        dropped_spreads: &HashSet::new(),
        verdicts,
    }.root(root)
}

/// Applies only the empty-selection-set rule of [`remove_satisfied`].
pub fn collapse_empty(root: QueryNode) -> Option<QueryNode> {
    remove_satisfied(root, &Verdicts::new())
}

/// Like [`remove_satisfied`], additionally dropping every spread of a
/// fragment named in `dropped_spreads`.
pub(crate) fn rebuild(
    root: QueryNode,
    verdicts: &Verdicts,
    dropped_spreads: &HashSet<String>,
) -> Option<QueryNode> {
    Rebuild {
        dropped_spreads,
        verdicts,
    }.root(root)
}

struct Rebuild<'a> {
    dropped_spreads: &'a HashSet<String>,
    verdicts: &'a Verdicts,
}
impl Rebuild<'_> {
    fn root(&self, root: QueryNode) -> Option<QueryNode> {
        match root {
            QueryNode::Document(mut doc) => {
                doc.definitions =
                    doc.definitions.into_iter()
                        .enumerate()
                        .filter_map(|(idx, def)| self.definition(idx, def))
                        .collect();
                Some(QueryNode::Document(doc))
            },

            QueryNode::Definition(def) =>
                self.definition(0, def).map(QueryNode::Definition),

            QueryNode::SelectionSet(selection_set) =>
                self.selection_set(selection_set, self.verdicts.for_definition(0))
                    .map(QueryNode::SelectionSet),
        }
    }

    fn definition(
        &self,
        def_idx: usize,
        def: ast::operation::Definition,
    ) -> Option<ast::operation::Definition> {
        use ast::operation::Definition;
        use ast::operation::OperationDefinition as OpDef;

        let verdicts = self.verdicts.for_definition(def_idx);
        Some(match def {
            Definition::Fragment(mut frag_def) => {
                frag_def.selection_set =
                    self.selection_set(frag_def.selection_set, verdicts)?;
                Definition::Fragment(frag_def)
            },

            Definition::Operation(OpDef::Query(mut query)) => {
                query.selection_set =
                    self.selection_set(query.selection_set, verdicts)?;
                Definition::Operation(OpDef::Query(query))
            },

            Definition::Operation(OpDef::SelectionSet(selection_set)) =>
                Definition::Operation(OpDef::SelectionSet(
                    self.selection_set(selection_set, verdicts)?,
                )),

            Definition::Operation(OpDef::Mutation(mut mutation)) => {
                mutation.selection_set =
                    self.selection_set(mutation.selection_set, verdicts)?;
                Definition::Operation(OpDef::Mutation(mutation))
            },

            Definition::Operation(OpDef::Subscription(mut subscription)) => {
                subscription.selection_set =
                    self.selection_set(subscription.selection_set, verdicts)?;
                Definition::Operation(OpDef::Subscription(subscription))
            },
        })
    }

    /// Returns `None` if the selection set had items and lost all of them.
    fn selection_set(
        &self,
        selection_set: ast::operation::SelectionSet,
        verdicts: Option<&SelectionSetVerdicts>,
    ) -> Option<ast::operation::SelectionSet> {
        let had_items = !selection_set.items.is_empty();
        let items: Vec<_> =
            selection_set.items.into_iter()
                .enumerate()
                .filter_map(|(idx, selection)| {
                    let verdict = verdicts.and_then(|verdicts| verdicts.get(idx));
                    self.selection(selection, verdict)
                })
                .collect();

        if had_items && items.is_empty() {
            return None;
        }

        Some(ast::operation::SelectionSet {
            span: selection_set.span,
            items,
        })
    }

    fn selection(
        &self,
        selection: ast::operation::Selection,
        verdict: Option<&SelectionVerdict>,
    ) -> Option<ast::operation::Selection> {
        use ast::operation::Selection;

        let child_verdicts = match verdict {
            Some(SelectionVerdict::Satisfied) => return None,
            Some(SelectionVerdict::Descended(children)) => Some(children),
            Some(SelectionVerdict::Needed | SelectionVerdict::Undecided) | None => None,
        };

        Some(match selection {
            Selection::Field(mut field) => {
                field.selection_set =
                    self.selection_set(field.selection_set, child_verdicts)?;
                Selection::Field(field)
            },

            Selection::InlineFragment(mut inline_fragment) => {
                let selection_set =
                    self.selection_set(inline_fragment.selection_set, child_verdicts)?;
                if selection_set.items.is_empty() {
                    return None;
                }
                inline_fragment.selection_set = selection_set;
                Selection::InlineFragment(inline_fragment)
            },

            Selection::FragmentSpread(spread) => {
                if self.dropped_spreads.contains(&spread.fragment_name) {
                    return None;
                }
                Selection::FragmentSpread(spread)
            },
        })
    }
}
