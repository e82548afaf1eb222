use crate::ast;
use crate::cleanup;
use crate::PruneError;
use crate::QueryNode;
use crate::Verdicts;
use indexmap::IndexSet;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, PruneError>;

/// Removes fragment spreads and fragment definitions that can no longer
/// contribute to the document.
///
/// First, every spread of a fragment that is not defined in the document is
/// removed, and the empty-selection-set rule of
/// [`remove_satisfied`](crate::remove_satisfied) is re-applied. That can
/// remove further fragment definitions (and so leave further spreads
/// dangling), so this repeats until the document stops changing.
///
/// Then every fragment definition that is not reachable from an operation
/// through a surviving spread is removed.
///
/// Resolving a spread against a non-`Document` root fails with
/// [`PruneError::MalformedRoot`]. Returns `None` when the root itself is
/// removed.
pub fn remove_dead_fragments(root: QueryNode) -> Result<Option<QueryNode>> {
    let mut root = root;
    loop {
        let dangling = dangling_spreads(&root)?;
        if dangling.is_empty() {
            break;
        }

        log::debug!(
            "Removing spreads of {} undefined fragment(s): {:?}",
            dangling.len(),
            dangling,
        );
        root = match cleanup::rebuild(root, &Verdicts::new(), &dangling) {
            Some(root) => root,
            None => return Ok(None),
        };
    }

    Ok(Some(match root {
        QueryNode::Document(doc) =>
            QueryNode::Document(remove_unused_fragments(doc)),
        other => other,
    }))
}

fn remove_unused_fragments(
    mut doc: ast::operation::Document,
) -> ast::operation::Document {
    let used_fragments = used_fragments(&doc);
    doc.definitions.retain(|def| match def {
        ast::operation::Definition::Fragment(frag_def) => {
            let used = used_fragments.contains(frag_def.name.as_str());
            if !used {
                log::debug!("Removing unused fragment `{}`.", frag_def.name);
            }
            used
        },
        ast::operation::Definition::Operation(_) => true,
    });
    doc
}

/// Names of fragments that are spread somewhere in `root` but not defined in
/// it.
fn dangling_spreads(root: &QueryNode) -> Result<HashSet<String>> {
    let mut spread_names = IndexSet::new();
    for selection_set in root_selection_sets(root) {
        collect_spread_names(selection_set, &mut spread_names);
    }
    if spread_names.is_empty() {
        return Ok(HashSet::new());
    }

    let QueryNode::Document(doc) = root else {
        return Err(PruneError::MalformedRoot {
            root_kind: root.kind(),
        });
    };

    let defined: HashSet<&str> =
        doc.definitions.iter()
            .filter_map(|def| match def {
                ast::operation::Definition::Fragment(frag_def) =>
                    Some(frag_def.name.as_str()),
                ast::operation::Definition::Operation(_) => None,
            })
            .collect();

    Ok(spread_names.into_iter()
        .filter(|name| !defined.contains(name.as_str()))
        .collect())
}

/// Fragments reachable from the document's operations, following spreads
/// into the (first) definition of each reached fragment.
fn used_fragments(doc: &ast::operation::Document) -> IndexSet<String> {
    let mut used = IndexSet::new();
    for def in &doc.definitions {
        if let ast::operation::Definition::Operation(op_def) = def {
            collect_spread_names(operation_selection_set(op_def), &mut used);
        }
    }
    add_transitive_spreads(doc, &mut used);
    used
}

/// Extends `names` with every fragment spread (transitively) from the first
/// definition of a fragment already in `names`.
pub(crate) fn add_transitive_spreads(
    doc: &ast::operation::Document,
    names: &mut IndexSet<String>,
) {
    let mut next_idx = 0;
    while let Some(fragment_name) = names.get_index(next_idx).cloned() {
        next_idx += 1;
        let frag_def = doc.definitions.iter().find_map(|def| match def {
            ast::operation::Definition::Fragment(frag_def)
                if frag_def.name == fragment_name => Some(frag_def),
            _ => None,
        });
        if let Some(frag_def) = frag_def {
            collect_spread_names(&frag_def.selection_set, names);
        }
    }
}

pub(crate) fn collect_spread_names(
    selection_set: &ast::operation::SelectionSet,
    names: &mut IndexSet<String>,
) {
    use ast::operation::Selection;

    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) =>
                collect_spread_names(&field.selection_set, names),
            Selection::InlineFragment(inline_fragment) =>
                collect_spread_names(&inline_fragment.selection_set, names),
            Selection::FragmentSpread(spread) => {
                names.insert(spread.fragment_name.to_string());
            },
        }
    }
}

fn definition_selection_set(
    def: &ast::operation::Definition,
) -> &ast::operation::SelectionSet {
    match def {
        ast::operation::Definition::Fragment(frag_def) => &frag_def.selection_set,
        ast::operation::Definition::Operation(op_def) => operation_selection_set(op_def),
    }
}

fn operation_selection_set(
    op_def: &ast::operation::OperationDefinition,
) -> &ast::operation::SelectionSet {
    use ast::operation::OperationDefinition as OpDef;

    match op_def {
        OpDef::Mutation(mutation) => &mutation.selection_set,
        OpDef::Query(query) => &query.selection_set,
        OpDef::SelectionSet(selection_set) => selection_set,
        OpDef::Subscription(subscription) => &subscription.selection_set,
    }
}

fn root_selection_sets(root: &QueryNode) -> Vec<&ast::operation::SelectionSet> {
    match root {
        QueryNode::Definition(def) => vec![definition_selection_set(def)],
        QueryNode::Document(doc) =>
            doc.definitions.iter().map(definition_selection_set).collect(),
        QueryNode::SelectionSet(selection_set) => vec![selection_set],
    }
}
