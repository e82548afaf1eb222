use crate::ast;
use crate::PruneError;

type Result<T> = std::result::Result<T, PruneError>;

/// The root of a pruning pass.
///
/// A [`QueryNode::Document`] is the usual root. [`QueryNode::Definition`] and
/// [`QueryNode::SelectionSet`] roots allow pruning an isolated piece of a
/// document, but such roots cannot resolve fragment spreads: doing so fails
/// with [`PruneError::MalformedRoot`].
///
/// A bare [`QueryNode::SelectionSet`] root is treated as the body of a query
/// operation.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryNode {
    Definition(ast::operation::Definition),
    Document(ast::operation::Document),
    SelectionSet(ast::operation::SelectionSet),
}
impl QueryNode {
    pub fn as_document(&self) -> Option<&ast::operation::Document> {
        if let Self::Document(doc) = self {
            Some(doc)
        } else {
            None
        }
    }

    pub fn into_document(self) -> Option<ast::operation::Document> {
        if let Self::Document(doc) = self {
            Some(doc)
        } else {
            None
        }
    }

    pub fn kind(&self) -> QueryNodeKind {
        match self {
            Self::Definition(_) => QueryNodeKind::Definition,
            Self::Document(_) => QueryNodeKind::Document,
            Self::SelectionSet(_) => QueryNodeKind::SelectionSet,
        }
    }
}
impl From<ast::operation::Document> for QueryNode {
    fn from(doc: ast::operation::Document) -> Self {
        Self::Document(doc)
    }
}
impl From<ast::operation::Definition> for QueryNode {
    fn from(def: ast::operation::Definition) -> Self {
        Self::Definition(def)
    }
}
impl From<ast::operation::SelectionSet> for QueryNode {
    fn from(selection_set: ast::operation::SelectionSet) -> Self {
        Self::SelectionSet(selection_set)
    }
}

/// Similar to [`QueryNode`], except without the node itself. Used when
/// reporting which kind of root a pass was handed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryNodeKind {
    Definition,
    Document,
    SelectionSet,
}

/// Finds the first fragment definition named `fragment_name` in `root`,
/// returning its index within the document's definitions.
pub(crate) fn find_fragment<'root>(
    root: &'root QueryNode,
    fragment_name: &str,
) -> Result<Option<(usize, &'root ast::operation::FragmentDefinition)>> {
    let doc = root.as_document().ok_or(PruneError::MalformedRoot {
        root_kind: root.kind(),
    })?;

    Ok(doc.definitions.iter().enumerate().find_map(|(idx, def)| match def {
        ast::operation::Definition::Fragment(frag_def)
            if frag_def.name == fragment_name => Some((idx, frag_def)),
        _ => None,
    }))
}

/// Replaces the selection set of the fragment definition at `def_idx`.
pub(crate) fn replace_fragment_selection_set(
    root: &mut QueryNode,
    def_idx: usize,
    selection_set: ast::operation::SelectionSet,
) -> Result<()> {
    let root_kind = root.kind();
    let QueryNode::Document(doc) = root else {
        return Err(PruneError::MalformedRoot { root_kind });
    };

    if let Some(ast::operation::Definition::Fragment(frag_def)) =
        doc.definitions.get_mut(def_idx) {
        frag_def.selection_set = selection_set;
    }
    Ok(())
}
