use indexmap::IndexMap;

/// What the walker decided about one selection.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionVerdict {
    /// The cache already satisfies the selection; it can be removed.
    Satisfied,

    /// A leaf field that the cache does not have.
    Needed,

    /// The cache cannot speak for this selection, so it is kept whole.
    Undecided,

    /// The selection is kept and its children were evaluated.
    Descended(SelectionSetVerdicts),
}
impl SelectionVerdict {
    /// Combines two evaluations of the same selection.
    ///
    /// A selection stays [`SelectionVerdict::Satisfied`] only when both
    /// evaluations found it satisfied.
    pub fn merge(self, other: Self) -> Self {
        use SelectionVerdict::*;
        match (self, other) {
            (Satisfied, verdict) | (verdict, Satisfied) => verdict,
            (Undecided, _) | (_, Undecided) => Undecided,
            (Needed, _) | (_, Needed) => Needed,
            (Descended(a), Descended(b)) => Descended(a.merge(b)),
        }
    }
}

/// Verdicts for the items of one selection set, keyed by item index.
///
/// Items without a verdict (fragment spreads, or anything the walker did not
/// reach) are kept as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSetVerdicts(IndexMap<usize, SelectionVerdict>);
impl SelectionSetVerdicts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_idx: usize) -> Option<&SelectionVerdict> {
        self.0.get(&item_idx)
    }

    pub fn insert(&mut self, item_idx: usize, verdict: SelectionVerdict) {
        self.0.insert(item_idx, verdict);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &SelectionVerdict)> {
        self.0.iter().map(|(idx, verdict)| (*idx, verdict))
    }

    /// Item-wise [`SelectionVerdict::merge`]. An item only one side has a
    /// verdict for is left without one, which keeps it.
    pub fn merge(mut self, mut other: Self) -> Self {
        let merged = self.0.drain(..)
            .filter_map(|(idx, verdict)| {
                other.0.swap_remove(&idx).map(|other_verdict| {
                    (idx, verdict.merge(other_verdict))
                })
            })
            .collect();
        Self(merged)
    }
}

/// Everything pass 1 decided for a root, keyed by the definition index the
/// selection set belongs to (always `0` for non-document roots).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Verdicts {
    definitions: IndexMap<usize, SelectionSetVerdicts>,
}
impl Verdicts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_definition(&self, def_idx: usize) -> Option<&SelectionSetVerdicts> {
        self.definitions.get(&def_idx)
    }

    pub fn insert(&mut self, def_idx: usize, verdicts: SelectionSetVerdicts) {
        self.definitions.insert(def_idx, verdicts);
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }
}
