use crate::CacheKey;

/// A materialized cache snapshot (or any scope within one).
///
/// Objects map [`CacheKey`]s to nested scopes, arrays hold the elements of a
/// list field, and everything else is a scalar (or `null`).
pub type CacheValue = serde_json::Value;

/// The result of looking a [`CacheKey`] up in the top [`CacheScopeStack`]
/// scope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CacheLookup<'cache> {
    /// The stack is empty, so there is no cache context to consult.
    NoScope,

    /// The top scope has no entry for the key (or is not an object).
    Missing,

    /// The top scope has an entry for the key (possibly `null`).
    Found(&'cache CacheValue),
}

/// LIFO of the cache scopes that positionally correspond to the selection
/// sets a walk is currently nested within.
#[derive(Clone, Debug, Default)]
pub struct CacheScopeStack<'cache> {
    scopes: Vec<&'cache CacheValue>,
}
impl<'cache> CacheScopeStack<'cache> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack holding only the root `snapshot`.
    pub fn with_root(snapshot: &'cache CacheValue) -> Self {
        Self {
            scopes: vec![snapshot],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Iterates scopes from the bottom (root) of the stack to its top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'cache CacheValue> + '_ {
        self.scopes.iter().copied()
    }

    pub fn lookup(&self, key: &CacheKey) -> CacheLookup<'cache> {
        match self.peek() {
            None => CacheLookup::NoScope,
            Some(scope) => scope.as_object()
                .and_then(|entries| entries.get(key.as_str()))
                .map_or(CacheLookup::Missing, CacheLookup::Found),
        }
    }

    /// The top scope, or `None` when the stack is empty.
    pub fn peek(&self) -> Option<&'cache CacheValue> {
        self.scopes.last().copied()
    }

    pub fn pop(&mut self) -> Option<&'cache CacheValue> {
        self.scopes.pop()
    }

    pub fn push(&mut self, scope: &'cache CacheValue) {
        self.scopes.push(scope);
    }
}
