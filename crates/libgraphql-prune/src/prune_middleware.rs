use crate::ast;
use crate::CacheScopeStack;

/// Hooks invoked while the walker moves in and out of object-valued cache
/// scopes.
///
/// Both methods default to doing nothing, so an implementation only needs to
/// provide the hook it cares about.
pub trait PruneMiddleware: std::fmt::Debug {
    /// Called after the scope for `field` has been pushed and before its
    /// children are walked.
    fn enter_selection_set(
        &mut self,
        _field: &ast::operation::Field,
        _cache_stack: &CacheScopeStack<'_>,
    ) {}

    /// Called after the children of `field` have been walked and before its
    /// scope is popped. Returning `Some(replacement)` substitutes the field.
    ///
    /// Decisions already made for the children of `field` are applied to the
    /// replacement's selections by position.
    fn leave_selection_set(
        &mut self,
        _field: &ast::operation::Field,
        _cache_stack: &CacheScopeStack<'_>,
    ) -> Option<ast::operation::Field> {
        None
    }
}

/// Dispatches to a list of [`PruneMiddleware`]s in registration order.
#[derive(Debug, Default)]
pub(crate) struct MiddlewareChain<'mw> {
    middleware: Vec<&'mw mut dyn PruneMiddleware>,
}
impl<'mw> MiddlewareChain<'mw> {
    pub fn new(middleware: Vec<&'mw mut dyn PruneMiddleware>) -> Self {
        Self { middleware }
    }

    pub fn enter_selection_set(
        &mut self,
        field: &ast::operation::Field,
        cache_stack: &CacheScopeStack<'_>,
    ) {
        for mw in self.middleware.iter_mut() {
            mw.enter_selection_set(field, cache_stack);
        }
    }

    /// Each middleware sees the field as replaced by the middleware before
    /// it. Returns `None` if no middleware replaced the field.
    pub fn leave_selection_set(
        &mut self,
        field: &ast::operation::Field,
        cache_stack: &CacheScopeStack<'_>,
    ) -> Option<ast::operation::Field> {
        let mut replacement: Option<ast::operation::Field> = None;
        for mw in self.middleware.iter_mut() {
            let current = replacement.as_ref().unwrap_or(field);
            if let Some(new_field) = mw.leave_selection_set(current, cache_stack) {
                replacement = Some(new_field);
            }
        }
        replacement
    }
}

/// Logs every scope the walker enters or leaves at `trace` level.
#[derive(Debug, Default)]
pub struct ScopeTraceMiddleware {
    entered: usize,
}
impl ScopeTraceMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes entered so far.
    pub fn entered(&self) -> usize {
        self.entered
    }
}
impl PruneMiddleware for ScopeTraceMiddleware {
    fn enter_selection_set(
        &mut self,
        field: &ast::operation::Field,
        cache_stack: &CacheScopeStack<'_>,
    ) {
        self.entered += 1;
        log::trace!(
            "Entering cache scope for `{}` (stack depth: {}).",
            field.name,
            cache_stack.depth(),
        );
    }

    fn leave_selection_set(
        &mut self,
        field: &ast::operation::Field,
        cache_stack: &CacheScopeStack<'_>,
    ) -> Option<ast::operation::Field> {
        log::trace!(
            "Leaving cache scope for `{}` (stack depth: {}).",
            field.name,
            cache_stack.depth(),
        );
        None
    }
}
