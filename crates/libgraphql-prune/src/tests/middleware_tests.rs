use crate::ast;
use crate::tests::utils::assert_residual;
use crate::tests::utils::parse_doc;
use crate::CacheScopeStack;
use crate::PruneMiddleware;
use crate::QueryPruner;
use crate::ScopeTraceMiddleware;
use serde_json::json;

/// Records the field name and stack depth of every scope entered.
#[derive(Debug, Default)]
struct DepthRecorder {
    entered: Vec<(String, usize)>,
}
impl PruneMiddleware for DepthRecorder {
    fn enter_selection_set(
        &mut self,
        field: &ast::operation::Field,
        cache_stack: &CacheScopeStack<'_>,
    ) {
        self.entered.push((field.name.to_string(), cache_stack.depth()));
    }
}

/// Replaces every left field with a copy aliased as `alias`.
#[derive(Debug)]
struct AliasOnLeave {
    alias: &'static str,
    seen_aliases: Vec<Option<String>>,
}
impl AliasOnLeave {
    fn new(alias: &'static str) -> Self {
        Self {
            alias,
            seen_aliases: vec![],
        }
    }
}
impl PruneMiddleware for AliasOnLeave {
    fn leave_selection_set(
        &mut self,
        field: &ast::operation::Field,
        _cache_stack: &CacheScopeStack<'_>,
    ) -> Option<ast::operation::Field> {
        self.seen_aliases.push(field.alias.clone());
        let mut replacement = field.clone();
        replacement.alias = Some(self.alias.to_string());
        Some(replacement)
    }
}

#[test]
fn enter_hook_sees_the_pushed_scope() {
    let cache = json!({ "user": { "friend": { "id": "2" } } });
    let mut recorder = DepthRecorder::default();

    QueryPruner::new(&cache)
        .with_middleware(&mut recorder)
        .prune(parse_doc("{ user { friend { id name } } }"))
        .unwrap();

    assert_eq!(recorder.entered, vec![
        ("user".to_string(), 2),
        ("friend".to_string(), 3),
    ]);
}

#[test]
fn uncached_fields_do_not_enter_a_scope() {
    let cache = json!({ "user": null });
    let mut recorder = DepthRecorder::default();

    QueryPruner::new(&cache)
        .with_middleware(&mut recorder)
        .prune(parse_doc("{ user { id } viewer { id } }"))
        .unwrap();

    assert!(recorder.entered.is_empty());
}

#[test]
fn leave_hook_can_replace_the_field() {
    let cache = json!({ "user": { "id": "1" } });
    let mut aliaser = AliasOnLeave::new("cachedUser");

    let outcome = QueryPruner::new(&cache)
        .with_middleware(&mut aliaser)
        .prune(parse_doc("{ user { id name } }"))
        .unwrap();

    assert_residual(outcome, "{ cachedUser: user { name } }");
}

#[test]
fn replacements_thread_through_the_chain_in_order() {
    let cache = json!({ "user": { "id": "1" } });
    let mut first = AliasOnLeave::new("first");
    let mut second = AliasOnLeave::new("second");

    let outcome = QueryPruner::new(&cache)
        .with_middleware(&mut first)
        .with_middleware(&mut second)
        .prune(parse_doc("{ user { id name } }"))
        .unwrap();

    assert_eq!(first.seen_aliases, vec![None]);
    assert_eq!(second.seen_aliases, vec![Some("first".to_string())]);
    assert_residual(outcome, "{ second: user { name } }");
}

#[test]
fn list_elements_each_enter_their_own_scope() {
    let cache = json!({
        "users": [{ "id": "1" }, { "id": "2" }, { "id": "3" }],
    });
    let mut tracer = ScopeTraceMiddleware::new();

    QueryPruner::new(&cache)
        .with_middleware(&mut tracer)
        .prune(parse_doc("{ users { id } }"))
        .unwrap();

    assert_eq!(tracer.entered(), 3);
}
