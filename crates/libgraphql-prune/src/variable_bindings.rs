use indexmap::IndexMap;

/// Runtime values bound to an operation's variables for a single prune call.
///
/// Bindings keep their insertion order, so object-valued variables render
/// into cache keys with a stable key order.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct VariableBindings(IndexMap<String, serde_json::Value>);
impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`, treating a `null` binding the same
    /// as a missing one.
    pub fn get_bound(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
impl<K: Into<String>, V: Into<serde_json::Value>> FromIterator<(K, V)> for VariableBindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
