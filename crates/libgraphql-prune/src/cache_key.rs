use crate::ast;
use crate::PruneError;
use crate::VariableBindings;

type Result<T> = std::result::Result<T, PruneError>;

/// Identifies a field's slot within a cache scope.
///
/// A field without arguments is keyed by its name alone (aliases never take
/// part in the key). A field with arguments is keyed by
/// `name|{"arg":"value",...}`: a compact JSON object holding the resolved
/// argument values in the order the arguments appear on the field.
///
/// Argument values render as follows:
///
/// * Scalars (ints, floats, strings, booleans, enum values) render as JSON
///   strings of their textual form, so `user(id: 7)` and `user(id: $id)` with
///   `$id = 7` both derive `user|{"id":"7"}`. Numbers use JSON number
///   formatting (`1.0` renders as `"1.0"`). An enum value and a string with
///   the same text derive the same key, matching enum values bound through
///   variables (which arrive as JSON strings).
/// * A `null` literal renders as JSON `null`.
/// * Lists and input objects render as JSON arrays and objects, recursively.
///   Literal input objects use the parser's (sorted) field order; objects
///   bound through variables keep the order of the bindings.
/// * Variables resolve through the [`VariableBindings`], including variables
///   nested inside lists and input objects. A variable that is unbound (or
///   bound to `null`) fails with [`PruneError::UnboundVariable`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CacheKey(String);
impl CacheKey {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Derives the [`CacheKey`] for `field` under `variables`.
    pub fn for_field(
        field: &ast::operation::Field,
        variables: &VariableBindings,
    ) -> Result<Self> {
        if field.arguments.is_empty() {
            return Ok(Self(field.name.to_string()));
        }

        let mut resolved_args = serde_json::Map::new();
        for (arg_name, arg_value) in &field.arguments {
            resolved_args.insert(
                arg_name.to_string(),
                render_ast_value(arg_value, field, variables)?,
            );
        }

        Ok(Self(format!(
            "{}|{}",
            field.name,
            serde_json::Value::Object(resolved_args),
        )))
    }
}
impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn render_ast_value(
    value: &ast::Value,
    field: &ast::operation::Field,
    variables: &VariableBindings,
) -> Result<serde_json::Value> {
    use serde_json::Value as Json;

    Ok(match value {
        ast::Value::Variable(var_name) =>
            variables.get_bound(var_name)
                .map(render_bound_value)
                .ok_or_else(|| PruneError::UnboundVariable {
                    field_name: field.name.to_string(),
                    variable_name: var_name.to_string(),
                })?,

        ast::Value::Int(num) =>
            num.as_i64()
                .map(|int| render_number(&serde_json::Number::from(int)))
                .unwrap_or(Json::Null),

        ast::Value::Float(float) =>
            serde_json::Number::from_f64(*float)
                .map(|num| render_number(&num))
                .unwrap_or(Json::Null),

        ast::Value::String(value) =>
            Json::String(value.to_owned()),

        ast::Value::Boolean(value) =>
            Json::String(value.to_string()),

        ast::Value::Null =>
            Json::Null,

        ast::Value::Enum(enum_value) =>
            Json::String(enum_value.to_string()),

        ast::Value::List(items) =>
            Json::Array(
                items.iter()
                    .map(|item| render_ast_value(item, field, variables))
                    .collect::<Result<Vec<_>>>()?,
            ),

        ast::Value::Object(entries) => {
            let mut rendered = serde_json::Map::new();
            for (key, entry_value) in entries {
                rendered.insert(
                    key.to_string(),
                    render_ast_value(entry_value, field, variables)?,
                );
            }
            Json::Object(rendered)
        },
    })
}

/// Literal and variable-bound numbers both render through here so that
/// `1.0` stays `"1.0"` however it reaches the field.
fn render_number(num: &serde_json::Number) -> serde_json::Value {
    serde_json::Value::String(num.to_string())
}

fn render_bound_value(value: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        Json::Null => Json::Null,
        Json::Bool(value) => Json::String(value.to_string()),
        Json::Number(num) => render_number(num),
        Json::String(value) => Json::String(value.to_owned()),
        Json::Array(items) => Json::Array(
            items.iter().map(render_bound_value).collect(),
        ),
        Json::Object(entries) => Json::Object(
            entries.iter()
                .map(|(key, entry_value)| {
                    (key.to_owned(), render_bound_value(entry_value))
                })
                .collect(),
        ),
    }
}
