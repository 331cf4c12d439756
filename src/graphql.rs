// GraphQL query description.
// Builds queries as plain data and renders them to GraphQL query text.

use std::fmt::Write;

/// Argument value in a field call.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    /// Bare enum literal, e.g. `OPEN`.
    Enum(String),
    List(Vec<Value>),
}

impl Value {
    /// Render this value as GraphQL argument text.
    pub fn render(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Str(s) => render_string(s),
            Value::Enum(name) => name.clone(),
            Value::List(items) => render_list(items),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Render a list-valued argument: `[a,b,c]`.
pub fn render_list(items: &[Value]) -> String {
    let inner: Vec<String> = items.iter().map(Value::render).collect();
    format!("[{}]", inner.join(","))
}

/// Render a string literal with GraphQL escapes.
pub fn render_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A field selection with optional alias, arguments and sub-selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    pub name: String,
    pub alias: Option<String>,
    pub args: Vec<(String, Value)>,
    pub selections: Vec<Field>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    /// Add an argument only when `value` is present.
    pub fn arg_opt(self, name: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.arg(name, value),
            None => self,
        }
    }

    pub fn select(mut self, field: Field) -> Self {
        self.selections.push(field);
        self
    }

    /// Select several scalar fields by name.
    pub fn scalars(mut self, names: &[&str]) -> Self {
        self.selections.extend(names.iter().map(|n| Field::new(*n)));
        self
    }

    fn render_into(&self, out: &mut String) {
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(&self.name);

        if !self.args.is_empty() {
            let args: Vec<String> = self
                .args
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value.render()))
                .collect();
            out.push('(');
            out.push_str(&args.join(", "));
            out.push(')');
        }

        if !self.selections.is_empty() {
            render_selection_set(&self.selections, out);
        }
    }
}

fn render_selection_set(fields: &[Field], out: &mut String) {
    out.push_str(" { ");
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        field.render_into(out);
    }
    out.push_str(" }");
}

/// An anonymous `query` operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub fields: Vec<Field>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Render as GraphQL query text.
    pub fn render(&self) -> String {
        let mut out = String::from("query");
        render_selection_set(&self.fields, &mut out);
        out
    }
}
