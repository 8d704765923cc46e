//! Declarative request validation.
//!
//! A `ValidationRule` bundles a schema (shape check) with a list of field-path
//! pairs whose values must be equal. Paths are dotted and resolved against
//! `{params, query, body}`, e.g. `params.username` or `body.id`.
//!
//! The shape check always runs first; pairs are only compared on a
//! well-shaped request.
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Request view the rules are evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestData(Value);

impl RequestData {
    pub fn new(params: Map<String, Value>, query: Map<String, Value>, body: Value) -> Self {
        let mut root = Map::new();
        root.insert("params".to_string(), Value::Object(params));
        root.insert("query".to_string(), Value::Object(query));
        root.insert("body".to_string(), body);
        Self(Value::Object(root))
    }

    /// `None` when any segment is missing or the parent is not an object/array.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.0, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    String,
    Boolean,
    Number,
    Object,
    Array,
}

impl JsonKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Number => value.is_number(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Shape check for a request. Returns every field error found.
pub trait Schema: Send + Sync {
    fn check(&self, request: &RequestData) -> Vec<FieldError>;
}

/// Schema described as a flat list of typed paths.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<(String, JsonKind, bool)>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, path: &str, kind: JsonKind) -> Self {
        self.fields.push((path.to_string(), kind, true));
        self
    }

    pub fn optional(mut self, path: &str, kind: JsonKind) -> Self {
        self.fields.push((path.to_string(), kind, false));
        self
    }
}

impl Schema for Shape {
    fn check(&self, request: &RequestData) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|(path, kind, required)| match request.resolve(path) {
                None | Some(Value::Null) if *required => Some(FieldError {
                    path: path.clone(),
                    message: "is required".to_string(),
                }),
                None | Some(Value::Null) => None,
                Some(value) if !kind.matches(value) => Some(FieldError {
                    path: path.clone(),
                    message: format!("should be {kind}"),
                }),
                Some(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{rule}' shape check failed ({} errors)", .errors.len())]
    FieldShape {
        rule: String,
        errors: Vec<FieldError>,
    },

    #[error("'{rule}' field mismatch ({} pairs)", .pairs.len())]
    FieldMismatch {
        rule: String,
        pairs: Vec<(String, String)>,
    },
}

impl ValidationError {
    /// One human-readable detail line per failed field or pair.
    pub fn errors(&self) -> Vec<String> {
        match self {
            Self::FieldShape { errors, .. } => errors.iter().map(ToString::to_string).collect(),
            Self::FieldMismatch { pairs, .. } => pairs
                .iter()
                .map(|(a, b)| format!("{a} should match {b}"))
                .collect(),
        }
    }
}

/// Named rule: schema plus field-equality pairs.
#[derive(Clone)]
pub struct ValidationRule {
    name: String,
    schema: Arc<dyn Schema>,
    matches: Vec<(String, String)>,
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .field("matches", &self.matches)
            .finish()
    }
}

impl ValidationRule {
    pub fn new(name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        Self {
            name: name.into(),
            schema: Arc::new(schema),
            matches: Vec::new(),
        }
    }

    /// Require the values at `a` and `b` to be deeply equal.
    pub fn must_match(mut self, a: &str, b: &str) -> Self {
        self.matches.push((a.to_string(), b.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self, request: &RequestData) -> Result<(), ValidationError> {
        let errors = self.schema.check(request);
        if !errors.is_empty() {
            return Err(ValidationError::FieldShape {
                rule: self.name.clone(),
                errors,
            });
        }

        // Absent equals only absent.
        let pairs: Vec<(String, String)> = self
            .matches
            .iter()
            .filter(|(a, b)| request.resolve(a) != request.resolve(b))
            .cloned()
            .collect();

        if pairs.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldMismatch {
                rule: self.name.clone(),
                pairs,
            })
        }
    }
}
