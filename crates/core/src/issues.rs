//! Validation diagnostics shared by the request validator and the
//! merchant-config / override checks.
//!
//! Every problem found while walking a JSON document is recorded as an
//! [`Issue`] (a field path plus a message).  An [`Issues`] list renders as
//! `"<a.b.0.c>: <message>"` entries joined by `"; "`.
//!
//! The `check_*` helpers walk a [`serde_json::Value`] one field at a time
//! and push an issue for each violation, returning the value when it is
//! usable so callers can keep descending.

use serde_json::{Map, Value};
use std::fmt;

/// One step in a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A field path such as `config.thresholds.variance` or `stats.facets.0.name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path with an object key.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    /// Extend the path with an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: FieldPath,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// An ordered collection of validation problems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issues(Vec<Issue>);

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.0.push(Issue {
            path: path.clone(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: Issues) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected issues.
    pub fn into_result(self) -> Result<(), Issues> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

// ── Field checks ───────────────────────────────────────────────────

/// Whether a missing field is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Numeric constraints for [`check_number`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRule {
    min: Option<f64>,
    max: Option<f64>,
    positive: bool,
    integer: bool,
}

impl NumberRule {
    pub fn any() -> Self {
        Self::default()
    }

    /// Strictly greater than zero.
    pub fn positive() -> Self {
        Self {
            positive: true,
            ..Self::default()
        }
    }

    /// A ratio in `[0, 1]`.
    pub fn unit() -> Self {
        Self::any().min(0.0).max(1.0)
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    fn check(&self, n: f64, path: &FieldPath, issues: &mut Issues) {
        if self.integer && n.fract() != 0.0 {
            issues.push(path, "Expected integer, received float");
        }
        if let Some(min) = self.min {
            if n < min {
                issues.push(path, format!("Number must be greater than or equal to {min}"));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                issues.push(path, format!("Number must be less than or equal to {max}"));
            }
        }
        if self.positive && n <= 0.0 {
            issues.push(path, "Number must be greater than 0");
        }
    }
}

/// Human-readable JSON type name used in "Expected X, received Y" messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Look up `key`, recording `Required` when a required field is absent.
fn lookup<'v>(
    map: &'v Map<String, Value>,
    key: &str,
    path: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) -> Option<&'v Value> {
    match map.get(key) {
        Some(v) => Some(v),
        None => {
            if presence == Presence::Required {
                issues.push(path, "Required");
            }
            None
        }
    }
}

fn mismatch(expected: &str, value: &Value, path: &FieldPath, issues: &mut Issues) {
    issues.push(
        path,
        format!("Expected {expected}, received {}", type_name(value)),
    );
}

/// Require `value` itself to be an object.
pub fn expect_object<'v>(
    value: Option<&'v Value>,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<&'v Map<String, Value>> {
    match value {
        None => {
            issues.push(path, "Required");
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            mismatch("object", other, path, issues);
            None
        }
    }
}

pub fn check_object<'v>(
    map: &'v Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) -> Option<&'v Map<String, Value>> {
    let path = base.key(key);
    match lookup(map, key, &path, presence, issues)? {
        Value::Object(inner) => Some(inner),
        other => {
            mismatch("object", other, &path, issues);
            None
        }
    }
}

pub fn check_string<'v>(
    map: &'v Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) -> Option<&'v str> {
    let path = base.key(key);
    match lookup(map, key, &path, presence, issues)? {
        Value::String(s) => Some(s),
        other => {
            mismatch("string", other, &path, issues);
            None
        }
    }
}

pub fn check_bool(
    map: &Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) -> Option<bool> {
    let path = base.key(key);
    match lookup(map, key, &path, presence, issues)? {
        Value::Bool(b) => Some(*b),
        other => {
            mismatch("boolean", other, &path, issues);
            None
        }
    }
}

pub fn check_number(
    map: &Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    rule: NumberRule,
    issues: &mut Issues,
) -> Option<f64> {
    let path = base.key(key);
    let value = lookup(map, key, &path, presence, issues)?;
    match value.as_f64() {
        Some(n) => {
            rule.check(n, &path, issues);
            Some(n)
        }
        None => {
            mismatch("number", value, &path, issues);
            None
        }
    }
}

/// A string restricted to one of `allowed`.
pub fn check_enum<'v>(
    map: &'v Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    allowed: &[&str],
    issues: &mut Issues,
) -> Option<&'v str> {
    let path = base.key(key);
    let value = lookup(map, key, &path, presence, issues)?;
    let expected = allowed
        .iter()
        .map(|a| format!("'{a}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    match value {
        Value::String(s) if allowed.contains(&s.as_str()) => Some(s),
        Value::String(s) => {
            issues.push(
                &path,
                format!("Invalid enum value. Expected {expected}, received '{s}'"),
            );
            None
        }
        other => {
            mismatch(&expected, other, &path, issues);
            None
        }
    }
}

pub fn check_array<'v>(
    map: &'v Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) -> Option<&'v Vec<Value>> {
    let path = base.key(key);
    match lookup(map, key, &path, presence, issues)? {
        Value::Array(items) => Some(items),
        other => {
            mismatch("array", other, &path, issues);
            None
        }
    }
}

/// An array whose every element must be a string.
pub fn check_string_array(
    map: &Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) {
    let path = base.key(key);
    if let Some(items) = check_array(map, key, base, presence, issues) {
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                mismatch("string", item, &path.index(i), issues);
            }
        }
    }
}

/// An object used as a `string → string` map.
pub fn check_string_record(
    map: &Map<String, Value>,
    key: &str,
    base: &FieldPath,
    presence: Presence,
    issues: &mut Issues,
) {
    let path = base.key(key);
    if let Some(record) = check_object(map, key, base, presence, issues) {
        for (k, v) in record {
            if !v.is_string() {
                mismatch("string", v, &path.key(k), issues);
            }
        }
    }
}

/// Record every key of `map` that is not in `allowed` (strict objects).
pub fn reject_unknown_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    path: &FieldPath,
    issues: &mut Issues,
) {
    let unknown: Vec<String> = map
        .keys()
        .filter(|k| !allowed.contains(&k.as_str()))
        .map(|k| format!("'{k}'"))
        .collect();
    if !unknown.is_empty() {
        issues.push(
            path,
            format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
        );
    }
}
