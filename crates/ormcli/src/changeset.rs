//! Change sets: the field assignments submitted for one create or update.
//!
//! A change set is layered: explicit null-clears (from `--<field>-set-null`
//! flags) sit above direct value assignments, so a field named in both
//! layers resolves to NULL.

use clap::ArgMatches;
use indexmap::IndexMap;

use crate::error::{CliError, CliResult};
use crate::field::Model;
use crate::options::{OptionKind, OptionSpec, TagResolution, resolve_tag};
use crate::value::Value;

/// Suffix that marks a parsed key as a null-clear request.
pub const SET_NULL_SUFFIX: &str = "_set_null";

/// Field-to-new-value assignments for a single create or update call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Null layer, consulted before `values`. Entries are always `Null`.
    nulls: IndexMap<String, Value>,
    values: IndexMap<String, Value>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a change set from parsed option pairs.
    ///
    /// Keys ending in `_set_null` with a true flag become null-clears for
    /// their base field; other keys with a non-null value become direct
    /// assignments. Everything else (false flags, absent values) is
    /// dropped, so unset options never produce implicit defaults.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            let key = key.into();
            match key.strip_suffix(SET_NULL_SUFFIX) {
                Some(base) => {
                    if value == Value::Bool(true) {
                        set.nulls.insert(base.to_string(), Value::Null);
                    }
                }
                None => {
                    if !value.is_null() {
                        set.values.insert(key, value);
                    }
                }
            }
        }
        set
    }

    /// Extract a change set from clap matches using the specs the options
    /// were derived from.
    pub fn from_matches(matches: &ArgMatches, specs: &[OptionSpec]) -> Self {
        let pairs = specs.iter().filter_map(|spec| {
            let value = match spec.kind {
                OptionKind::SetNull => Value::Bool(matches.get_flag(&spec.field)),
                OptionKind::Boolean => match matches.get_one::<bool>(&spec.field) {
                    Some(v) => Value::Bool(*v),
                    None => return None,
                },
                OptionKind::Integer => match matches.get_one::<i64>(&spec.field) {
                    Some(v) => Value::Integer(*v),
                    None => return None,
                },
                OptionKind::Float => match matches.get_one::<f64>(&spec.field) {
                    Some(v) => Value::Float(*v),
                    None => return None,
                },
                OptionKind::Text => match matches.get_one::<String>(&spec.field) {
                    Some(v) => Value::Text(v.clone()),
                    None => return None,
                },
                OptionKind::Date => match matches.get_one::<chrono::NaiveDate>(&spec.field) {
                    Some(v) => Value::Date(*v),
                    None => return None,
                },
            };
            Some((spec.field.clone(), value))
        });
        Self::from_pairs(pairs)
    }

    /// Record one direct assignment. Convenience for programmatic callers.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Record one null-clear.
    pub fn set_null(mut self, field: impl Into<String>) -> Self {
        self.nulls.insert(field.into(), Value::Null);
        self
    }

    /// Resolve a field, null layer first.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.nulls.get(field).or_else(|| self.values.get(field))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.nulls.contains_key(field) || self.values.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.nulls.is_empty() && self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nulls.len()
            + self
                .values
                .keys()
                .filter(|k| !self.nulls.contains_key(*k))
                .count()
    }

    /// Check that this change set can describe a record of `M`: every
    /// field must exist on the model, null-clears must target nullable
    /// fields, and value kinds must match the field's storage type.
    pub fn validate_for<M: Model>(&self) -> CliResult<()> {
        for (name, value) in self.iter() {
            let Some(field) = M::field(name) else {
                return Err(CliError::UnknownField(name.to_string()));
            };

            if value.is_null() {
                if !field.nullable {
                    return Err(CliError::type_mismatch(name, "field is not nullable"));
                }
                continue;
            }

            let expected = match resolve_tag(&field.db_type) {
                TagResolution::Typed(kind) => kind,
                TagResolution::PrimaryKey => OptionKind::Integer,
                TagResolution::Unknown => OptionKind::Text,
            };
            let matches_kind = matches!(
                (expected, value),
                (OptionKind::Integer, Value::Integer(_))
                    | (OptionKind::Boolean, Value::Bool(_))
                    | (OptionKind::Text, Value::Text(_))
                    | (OptionKind::Float, Value::Float(_))
                    | (OptionKind::Date, Value::Date(_))
            );
            if !matches_kind {
                return Err(CliError::type_mismatch(
                    name,
                    format!("expected {expected:?}, got {}", value.kind_name()),
                ));
            }
        }
        Ok(())
    }

    /// Iterate the merged view: null-clears first, then assignments not
    /// shadowed by a null-clear.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.nulls
            .iter()
            .chain(
                self.values
                    .iter()
                    .filter(|(k, _)| !self.nulls.contains_key(*k)),
            )
            .map(|(k, v)| (k.as_str(), v))
    }
}
