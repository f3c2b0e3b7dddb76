//! The store seam and a reference in-memory backend.
//!
//! `Store<M>` is everything the CRUD dispatcher needs from a persistence
//! layer. "Does not exist" is signaled through `Option`/counts, never
//! through errors; errors are reserved for real backend failures.

use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::changeset::ChangeSet;
use crate::error::{CliError, CliResult};
use crate::field::Model;
use crate::value::Value;

/// One stored row: field name to value, in model declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Value for display; absent fields render as NULL.
    pub fn value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or(Value::Null)
    }
}

/// Persistence operations for one model.
///
/// Synchronous by design: each dispatcher call performs at most two
/// round trips, with an optional confirmation prompt in between.
pub trait Store {
    /// The model this store persists.
    type Model: Model;

    /// Look up a record by primary key.
    fn get(&self, pk: &Value) -> CliResult<Option<Record>>;

    /// Insert a new record. Insert-only: an existing row with the same
    /// key is an error, never an update. Returns the (possibly
    /// generated) primary key.
    fn insert(&mut self, changes: &ChangeSet) -> CliResult<Value>;

    /// Bulk update filtered by primary key. Returns the affected count.
    fn update(&mut self, pk: &Value, changes: &ChangeSet) -> CliResult<u64>;

    /// Delete by primary key, cascading to dependent records (including
    /// otherwise-non-nullable dependents). Returns whether a record was
    /// removed.
    fn delete(&mut self, pk: &Value) -> CliResult<bool>;

    /// Every record, in storage order.
    fn select_all(&self) -> CliResult<Vec<Record>>;
}

/// Reference `Store` backend over an in-memory row map with sequential
/// integer primary keys.
///
/// Holds no relations, so its cascade is trivial. It exists to exercise
/// the dispatcher without a database and to pin down the store contract.
#[derive(Debug)]
pub struct MemoryStore<M: Model> {
    rows: IndexMap<i64, Record>,
    next_id: i64,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> MemoryStore<M> {
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
            next_id: 0,
            _model: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn key_of(pk: &Value) -> Option<i64> {
        match pk {
            Value::Integer(id) => Some(*id),
            Value::Text(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl<M: Model> Default for MemoryStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Store for MemoryStore<M> {
    type Model = M;

    fn get(&self, pk: &Value) -> CliResult<Option<Record>> {
        Ok(Self::key_of(pk).and_then(|id| self.rows.get(&id).cloned()))
    }

    fn insert(&mut self, changes: &ChangeSet) -> CliResult<Value> {
        changes.validate_for::<M>()?;

        let pk_field = M::primary_key();
        let id = match changes.get(pk_field) {
            Some(Value::Integer(id)) => *id,
            _ => {
                self.next_id += 1;
                self.next_id
            }
        };
        if self.rows.contains_key(&id) {
            return Err(CliError::storage(format!("duplicate primary key {id}")));
        }

        let mut record = Record::new();
        for field in M::fields() {
            let value = if field.name == pk_field {
                Value::Integer(id)
            } else {
                changes.get(&field.name).cloned().unwrap_or(Value::Null)
            };
            record.insert(field.name, value);
        }
        self.rows.insert(id, record);
        Ok(Value::Integer(id))
    }

    fn update(&mut self, pk: &Value, changes: &ChangeSet) -> CliResult<u64> {
        changes.validate_for::<M>()?;

        let Some(record) = Self::key_of(pk).and_then(|id| self.rows.get_mut(&id)) else {
            return Ok(0);
        };
        for (field, value) in changes.iter() {
            record.insert(field, value.clone());
        }
        Ok(1)
    }

    fn delete(&mut self, pk: &Value) -> CliResult<bool> {
        Ok(Self::key_of(pk)
            .and_then(|id| self.rows.shift_remove(&id))
            .is_some())
    }

    fn select_all(&self) -> CliResult<Vec<Record>> {
        Ok(self.rows.values().cloned().collect())
    }
}
