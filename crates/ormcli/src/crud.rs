//! Generic CRUD+List dispatch over a model store.
//!
//! Every operation returns `CliResult<bool>`. Expected outcomes — record
//! not found, empty change set, declined confirmation, malformed create
//! preview — are reported through the console and returned as
//! `Ok(false)`; only real backend failures become errors. Mutating
//! operations prompt for confirmation unless invoked with `force`.

use crate::changeset::ChangeSet;
use crate::console::Console;
use crate::error::CliResult;
use crate::field::Model;
use crate::store::{Record, Store};
use crate::table::render_table;
use crate::value::Value;

/// CRUD+List dispatcher. Stateless beyond the console it writes to.
#[derive(Debug, Default)]
pub struct Crud<C: Console> {
    console: C,
}

impl<C: Console> Crud<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Tables are framed by blank lines so they stand out between
    /// messages.
    fn print_table(&mut self, table: &str) {
        self.console.echo(&format!("\n{table}\n"));
    }

    fn record_rows<M: Model>(record: &Record) -> Vec<Vec<String>> {
        M::fields()
            .iter()
            .map(|f| vec![f.name.clone(), record.value(&f.name).to_string()])
            .collect()
    }

    /// Full-field preview of the entry a change set would create.
    ///
    /// Fails when the change set cannot describe a record of the model;
    /// `create` reports that as a malformed entry instead of writing.
    fn preview<M: Model>(changes: &ChangeSet) -> CliResult<Vec<Vec<String>>> {
        changes.validate_for::<M>()?;
        Ok(M::fields()
            .iter()
            .map(|f| {
                let value = changes.get(&f.name).cloned().unwrap_or(Value::Null);
                vec![f.name.clone(), value.to_string()]
            })
            .collect())
    }

    /// C: CREATE
    ///
    /// Insert-only: an existing row with the same key is never updated.
    /// On success the created record is re-read and displayed.
    pub fn create<S: Store>(
        &mut self,
        store: &mut S,
        force: bool,
        changes: &ChangeSet,
    ) -> CliResult<bool> {
        if !force {
            self.console
                .echo("You are about to create the following entry:");
            match Self::preview::<S::Model>(changes) {
                Ok(rows) => self.print_table(&render_table(rows, None)),
                Err(err) => {
                    self.console.echo(&format!("Malformed entry: {err}"));
                    return Ok(false);
                }
            }
            if !self.console.confirm("Are you sure?")? {
                return Ok(false);
            }
        }

        let pk = store.insert(changes)?;
        self.console.echo("The following entry was created:");
        self.show(store, &pk)?;
        Ok(true)
    }

    /// R: READ
    pub fn show<S: Store>(&mut self, store: &S, pk: &Value) -> CliResult<bool> {
        match store.get(pk)? {
            None => {
                self.console.echo(&format!("Record {pk} does not exist."));
                Ok(false)
            }
            Some(record) => {
                self.print_table(&render_table(Self::record_rows::<S::Model>(&record), None));
                Ok(true)
            }
        }
    }

    /// U: UPDATE
    ///
    /// An empty change set fails without touching storage. The update is
    /// a bulk write filtered by primary key; the affected count is
    /// reported and `count > 0` returned.
    pub fn update<S: Store>(
        &mut self,
        store: &mut S,
        pk: &Value,
        force: bool,
        changes: &ChangeSet,
    ) -> CliResult<bool> {
        if changes.is_empty() {
            self.console.echo("Nothing to change.");
            return Ok(false);
        }

        if !force {
            self.console
                .echo("You are about to update the following record:");
            if !self.show(store, pk)? {
                return Ok(false);
            }
            self.console.echo("With the following information:");
            let rows: Vec<Vec<String>> = changes
                .iter()
                .map(|(k, v)| vec![k.to_string(), v.to_string()])
                .collect();
            self.print_table(&render_table(rows, None));
            if !self.console.confirm("Are you sure?")? {
                return Ok(false);
            }
        }

        let count = store.update(pk, changes)?;
        self.console.echo(&format!("Changed {count} records."));
        self.show(store, pk)?;
        Ok(count > 0)
    }

    /// D: DELETE
    ///
    /// The store cascades to dependent records, including
    /// otherwise-non-nullable dependents.
    pub fn delete<S: Store>(&mut self, store: &mut S, pk: &Value, force: bool) -> CliResult<bool> {
        if !force {
            self.console
                .echo("You are about to remove the following record:");
            if !self.show(store, pk)? {
                return Ok(false);
            }
            if !self.console.confirm("Are you sure?")? {
                return Ok(false);
            }
        }

        if store.delete(pk)? {
            self.console.echo(&format!("Record {pk} removed."));
            Ok(true)
        } else {
            self.console.echo(&format!("Record {pk} does not exist."));
            Ok(false)
        }
    }

    /// L: LIST
    ///
    /// Base and extra field names are concatenated and deduplicated,
    /// keeping first-seen order as the column order. No filtering, no
    /// pagination.
    pub fn list<S: Store>(
        &mut self,
        store: &S,
        base_fields: &[&str],
        extra_fields: Option<&[&str]>,
    ) -> CliResult<bool> {
        let mut headers: Vec<&str> = Vec::new();
        for field in base_fields.iter().chain(extra_fields.unwrap_or(&[])) {
            if !headers.contains(field) {
                headers.push(field);
            }
        }

        let records = store.select_all()?;
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| headers.iter().map(|f| r.value(f).to_string()).collect())
            .collect();
        self.print_table(&render_table(rows, Some(&headers)));
        Ok(true)
    }
}
