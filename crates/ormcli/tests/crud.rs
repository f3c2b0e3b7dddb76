//! End-to-end dispatcher tests over the in-memory store and a scripted
//! console.

use ormcli::{
    BufferConsole, ChangeSet, CliResult, Crud, FieldDescriptor, MemoryStore, Model, Record, Store,
    Value, derive_options, register,
};

struct Task;

impl Model for Task {
    fn model_name() -> &'static str {
        "task"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", "primary_key"),
            FieldDescriptor::new("title", "text"),
            FieldDescriptor::new("owner", "string").nullable(),
            FieldDescriptor::new("priority", "int").help("Scheduling priority"),
            FieldDescriptor::new("done", "bool"),
            FieldDescriptor::new("weight", "float").nullable(),
            FieldDescriptor::new("due_date", "date"),
        ]
    }
}

/// Store wrapper counting mutating calls, to assert "no write happened".
struct CountingStore<S: Store> {
    inner: S,
    inserts: usize,
    updates: usize,
    deletes: usize,
}

impl<S: Store> CountingStore<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            inserts: 0,
            updates: 0,
            deletes: 0,
        }
    }
}

impl<S: Store> Store for CountingStore<S> {
    type Model = S::Model;

    fn get(&self, pk: &Value) -> CliResult<Option<Record>> {
        self.inner.get(pk)
    }

    fn insert(&mut self, changes: &ChangeSet) -> CliResult<Value> {
        self.inserts += 1;
        self.inner.insert(changes)
    }

    fn update(&mut self, pk: &Value, changes: &ChangeSet) -> CliResult<u64> {
        self.updates += 1;
        self.inner.update(pk, changes)
    }

    fn delete(&mut self, pk: &Value) -> CliResult<bool> {
        self.deletes += 1;
        self.inner.delete(pk)
    }

    fn select_all(&self) -> CliResult<Vec<Record>> {
        self.inner.select_all()
    }
}

fn crud(answers: impl IntoIterator<Item = bool>) -> Crud<BufferConsole> {
    Crud::new(BufferConsole::answering(answers))
}

fn sample_changes() -> ChangeSet {
    ChangeSet::new()
        .set("title", "write report")
        .set("priority", 2i64)
        .set("done", false)
}

fn seeded() -> (MemoryStore<Task>, Value) {
    let mut store = MemoryStore::new();
    let pk = store.insert(&sample_changes()).unwrap();
    (store, pk)
}

#[test]
fn create_with_force_inserts_exactly_one_retrievable_row() {
    let mut store = MemoryStore::<Task>::new();
    let mut crud = crud([]);

    assert!(crud.create(&mut store, true, &sample_changes()).unwrap());
    assert_eq!(store.len(), 1);

    let record = store.get(&Value::Integer(1)).unwrap().unwrap();
    assert_eq!(record.value("title"), Value::Text("write report".into()));
    assert_eq!(record.value("owner"), Value::Null);

    let output = crud.console().output();
    assert!(output.contains("The following entry was created:"));
    assert!(output.contains("write report"));
}

#[test]
fn create_without_force_previews_and_asks() {
    let mut store = MemoryStore::<Task>::new();
    let mut crud = crud([true]);

    assert!(crud.create(&mut store, false, &sample_changes()).unwrap());
    assert_eq!(store.len(), 1);

    let output = crud.console().output();
    assert!(output.contains("You are about to create the following entry:"));
    // Preview renders every model field, unset ones as NULL.
    assert!(output.contains("due_date"));
    assert!(output.contains("NULL"));
    assert!(output.contains("? Are you sure?"));
}

#[test]
fn create_declined_writes_nothing() {
    let mut store = CountingStore::new(MemoryStore::<Task>::new());
    let mut crud = crud([false]);

    assert!(!crud.create(&mut store, false, &sample_changes()).unwrap());
    assert_eq!(store.inserts, 0);
}

#[test]
fn create_with_malformed_changes_reports_and_skips_store() {
    let mut store = CountingStore::new(MemoryStore::<Task>::new());
    let mut crud = crud([true]);

    let changes = sample_changes().set("no_such_field", "x");
    assert!(!crud.create(&mut store, false, &changes).unwrap());
    assert_eq!(store.inserts, 0);

    let output = crud.console().output();
    assert!(output.contains("Malformed entry:"));
    // Declined before the question: malformed previews never prompt.
    assert!(!output.contains("? Are you sure?"));
}

#[test]
fn show_reports_missing_record() {
    let store = MemoryStore::<Task>::new();
    let mut crud = crud([]);

    assert!(!crud.show(&store, &Value::Integer(42)).unwrap());
    assert!(crud.console().output().contains("Record 42 does not exist."));
}

#[test]
fn show_renders_all_fields_in_declaration_order() {
    let (store, pk) = seeded();
    let mut crud = crud([]);

    assert!(crud.show(&store, &pk).unwrap());
    let output = crud.console().output();
    for field in ["id", "title", "owner", "priority", "done", "weight", "due_date"] {
        assert!(output.contains(field), "missing {field}");
    }
    assert!(output.find("title").unwrap() < output.find("due_date").unwrap());
}

#[test]
fn update_with_empty_changeset_fails_without_store_call() {
    let (inner, pk) = seeded();
    let mut store = CountingStore::new(inner);
    let mut crud = crud([true]);

    assert!(!crud.update(&mut store, &pk, true, &ChangeSet::new()).unwrap());
    assert_eq!(store.updates, 0);
    assert!(crud.console().output().contains("Nothing to change."));
}

#[test]
fn update_with_force_applies_and_reports_count() {
    let (mut store, pk) = seeded();
    let mut crud = crud([]);

    let changes = ChangeSet::new().set("title", "revised").set_null("owner");
    assert!(crud.update(&mut store, &pk, true, &changes).unwrap());

    let record = store.get(&pk).unwrap().unwrap();
    assert_eq!(record.value("title"), Value::Text("revised".into()));
    assert_eq!(record.value("owner"), Value::Null);
    assert!(crud.console().output().contains("Changed 1 records."));
}

#[test]
fn update_missing_record_with_force_reports_zero_and_fails() {
    let mut store = MemoryStore::<Task>::new();
    let mut crud = crud([]);

    let changes = ChangeSet::new().set("title", "revised");
    assert!(!crud.update(&mut store, &Value::Integer(9), true, &changes).unwrap());
    let output = crud.console().output();
    assert!(output.contains("Changed 0 records."));
    assert!(output.contains("Record 9 does not exist."));
}

#[test]
fn update_missing_record_interactive_short_circuits_before_prompt() {
    let mut store = CountingStore::new(MemoryStore::<Task>::new());
    let mut crud = crud([true]);

    let changes = ChangeSet::new().set("title", "revised");
    assert!(!crud.update(&mut store, &Value::Integer(9), false, &changes).unwrap());
    assert_eq!(store.updates, 0);

    let output = crud.console().output();
    assert!(output.contains("Record 9 does not exist."));
    assert!(!output.contains("? Are you sure?"));
}

#[test]
fn update_declined_leaves_record_untouched() {
    let (inner, pk) = seeded();
    let mut store = CountingStore::new(inner);
    let mut crud = crud([false]);

    let changes = ChangeSet::new().set("title", "revised");
    assert!(!crud.update(&mut store, &pk, false, &changes).unwrap());
    assert_eq!(store.updates, 0);
    assert_eq!(
        store.get(&pk).unwrap().unwrap().value("title"),
        Value::Text("write report".into())
    );

    let output = crud.console().output();
    assert!(output.contains("You are about to update the following record:"));
    assert!(output.contains("With the following information:"));
}

#[test]
fn delete_with_force_removes_the_record() {
    let (mut store, pk) = seeded();
    let mut crud = crud([]);

    assert!(crud.delete(&mut store, &pk, true).unwrap());
    assert!(store.is_empty());
    assert!(crud.console().output().contains("Record 1 removed."));
}

#[test]
fn delete_missing_record_fails_without_side_effects() {
    let mut store = CountingStore::new(MemoryStore::<Task>::new());
    let mut crud = crud([]);

    assert!(!crud.delete(&mut store, &Value::Integer(5), true).unwrap());
    assert!(crud.console().output().contains("Record 5 does not exist."));
}

#[test]
fn delete_interactive_shows_record_then_confirms() {
    let (mut store, pk) = seeded();

    let mut declined = crud([false]);
    assert!(!declined.delete(&mut store, &pk, false).unwrap());
    assert_eq!(store.len(), 1);
    assert!(
        declined
            .console()
            .output()
            .contains("You are about to remove the following record:")
    );

    let mut confirmed = crud([true]);
    assert!(confirmed.delete(&mut store, &pk, false).unwrap());
    assert!(store.is_empty());
}

#[test]
fn list_dedups_headers_keeping_first_seen_order() {
    let store = MemoryStore::<Task>::new();
    let mut crud = crud([]);

    assert!(
        crud.list(&store, &["id", "id", "title"], Some(&["title", "done"]))
            .unwrap()
    );

    // Empty store: the rendered table is the header row alone.
    let output = crud.console().output();
    assert_eq!(output.matches("id").count(), 1);
    assert_eq!(output.matches("title").count(), 1);
    assert_eq!(output.matches("done").count(), 1);
    let id = output.find("id").unwrap();
    let title = output.find("title").unwrap();
    let done = output.find("done").unwrap();
    assert!(id < title && title < done);
}

#[test]
fn list_renders_every_record() {
    let (mut store, _) = seeded();
    store
        .insert(
            &ChangeSet::new()
                .set("title", "second task")
                .set("priority", 9i64),
        )
        .unwrap();
    let mut crud = crud([]);

    assert!(crud.list(&store, &["id", "title"], None).unwrap());
    let output = crud.console().output();
    assert!(output.contains("write report"));
    assert!(output.contains("second task"));
}

#[test]
fn parsed_options_flow_into_a_created_record() {
    let specs = derive_options::<Task>(&[]);
    let cmd = register(clap::Command::new("create").no_binary_name(true), &specs);
    let matches = cmd
        .try_get_matches_from([
            "--title",
            "from the command line",
            "--priority",
            "4",
            "--done",
            "true",
            "--due-date",
            "2026-09-01",
            "--owner-set-null",
        ])
        .unwrap();

    let changes = ChangeSet::from_matches(&matches, &specs);
    let mut store = MemoryStore::<Task>::new();
    let mut crud = crud([]);
    assert!(crud.create(&mut store, true, &changes).unwrap());

    let record = store.get(&Value::Integer(1)).unwrap().unwrap();
    assert_eq!(
        record.value("title"),
        Value::Text("from the command line".into())
    );
    assert_eq!(record.value("priority"), Value::Integer(4));
    assert_eq!(record.value("done"), Value::Bool(true));
    assert_eq!(
        record.value("due_date"),
        Value::Date(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    );
    assert_eq!(record.value("owner"), Value::Null);
}
