//! Task admin demo: a full CRUD+List command tree derived from model
//! metadata, backed by the in-memory store.
//!
//! ```text
//! cargo run --example task_admin -- list
//! cargo run --example task_admin -- create --title "ship release" --priority 1 --force
//! cargo run --example task_admin -- update 1 --owner-set-null
//! cargo run --example task_admin -- delete 2
//! ```

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use ormcli::{
    ChangeSet, CliResult, Crud, FieldDescriptor, MemoryStore, Model, Store, TermConsole, Value,
    derive_options, register,
};

struct Task;

impl Model for Task {
    fn model_name() -> &'static str {
        "task"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", "primary_key"),
            FieldDescriptor::new("title", "text").help("Short task title"),
            FieldDescriptor::new("owner", "string").nullable().help("Assignee"),
            FieldDescriptor::new("priority", "int").help("Scheduling priority"),
            FieldDescriptor::new("done", "bool"),
            FieldDescriptor::new("due_date", "date").nullable(),
        ]
    }
}

fn pk_arg() -> Arg {
    Arg::new("pk")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Primary key of the record")
}

fn force_arg() -> Arg {
    Arg::new("force")
        .long("force")
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

fn pk_of(matches: &ArgMatches) -> Value {
    Value::Integer(*matches.get_one::<i64>("pk").unwrap())
}

fn seed(store: &mut MemoryStore<Task>) -> CliResult<()> {
    store.insert(
        &ChangeSet::new()
            .set("title", "triage inbox")
            .set("owner", "alice")
            .set("priority", 1i64)
            .set("done", false),
    )?;
    store.insert(
        &ChangeSet::new()
            .set("title", "write changelog")
            .set("priority", 3i64)
            .set("done", true),
    )?;
    Ok(())
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt().init();

    let specs = derive_options::<Task>(&[]);
    let matches = Command::new("task-admin")
        .about("Manage tasks")
        .subcommand_required(true)
        .subcommand(
            register(Command::new("create").about("Create a task"), &specs).arg(force_arg()),
        )
        .subcommand(Command::new("show").about("Show one task").arg(pk_arg()))
        .subcommand(
            register(Command::new("update").about("Update a task"), &specs)
                .arg(pk_arg())
                .arg(force_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a task")
                .arg(pk_arg())
                .arg(force_arg()),
        )
        .subcommand(
            Command::new("list").about("List all tasks").arg(
                Arg::new("fields")
                    .long("fields")
                    .num_args(1..)
                    .help("Extra columns to display"),
            ),
        )
        .get_matches();

    let mut store = MemoryStore::<Task>::new();
    seed(&mut store)?;
    let mut crud = Crud::new(TermConsole);

    let ok = match matches.subcommand() {
        Some(("create", m)) => {
            let changes = ChangeSet::from_matches(m, &specs);
            crud.create(&mut store, m.get_flag("force"), &changes)?
        }
        Some(("show", m)) => crud.show(&store, &pk_of(m))?,
        Some(("update", m)) => {
            let changes = ChangeSet::from_matches(m, &specs);
            crud.update(&mut store, &pk_of(m), m.get_flag("force"), &changes)?
        }
        Some(("delete", m)) => crud.delete(&mut store, &pk_of(m), m.get_flag("force"))?,
        Some(("list", m)) => {
            let extra: Vec<&str> = m
                .get_many::<String>("fields")
                .map(|vals| vals.map(String::as_str).collect())
                .unwrap_or_default();
            crud.list(&store, &["id", "title", "done"], Some(&extra))?
        }
        _ => unreachable!("subcommand is required"),
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
