//! # ormcli
//!
//! Derive a typed CRUD+List command-line interface from ORM model
//! metadata.
//!
//! ## Features
//!
//! - **Mechanical derivation**: one typed `clap` option per persisted
//!   field, primary keys excluded, plus a `--<field>-set-null` flag for
//!   nullable fields
//! - **Generic dispatch**: Create/Read/Update/Delete/List expressed
//!   against a `Store` trait, so any ORM can sit behind it
//! - **Confirmation gates**: mutating operations preview the record and
//!   prompt unless forced
//! - **Expected outcomes are values**: not-found, nothing-to-change, and
//!   declined confirmations report a message and return `false`, never
//!   an error
//!
//! ```ignore
//! use ormcli::{ChangeSet, Crud, MemoryStore, TermConsole, derive_options, register};
//!
//! let specs = derive_options::<Task>(&[]);
//! let cmd = register(clap::Command::new("task"), &specs);
//! let matches = cmd.get_matches();
//!
//! let mut store = MemoryStore::<Task>::new();
//! let mut crud = Crud::new(TermConsole);
//! let changes = ChangeSet::from_matches(&matches, &specs);
//! crud.create(&mut store, false, &changes)?;
//! ```

pub mod args;
pub mod changeset;
pub mod console;
pub mod crud;
pub mod error;
pub mod field;
pub mod options;
pub mod store;
pub mod table;
pub mod value;

pub use args::{max_one, one_and_only_one};
pub use changeset::{ChangeSet, SET_NULL_SUFFIX};
pub use console::{BufferConsole, Console, TermConsole};
pub use crud::Crud;
pub use error::{CliError, CliResult};
pub use field::{FieldDescriptor, Model};
pub use options::{
    FALLBACK_HELP, OptionKind, OptionSpec, TagResolution, derive_options, register, resolve_tag,
};
pub use store::{MemoryStore, Record, Store};
pub use table::render_table;
pub use value::{Value, parse_date};
