//! Field-to-option derivation.
//!
//! Walks a model's field descriptors and yields one typed command-line
//! option per persisted field, skipping primary keys and adding a
//! companion `--<field>-set-null` flag for nullable fields. The derived
//! specs are folded onto a `clap::Command` with [`register`].

use clap::{Arg, ArgAction, Command, value_parser};

use crate::field::Model;
use crate::value::parse_date;

/// Help string used when the model declares none.
pub const FALLBACK_HELP: &str = "No help. Please, document the model.";

/// The option type a storage tag resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Integer,
    Boolean,
    Text,
    Float,
    Date,
    /// Boolean flag clearing a nullable field.
    SetNull,
}

/// Outcome of resolving a storage-type tag against the fixed lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagResolution {
    Typed(OptionKind),
    /// Primary keys are never settable through the CLI.
    PrimaryKey,
    /// Not in the recognized set; derivation degrades to a text option.
    Unknown,
}

/// Resolve a storage-type tag.
pub fn resolve_tag(db_type: &str) -> TagResolution {
    match db_type {
        "int" | "int unsigned" => TagResolution::Typed(OptionKind::Integer),
        "bool" => TagResolution::Typed(OptionKind::Boolean),
        "text" | "string" => TagResolution::Typed(OptionKind::Text),
        "float" => TagResolution::Typed(OptionKind::Float),
        "date" => TagResolution::Typed(OptionKind::Date),
        "primary_key" => TagResolution::PrimaryKey,
        _ => TagResolution::Unknown,
    }
}

/// One derived command-line option.
///
/// `field` is the underscored clap id (`x` or `x_set_null`); `long` is
/// the hyphenated long-option name without the leading dashes.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub field: String,
    pub long: String,
    pub kind: OptionKind,
    pub help: String,
}

impl OptionSpec {
    /// Materialize this spec as a `clap::Arg`.
    pub fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.field.clone())
            .long(self.long.clone())
            .help(self.help.clone());

        match self.kind {
            OptionKind::SetNull => arg.action(ArgAction::SetTrue),
            OptionKind::Boolean => arg.value_parser(value_parser!(bool)),
            OptionKind::Integer => arg.value_parser(value_parser!(i64)),
            OptionKind::Float => arg.value_parser(value_parser!(f64)),
            OptionKind::Text => arg.value_parser(value_parser!(String)),
            OptionKind::Date => arg.value_parser(parse_date).value_name("YYYY-MM-DD"),
        }
    }
}

/// Derive option specs for every persisted field of `M`, in declaration
/// order, omitting primary keys and any name in `skip`.
///
/// Unrecognized storage tags warn through `tracing` and fall back to a
/// text option. Nullable fields yield their `-set-null` flag before the
/// value option.
pub fn derive_options<M: Model>(skip: &[&str]) -> Vec<OptionSpec> {
    let mut specs = Vec::new();

    for field in M::fields() {
        if skip.contains(&field.name.as_str()) {
            continue;
        }

        let kind = match resolve_tag(&field.db_type) {
            TagResolution::PrimaryKey => continue,
            TagResolution::Typed(kind) => kind,
            TagResolution::Unknown => {
                tracing::warn!(
                    model = M::model_name(),
                    field = %field.name,
                    db_type = %field.db_type,
                    "unknown storage type, deriving a string-typed option"
                );
                OptionKind::Text
            }
        };

        let long = field.name.replace('_', "-");

        if field.nullable {
            specs.push(OptionSpec {
                field: format!("{}_set_null", field.name),
                long: format!("{long}-set-null"),
                kind: OptionKind::SetNull,
                help: format!("Set {} to NULL.", field.name),
            });
        }

        specs.push(OptionSpec {
            field: field.name.clone(),
            long,
            kind,
            help: field
                .help
                .clone()
                .unwrap_or_else(|| FALLBACK_HELP.to_string()),
        });
    }

    specs
}

/// Fold the derived specs onto a command, registering every option in
/// order.
pub fn register(cmd: Command, specs: &[OptionSpec]) -> Command {
    specs.iter().fold(cmd, |cmd, spec| cmd.arg(spec.to_arg()))
}
