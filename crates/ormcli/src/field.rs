//! Model field metadata.
//!
//! The `Model` trait is the introspection seam between this library and
//! whatever ORM the caller uses: implement it (usually by hand, or from
//! the ORM's own schema data) and every operation in the crate becomes
//! available for that model.

use serde::Serialize;

/// Metadata describing one persisted field of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Field name, underscored, as declared on the model.
    pub name: String,
    /// Storage-type tag reported by the ORM (`int`, `bool`, `text`, ...).
    ///
    /// Open string on purpose: unrecognized tags degrade to a
    /// string-typed option instead of failing derivation. A foreign key
    /// carries the tag of the key column it references.
    pub db_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Help text for the derived option, if the model declares any.
    pub help: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: db_type.into(),
            nullable: false,
            help: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }
}

/// Static metadata for a persisted model.
pub trait Model {
    /// The model (table) name, used in diagnostics.
    fn model_name() -> &'static str;

    /// All persisted fields, in declaration order.
    ///
    /// Declaration order is the canonical ordering for derived options
    /// and record display.
    fn fields() -> Vec<FieldDescriptor>;

    /// The primary key field name.
    fn primary_key() -> &'static str {
        "id"
    }

    /// Look up one field descriptor by name.
    fn field(name: &str) -> Option<FieldDescriptor> {
        Self::fields().into_iter().find(|f| f.name == name)
    }
}
