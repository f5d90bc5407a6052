//! Fatal schema-construction errors.

use thiserror::Error;

/// An error detected while building the schema graph.
///
/// These are configuration errors: they surface at process start and must
/// block startup entirely. Nothing in this crate catches or retries them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Two declarations claim the same public type name with incompatible
    /// shapes.
    #[error("conflicting declarations for type `{name}`")]
    ConflictingType { name: String },

    /// A field or argument references a type that is not declared.
    #[error("`{owner}.{field}` references undeclared type `{reference}`")]
    UnresolvedReference {
        owner: String,
        field: String,
        reference: String,
    },

    /// Two root fields share a name on the same root.
    #[error("duplicate {root} field `{name}`")]
    DuplicateRootField { root: String, name: String },
}
