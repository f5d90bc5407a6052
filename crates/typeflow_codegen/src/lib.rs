//! Typed request generation.
//!
//! Reads the published SDL artifact plus a set of operation documents (one
//! per call site) and emits a Rust module of typed operations. Each
//! operation's result type is the structural projection of the schema's
//! result type onto the operation's selection shape — exactly the selected
//! fields, with nullability preserved, never more, never less.
//!
//! ```ignore
//! use typeflow_codegen::{generate, CodegenOptions};
//!
//! let code = generate(&sdl, &[operations], &CodegenOptions::default())?;
//! std::fs::write("src/generated.rs", code)?;
//! ```

mod project;
mod rust;

pub use project::{project_operation, project_selection, OperationProjection, ProjectedField,
    ProjectedObject, RootSelection};
pub use rust::RustGenerator;

use thiserror::Error;
use typeflow_syntax::{parse_document, OperationDefinition, SyntaxError};

/// Code generation options.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Crate path the generated code imports the operation contract from.
    pub sdk_crate: String,
    /// Emit the "generated, do not edit" header.
    pub header: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            sdk_crate: "typeflow_sdk".to_string(),
            header: true,
        }
    }
}

/// A generation-time failure.
///
/// All of these indicate a broken build-time contract; they abort the
/// generation step and are never caught and retried.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Generated operations become type names, so they must be named.
    #[error("operation is missing a name")]
    AnonymousOperation,

    #[error("duplicate operation name `{name}`")]
    DuplicateOperation { name: String },

    #[error("unknown {root} field `{name}`")]
    UnknownRootField { root: String, name: String },

    #[error("unknown field `{field}` on type `{type_name}`")]
    UnknownField { type_name: String, field: String },

    #[error("unknown argument `{argument}` on field `{field}`")]
    UnknownArgument { field: String, argument: String },

    #[error("variable `${name}` is not declared by the operation")]
    UndeclaredVariable { name: String },

    /// Selecting zero fields from an object type is rejected outright;
    /// it must never produce a silently empty type.
    #[error("empty selection on object type `{type_name}`")]
    EmptySelection { type_name: String },

    #[error("field `{field}` is not an object; it cannot have a sub-selection")]
    SelectionOnScalar { field: String },

    #[error("variable `${name}` has unsupported type `{type_name}`")]
    UnsupportedVariableType { name: String, type_name: String },
}

/// Parses the artifact and operation sources, then generates the Rust
/// module. Convenience wrapper over [`RustGenerator`].
pub fn generate(
    sdl: &str,
    operation_sources: &[&str],
    options: &CodegenOptions,
) -> Result<String, CodegenError> {
    let schema = typeflow_syntax::parse_schema(sdl)?;

    let mut operations: Vec<OperationDefinition> = Vec::new();
    for source in operation_sources {
        let document = parse_document(source).map_err(SyntaxError::from)?;
        operations.extend(document.operations);
    }

    RustGenerator::new(&schema, &operations, options).generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codegen_options_default() {
        let options = CodegenOptions::default();
        assert_eq!(options.sdk_crate, "typeflow_sdk");
        assert!(options.header);
    }
}
