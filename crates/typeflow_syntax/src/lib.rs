//! SDL text layer for typeflow.
//!
//! The interchange artifact is plain SDL text; this crate owns both
//! directions of that boundary:
//! - `lexer` / `parser`: SDL type definitions and operation documents →
//!   syntax tree → schema graph
//! - `render`: schema graph → canonical SDL text (deterministic, so the
//!   published artifact is byte-identical for an unchanged graph)

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod token;

pub use ast::{
    Argument, Document, FieldDefinition, InputValueDefinition, OperationDefinition, OperationKind,
    Selection, TypeDefinition, TypeNode, Value, VariableDefinition,
};
pub use parser::{parse_document, ParseError};
pub use render::{render_operation, render_schema};

use typeflow_schema::{Schema, SchemaError};

/// An error from the textual layer.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Parses SDL source into a finished schema graph.
///
/// Operation definitions in the source are ignored; use [`parse_document`]
/// to get at them.
pub fn parse_schema(source: &str) -> Result<Schema, SyntaxError> {
    let document = parse_document(source)?;
    Ok(ast::document_to_schema(&document)?)
}
