//! Schema graph model and code-first builder for typeflow.
//!
//! This crate owns the server-side half of the type-flow pipeline:
//! - `graph`: the immutable schema graph (types, root fields, references)
//! - `entity`: backing-store entity descriptors and the whitelisting step
//!   that turns them into exposed object types
//! - `error`: fatal schema-construction errors
//!
//! A schema is built exactly once, at startup, and is read-only afterwards.

pub mod entity;
pub mod error;
pub mod graph;

pub use entity::{EntityDescriptor, EntityDescriptorBuilder, EntityField, ScalarKind};
pub use error::SchemaError;
pub use graph::{
    ArgumentDef, EnumDef, FieldDef, ObjectDef, Schema, SchemaBuilder, TypeDef, TypeRef,
};
