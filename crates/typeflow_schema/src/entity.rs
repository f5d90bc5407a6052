//! Backing-store entity descriptors.
//!
//! An entity descriptor declares the storage shape of one record type and
//! marks which columns are exposed through the schema. This is the
//! intentional narrowing point: the storage shape and the public API shape
//! may diverge, and only explicitly exposed fields ever reach the graph.

use serde::{Deserialize, Serialize};

use crate::graph::{ArgumentDef, FieldDef, ObjectDef, TypeRef};

/// Scalar kind of a backing-store column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    /// Opaque identifier.
    Id,
    /// Short text (titles, names).
    Str,
    /// Long-form text (bodies, descriptions).
    Text,
    Int,
    Bool,
}

impl ScalarKind {
    /// The schema scalar this kind maps to.
    pub fn graphql_name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Str | Self::Text => "String",
            Self::Int => "Int",
            Self::Bool => "Boolean",
        }
    }
}

/// One declared column of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityField {
    pub name: String,
    pub kind: ScalarKind,
    pub nullable: bool,
    pub exposed: bool,
}

/// A named record type with a fixed, ordered set of scalar fields.
///
/// Immutable once built; declared once at process start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    name: String,
    fields: Vec<EntityField>,
}

impl EntityDescriptor {
    /// Starts declaring an entity.
    pub fn builder(name: impl Into<String>) -> EntityDescriptorBuilder {
        EntityDescriptorBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The public type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared fields, in declaration order.
    pub fn fields(&self) -> &[EntityField] {
        &self.fields
    }

    /// The fields whitelisted for external visibility.
    pub fn exposed_fields(&self) -> impl Iterator<Item = &EntityField> {
        self.fields.iter().filter(|f| f.exposed)
    }

    /// The object type this descriptor exposes.
    pub(crate) fn to_object(&self) -> ObjectDef {
        let mut object = ObjectDef::new(&self.name);
        for field in self.exposed_fields() {
            object = object.field(FieldDef::new(&field.name, scalar_ref(field)));
        }
        object
    }

    /// The flat argument record of a create mutation: one argument per
    /// exposed non-id field, required unless the field is nullable.
    pub(crate) fn mutation_arguments(&self) -> Vec<ArgumentDef> {
        self.exposed_fields()
            .filter(|f| f.kind != ScalarKind::Id)
            .map(|f| ArgumentDef {
                name: f.name.clone(),
                ty: scalar_ref(f),
            })
            .collect()
    }
}

fn scalar_ref(field: &EntityField) -> TypeRef {
    let named = TypeRef::named(field.kind.graphql_name());
    if field.nullable {
        named
    } else {
        TypeRef::non_null(named)
    }
}

/// Builder for [`EntityDescriptor`].
#[derive(Debug)]
pub struct EntityDescriptorBuilder {
    name: String,
    fields: Vec<EntityField>,
}

impl EntityDescriptorBuilder {
    fn push(mut self, name: impl Into<String>, kind: ScalarKind, nullable: bool, exposed: bool) -> Self {
        self.fields.push(EntityField {
            name: name.into(),
            kind,
            nullable,
            exposed,
        });
        self
    }

    /// Adds the identifier column (exposed, required).
    pub fn id(self, name: impl Into<String>) -> Self {
        self.push(name, ScalarKind::Id, false, true)
    }

    /// Adds a short text column (exposed, required).
    pub fn string(self, name: impl Into<String>) -> Self {
        self.push(name, ScalarKind::Str, false, true)
    }

    /// Adds a long text column (exposed, required).
    pub fn text(self, name: impl Into<String>) -> Self {
        self.push(name, ScalarKind::Text, false, true)
    }

    /// Adds an exposed, nullable column.
    pub fn optional(self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.push(name, kind, true, true)
    }

    /// Adds an internal-only column. It never appears in the schema.
    pub fn internal(self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.push(name, kind, false, false)
    }

    /// Finishes the declaration.
    pub fn build(self) -> EntityDescriptor {
        EntityDescriptor {
            name: self.name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposed_fields_skip_internal_columns() {
        let descriptor = EntityDescriptor::builder("Post")
            .id("id")
            .string("title")
            .internal("createdAt", ScalarKind::Str)
            .build();

        let exposed: Vec<&str> = descriptor
            .exposed_fields()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(exposed, ["id", "title"]);
        assert_eq!(descriptor.fields().len(), 3);
    }

    #[test]
    fn mutation_arguments_skip_id_and_respect_nullability() {
        let descriptor = EntityDescriptor::builder("Post")
            .id("id")
            .string("title")
            .optional("subtitle", ScalarKind::Str)
            .build();

        let args = descriptor.mutation_arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "title");
        assert!(!args[0].ty.is_nullable());
        assert_eq!(args[1].name, "subtitle");
        assert!(args[1].ty.is_nullable());
    }

    #[test]
    fn scalar_kind_names() {
        assert_eq!(ScalarKind::Id.graphql_name(), "ID");
        assert_eq!(ScalarKind::Str.graphql_name(), "String");
        assert_eq!(ScalarKind::Text.graphql_name(), "String");
        assert_eq!(ScalarKind::Int.graphql_name(), "Int");
        assert_eq!(ScalarKind::Bool.graphql_name(), "Boolean");
    }
}
