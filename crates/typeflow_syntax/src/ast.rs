//! Syntax tree for SDL and operation documents.

use typeflow_schema::{
    EnumDef, FieldDef, ObjectDef, Schema, SchemaBuilder, SchemaError, TypeRef,
};

/// A parsed document: type definitions and/or operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub types: Vec<TypeDefinition>,
    pub operations: Vec<OperationDefinition>,
}

/// A type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Object {
        name: String,
        fields: Vec<FieldDefinition>,
    },
    Enum {
        name: String,
        values: Vec<String>,
    },
}

/// A field definition inside an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: TypeNode,
}

/// An argument definition on a field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub ty: TypeNode,
}

/// A type reference as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Named(String),
    NonNull(Box<TypeNode>),
    List(Box<TypeNode>),
}

impl TypeNode {
    /// Converts the syntactic reference into a graph reference.
    pub fn to_type_ref(&self) -> TypeRef {
        match self {
            Self::Named(name) => TypeRef::named(name.clone()),
            Self::NonNull(inner) => TypeRef::non_null(inner.to_type_ref()),
            Self::List(inner) => TypeRef::list(inner.to_type_ref()),
        }
    }
}

/// Which root an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// An operation document: the call-site shape of one typed request.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    /// Anonymous operations parse, but the generator requires a name.
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub selection_set: Vec<Selection>,
}

/// A variable declared by an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: TypeNode,
}

/// A selected field, possibly with arguments and a nested selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub selection_set: Vec<Selection>,
}

/// An argument applied at a call site.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

/// An argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    String(String),
    Boolean(bool),
    Enum(String),
    Null,
}

/// Rebuilds the schema graph from parsed type definitions.
///
/// `Query` and `Mutation` object definitions become root fields; all other
/// definitions become graph types. The usual construction-time validation
/// (conflicts, reference resolution) applies.
pub fn document_to_schema(document: &Document) -> Result<Schema, SchemaError> {
    let mut builder = SchemaBuilder::new();

    for def in &document.types {
        match def {
            TypeDefinition::Object { name, fields } if name == "Query" => {
                for field in fields {
                    builder = builder.query(to_field_def(field));
                }
            }
            TypeDefinition::Object { name, fields } if name == "Mutation" => {
                for field in fields {
                    builder = builder.mutation(to_field_def(field));
                }
            }
            TypeDefinition::Object { name, fields } => {
                let mut object = ObjectDef::new(name);
                for field in fields {
                    object = object.field(to_field_def(field));
                }
                builder = builder.object(object);
            }
            TypeDefinition::Enum { name, values } => {
                builder = builder.enumeration(EnumDef {
                    name: name.clone(),
                    values: values.clone(),
                });
            }
        }
    }

    builder.build()
}

fn to_field_def(field: &FieldDefinition) -> FieldDef {
    let mut def = FieldDef::new(&field.name, field.ty.to_type_ref());
    for arg in &field.arguments {
        def = def.argument(&arg.name, arg.ty.to_type_ref());
    }
    def
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_node_round_trips_to_type_ref() {
        let node = TypeNode::NonNull(Box::new(TypeNode::List(Box::new(TypeNode::NonNull(
            Box::new(TypeNode::Named("Post".to_string())),
        )))));
        let ty = node.to_type_ref();
        assert_eq!(ty.named_type(), "Post");
        assert!(!ty.is_nullable());
    }

    #[test]
    fn roots_are_split_out_of_the_type_map() {
        let document = Document {
            types: vec![
                TypeDefinition::Object {
                    name: "Post".to_string(),
                    fields: vec![FieldDefinition {
                        name: "id".to_string(),
                        arguments: vec![],
                        ty: TypeNode::NonNull(Box::new(TypeNode::Named("ID".to_string()))),
                    }],
                },
                TypeDefinition::Object {
                    name: "Query".to_string(),
                    fields: vec![FieldDefinition {
                        name: "posts".to_string(),
                        arguments: vec![],
                        ty: TypeNode::Named("Post".to_string()),
                    }],
                },
            ],
            operations: vec![],
        };

        let schema = document_to_schema(&document).unwrap();
        assert!(schema.object("Post").is_some());
        assert!(schema.get_type("Query").is_none());
        assert!(schema.query_field("posts").is_some());
    }
}
