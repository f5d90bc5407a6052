//! The schema graph: exposed types, root fields, and type references.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::EntityDescriptor;
use crate::error::SchemaError;

/// Names of the built-in scalar types.
pub const BUILTIN_SCALARS: [&str; 5] = ["ID", "String", "Int", "Float", "Boolean"];

/// A reference to a type inside the graph.
///
/// Follows SDL semantics: a bare named reference is nullable, `NonNull`
/// and `List` wrap an inner reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Named(String),
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// The innermost named type this reference points at.
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.named_type(),
        }
    }

    /// Whether a value of this type may be null at the outermost level.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, Self::NonNull(_))
    }
}

/// A field on an object type or a root operation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: IndexMap<String, ArgumentDef>,
}

impl FieldDef {
    /// A plain field with no arguments.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            arguments: IndexMap::new(),
        }
    }

    /// Adds an argument to the field.
    pub fn argument(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        let name = name.into();
        self.arguments.insert(name.clone(), ArgumentDef { name, ty });
        self
    }
}

/// An argument accepted by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDef {
    pub name: String,
    pub ty: TypeRef,
}

/// An object type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    pub fields: IndexMap<String, FieldDef>,
}

impl ObjectDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds a field to the object.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }
}

/// An enum type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

/// A type definition in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDef {
    Scalar(String),
    Object(ObjectDef),
    Enum(EnumDef),
}

impl TypeDef {
    /// The declared name of the type.
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(name) => name,
            Self::Object(obj) => &obj.name,
            Self::Enum(e) => &e.name,
        }
    }
}

/// The finished, immutable schema graph.
///
/// `Query` and `Mutation` are kept as distinguished root-field maps rather
/// than ordinary object types; everything else lives in `types`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub types: IndexMap<String, TypeDef>,
    pub query: IndexMap<String, FieldDef>,
    pub mutation: IndexMap<String, FieldDef>,
}

impl Schema {
    /// Gets a type by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Gets an object type by name.
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        match self.types.get(name) {
            Some(TypeDef::Object(obj)) => Some(obj),
            _ => None,
        }
    }

    /// Gets a query root field by name.
    pub fn query_field(&self, name: &str) -> Option<&FieldDef> {
        self.query.get(name)
    }

    /// Gets a mutation root field by name.
    pub fn mutation_field(&self, name: &str) -> Option<&FieldDef> {
        self.mutation.get(name)
    }

    /// True if `name` is one of the built-in scalars.
    pub fn is_scalar(&self, name: &str) -> bool {
        matches!(self.types.get(name), Some(TypeDef::Scalar(_)))
    }
}

/// Where a root field is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    Query,
    Mutation,
}

/// Builder for the schema graph.
///
/// Registration never fails on its own; all validation (duplicate type
/// conflicts, reference resolution) happens in [`SchemaBuilder::build`],
/// which consumes the builder and returns the read-only [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    objects: Vec<ObjectDef>,
    enums: Vec<EnumDef>,
    roots: Vec<(Root, FieldDef)>,
}

impl SchemaBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object type built from the exposed fields of an entity
    /// descriptor. Internal-only columns never reach the graph.
    pub fn entity(self, descriptor: &EntityDescriptor) -> Self {
        self.object(descriptor.to_object())
    }

    /// Registers an object type directly.
    pub fn object(mut self, object: ObjectDef) -> Self {
        self.objects.push(object);
        self
    }

    /// Registers an enum type.
    pub fn enumeration(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    /// Registers a list query for an entity.
    ///
    /// The public contract is part of the field signature:
    /// `name(orderBy: <Entity>Order, limit: Int): [Entity!]!`, with an
    /// `<Entity>Order` enum of `ID_ASC`/`ID_DESC`. Callers can pick a
    /// deterministic order and bound the result count; neither is hidden.
    pub fn list_query(mut self, name: impl Into<String>, descriptor: &EntityDescriptor) -> Self {
        let entity = descriptor.name().to_string();
        let order_enum = format!("{entity}Order");
        self.enums.push(EnumDef {
            name: order_enum.clone(),
            values: vec!["ID_ASC".to_string(), "ID_DESC".to_string()],
        });

        let field = FieldDef::new(
            name,
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(entity)))),
        )
        .argument("orderBy", TypeRef::named(order_enum))
        .argument("limit", TypeRef::named("Int"));
        self.roots.push((Root::Query, field));
        self
    }

    /// Registers a create mutation for an entity.
    ///
    /// Arguments are a flat record: one per exposed non-id field, required
    /// unless the field is nullable. The mutation returns the created
    /// entity in full, so one round trip yields confirmation and state.
    pub fn create_mutation(
        mut self,
        name: impl Into<String>,
        descriptor: &EntityDescriptor,
    ) -> Self {
        let mut field = FieldDef::new(
            name,
            TypeRef::non_null(TypeRef::named(descriptor.name())),
        );
        for arg in descriptor.mutation_arguments() {
            field.arguments.insert(arg.name.clone(), arg);
        }
        self.roots.push((Root::Mutation, field));
        self
    }

    /// Registers a query root field directly.
    pub fn query(mut self, field: FieldDef) -> Self {
        self.roots.push((Root::Query, field));
        self
    }

    /// Registers a mutation root field directly.
    pub fn mutation(mut self, field: FieldDef) -> Self {
        self.roots.push((Root::Mutation, field));
        self
    }

    /// Validates everything registered so far and returns the immutable
    /// schema.
    ///
    /// Errors here are configuration errors: they must abort startup, never
    /// be retried at request time.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut schema = Schema::default();
        for name in BUILTIN_SCALARS {
            schema
                .types
                .insert(name.to_string(), TypeDef::Scalar(name.to_string()));
        }

        for object in self.objects {
            match schema.types.get(&object.name) {
                None => {
                    schema
                        .types
                        .insert(object.name.clone(), TypeDef::Object(object));
                }
                // Re-registering an identical declaration is allowed.
                Some(TypeDef::Object(existing)) if existing.fields == object.fields => {}
                Some(_) => {
                    return Err(SchemaError::ConflictingType { name: object.name });
                }
            }
        }

        for def in self.enums {
            match schema.types.get(&def.name) {
                None => {
                    schema.types.insert(def.name.clone(), TypeDef::Enum(def));
                }
                Some(TypeDef::Enum(existing)) if existing.values == def.values => {}
                Some(_) => {
                    return Err(SchemaError::ConflictingType { name: def.name });
                }
            }
        }

        for (root, field) in self.roots {
            let (root_name, map) = match root {
                Root::Query => ("Query", &mut schema.query),
                Root::Mutation => ("Mutation", &mut schema.mutation),
            };
            if map.contains_key(&field.name) {
                return Err(SchemaError::DuplicateRootField {
                    root: root_name.to_string(),
                    name: field.name,
                });
            }
            map.insert(field.name.clone(), field);
        }

        resolve_references(&schema)?;
        Ok(schema)
    }
}

/// Checks that every type reference in the graph resolves to a declared
/// type or built-in scalar.
fn resolve_references(schema: &Schema) -> Result<(), SchemaError> {
    let check = |owner: &str, field: &FieldDef| -> Result<(), SchemaError> {
        let mut refs = vec![(field.ty.named_type(), field.name.as_str())];
        for arg in field.arguments.values() {
            refs.push((arg.ty.named_type(), field.name.as_str()));
        }
        for (reference, field_name) in refs {
            if !schema.types.contains_key(reference) {
                return Err(SchemaError::UnresolvedReference {
                    owner: owner.to_string(),
                    field: field_name.to_string(),
                    reference: reference.to_string(),
                });
            }
        }
        Ok(())
    };

    for def in schema.types.values() {
        if let TypeDef::Object(obj) = def {
            for field in obj.fields.values() {
                check(&obj.name, field)?;
            }
        }
    }
    for field in schema.query.values() {
        check("Query", field)?;
    }
    for field in schema.mutation.values() {
        check("Mutation", field)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityDescriptor, ScalarKind};

    fn post() -> EntityDescriptor {
        EntityDescriptor::builder("Post")
            .id("id")
            .string("title")
            .text("body")
            .internal("createdAt", ScalarKind::Str)
            .build()
    }

    #[test]
    fn entity_exposes_only_whitelisted_fields() {
        let schema = SchemaBuilder::new().entity(&post()).build().unwrap();
        let obj = schema.object("Post").unwrap();

        let names: Vec<&str> = obj.fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["id", "title", "body"]);
        assert!(!obj.fields.contains_key("createdAt"));
    }

    #[test]
    fn list_query_surfaces_order_and_limit() {
        let schema = SchemaBuilder::new()
            .entity(&post())
            .list_query("posts", &post())
            .build()
            .unwrap();

        let field = schema.query_field("posts").unwrap();
        assert_eq!(field.ty.named_type(), "Post");
        assert!(!field.ty.is_nullable());

        let args: Vec<&str> = field.arguments.keys().map(String::as_str).collect();
        assert_eq!(args, ["orderBy", "limit"]);
        assert_eq!(
            field.arguments["orderBy"].ty,
            TypeRef::named("PostOrder")
        );

        match schema.get_type("PostOrder").unwrap() {
            TypeDef::Enum(e) => assert_eq!(e.values, ["ID_ASC", "ID_DESC"]),
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn create_mutation_takes_flat_required_arguments() {
        let schema = SchemaBuilder::new()
            .entity(&post())
            .create_mutation("createPost", &post())
            .build()
            .unwrap();

        let field = schema.mutation_field("createPost").unwrap();
        assert_eq!(field.ty, TypeRef::non_null(TypeRef::named("Post")));

        let args: Vec<&str> = field.arguments.keys().map(String::as_str).collect();
        assert_eq!(args, ["title", "body"]);
        assert!(!field.arguments["title"].ty.is_nullable());
        assert!(!field.arguments["body"].ty.is_nullable());
    }

    #[test]
    fn identical_redeclaration_is_accepted() {
        let schema = SchemaBuilder::new()
            .entity(&post())
            .entity(&post())
            .build()
            .unwrap();
        assert!(schema.object("Post").is_some());
    }

    #[test]
    fn conflicting_type_names_fail_at_build() {
        let other = EntityDescriptor::builder("Post")
            .id("id")
            .string("headline")
            .build();

        let err = SchemaBuilder::new()
            .entity(&post())
            .entity(&other)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ConflictingType { name } if name == "Post"));
    }

    #[test]
    fn unresolved_reference_fails_at_build() {
        let field = FieldDef::new("author", TypeRef::named("User"));
        let object = ObjectDef::new("Post").field(field);

        let err = SchemaBuilder::new().object(object).build().unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvedReference { ref reference, .. } if reference == "User"
        ));
    }

    #[test]
    fn duplicate_root_field_fails_at_build() {
        let err = SchemaBuilder::new()
            .entity(&post())
            .list_query("posts", &post())
            .query(FieldDef::new("posts", TypeRef::named("Post")))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateRootField { ref name, .. } if name == "posts"));
    }

    #[test]
    fn type_ref_accessors() {
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("Post"))));
        assert_eq!(ty.named_type(), "Post");
        assert!(!ty.is_nullable());
        assert!(TypeRef::named("Post").is_nullable());
    }
}
