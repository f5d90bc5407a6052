//! Structural projection of selection shapes onto schema types.
//!
//! This is the load-bearing step of the pipeline: the projected field list
//! is a pure function of (field signature, selection shape), and the
//! generated result types contain exactly those fields. Anything outside
//! the schema — unknown fields, undeclared variables, empty selections —
//! is a generation-time error here, never a silent drop.

use typeflow_schema::{FieldDef, Schema, TypeDef, TypeRef};
use typeflow_syntax::{OperationDefinition, OperationKind, Selection};

use crate::CodegenError;

/// The projection of one operation document against the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationProjection {
    pub roots: Vec<RootSelection>,
}

/// One selected root field with its projected result shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RootSelection {
    /// The root field definition from the schema graph.
    pub field: FieldDef,
    /// Projected result shape; `None` when the root field is scalar-typed.
    pub object: Option<ProjectedObject>,
}

/// The projection of a selection shape onto one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedObject {
    pub type_name: String,
    pub fields: Vec<ProjectedField>,
}

/// One projected field: name and type reference exactly as declared on
/// the schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedField {
    pub name: String,
    pub ty: TypeRef,
    /// Nested projection when this field is itself object-typed.
    pub object: Option<ProjectedObject>,
}

/// Projects an operation against the schema's root fields.
pub fn project_operation(
    schema: &Schema,
    op: &OperationDefinition,
) -> Result<OperationProjection, CodegenError> {
    let (root_name, root_fields) = match op.kind {
        OperationKind::Query => ("Query", &schema.query),
        OperationKind::Mutation => ("Mutation", &schema.mutation),
    };

    let declared: Vec<&str> = op.variables.iter().map(|v| v.name.as_str()).collect();

    let mut roots = Vec::new();
    for selection in &op.selection_set {
        let field = root_fields.get(&selection.name).ok_or_else(|| {
            CodegenError::UnknownRootField {
                root: root_name.to_string(),
                name: selection.name.clone(),
            }
        })?;

        check_arguments(field, selection, &declared)?;
        let object = project_result(schema, field, selection, &declared)?;
        roots.push(RootSelection {
            field: field.clone(),
            object,
        });
    }

    Ok(OperationProjection { roots })
}

/// Projects a selection shape onto the fields of `type_name`.
///
/// The result contains exactly the selected fields, in selection order,
/// with each field's type reference (and thus nullability) taken from the
/// schema type — fields(S) ∩ fields(T), with S ⊈ T rejected.
pub fn project_selection(
    schema: &Schema,
    type_name: &str,
    selections: &[Selection],
    declared_variables: &[&str],
) -> Result<ProjectedObject, CodegenError> {
    if selections.is_empty() {
        return Err(CodegenError::EmptySelection {
            type_name: type_name.to_string(),
        });
    }

    let Some(object) = schema.object(type_name) else {
        return Err(CodegenError::SelectionOnScalar {
            field: type_name.to_string(),
        });
    };

    let mut fields: Vec<ProjectedField> = Vec::new();
    for selection in selections {
        let field = object.fields.get(&selection.name).ok_or_else(|| {
            CodegenError::UnknownField {
                type_name: type_name.to_string(),
                field: selection.name.clone(),
            }
        })?;

        // A field selected twice projects once.
        if fields.iter().any(|f| f.name == selection.name) {
            continue;
        }

        check_arguments(field, selection, declared_variables)?;
        let nested = project_result(schema, field, selection, declared_variables)?;
        fields.push(ProjectedField {
            name: field.name.clone(),
            ty: field.ty.clone(),
            object: nested,
        });
    }

    Ok(ProjectedObject {
        type_name: type_name.to_string(),
        fields,
    })
}

/// Projects the result side of one selected field: object-typed fields
/// require a sub-selection, scalar and enum fields forbid one.
fn project_result(
    schema: &Schema,
    field: &FieldDef,
    selection: &Selection,
    declared_variables: &[&str],
) -> Result<Option<ProjectedObject>, CodegenError> {
    let result_type = field.ty.named_type();
    match schema.get_type(result_type) {
        Some(TypeDef::Object(_)) => {
            if selection.selection_set.is_empty() {
                return Err(CodegenError::EmptySelection {
                    type_name: result_type.to_string(),
                });
            }
            Ok(Some(project_selection(
                schema,
                result_type,
                &selection.selection_set,
                declared_variables,
            )?))
        }
        _ => {
            if !selection.selection_set.is_empty() {
                return Err(CodegenError::SelectionOnScalar {
                    field: field.name.clone(),
                });
            }
            Ok(None)
        }
    }
}

fn check_arguments(
    field: &FieldDef,
    selection: &Selection,
    declared_variables: &[&str],
) -> Result<(), CodegenError> {
    for arg in &selection.arguments {
        if !field.arguments.contains_key(&arg.name) {
            return Err(CodegenError::UnknownArgument {
                field: field.name.clone(),
                argument: arg.name.clone(),
            });
        }
        if let typeflow_syntax::Value::Variable(name) = &arg.value {
            if !declared_variables.contains(&name.as_str()) {
                return Err(CodegenError::UndeclaredVariable { name: name.clone() });
            }
        }
    }
    Ok(())
}
