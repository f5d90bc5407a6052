//! Rust emitter for typed operations.
//!
//! Emits one module containing the schema's enums plus, per operation
//! document: a marker struct, a variables struct, result structs shaped by
//! the projection, and a `TypedOperation` impl carrying the canonical
//! operation text. Output is deterministic for unchanged inputs.

use tracing::debug;
use typeflow_schema::{Schema, TypeDef, TypeRef};
use typeflow_syntax::{render_operation, OperationDefinition, OperationKind};

use crate::project::{project_operation, ProjectedObject};
use crate::{CodegenError, CodegenOptions};

/// Generates the Rust module for a set of operations.
pub struct RustGenerator<'a> {
    schema: &'a Schema,
    operations: &'a [OperationDefinition],
    options: &'a CodegenOptions,
}

impl<'a> RustGenerator<'a> {
    /// Creates a new generator.
    pub fn new(
        schema: &'a Schema,
        operations: &'a [OperationDefinition],
        options: &'a CodegenOptions,
    ) -> Self {
        Self {
            schema,
            operations,
            options,
        }
    }

    /// Generates the module source.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut ops = Vec::new();
        for op in self.operations {
            let name = op.name.clone().ok_or(CodegenError::AnonymousOperation)?;
            if ops.iter().any(|(existing, _, _)| *existing == name) {
                return Err(CodegenError::DuplicateOperation { name });
            }
            let projection = project_operation(self.schema, op)?;
            ops.push((name, op, projection));
        }
        debug!(operations = ops.len(), "projected operation documents");

        let enums: Vec<_> = self
            .schema
            .types
            .values()
            .filter_map(|def| match def {
                TypeDef::Enum(e) => Some(e),
                _ => None,
            })
            .collect();

        let mut out = String::new();
        if self.options.header {
            out.push_str("// Generated by typeflow codegen. Do not edit by hand.\n\n");
        }

        self.emit_imports(&mut out, &ops, !enums.is_empty());

        for e in &enums {
            out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]\n");
            out.push_str(&format!("pub enum {} {{\n", e.name));
            for value in &e.values {
                let variant = variant_case(value);
                if variant != *value {
                    out.push_str(&format!("    #[serde(rename = \"{value}\")]\n"));
                }
                out.push_str(&format!("    {variant},\n"));
            }
            out.push_str("}\n\n");
        }

        for (name, op, projection) in &ops {
            self.emit_operation(&mut out, name, op, projection)?;
        }

        // Drop the trailing blank line between items.
        while out.ends_with("\n\n") {
            out.pop();
        }
        Ok(out)
    }

    fn emit_imports(
        &self,
        out: &mut String,
        ops: &[(String, &OperationDefinition, crate::OperationProjection)],
        has_enums: bool,
    ) {
        let any_vars = ops.iter().any(|(_, op, _)| !op.variables.is_empty());
        let any_no_vars = ops.iter().any(|(_, op, _)| op.variables.is_empty());

        let need_serialize = has_enums || any_vars;
        let need_deserialize = has_enums || !ops.is_empty();
        match (need_deserialize, need_serialize) {
            (true, true) => out.push_str("use serde::{Deserialize, Serialize};\n\n"),
            (true, false) => out.push_str("use serde::Deserialize;\n\n"),
            (false, true) => out.push_str("use serde::Serialize;\n\n"),
            (false, false) => {}
        }

        if !ops.is_empty() {
            let mut items = Vec::new();
            if any_no_vars {
                items.push("NoVariables");
            }
            items.push("OperationKind");
            items.push("TypedOperation");
            out.push_str(&format!(
                "use {}::{{{}}};\n\n",
                self.options.sdk_crate,
                items.join(", ")
            ));
        }
    }

    fn emit_operation(
        &self,
        out: &mut String,
        name: &str,
        op: &OperationDefinition,
        projection: &crate::OperationProjection,
    ) -> Result<(), CodegenError> {
        out.push_str(&format!("pub struct {name};\n\n"));

        let variables_type = if op.variables.is_empty() {
            "NoVariables".to_string()
        } else {
            let ty = format!("{name}Variables");
            out.push_str("#[derive(Debug, Clone, Serialize)]\n");
            out.push_str(&format!("pub struct {ty} {{\n"));
            for var in &op.variables {
                let rust_name = snake_case(&var.name);
                if rust_name != var.name {
                    out.push_str(&format!("    #[serde(rename = \"{}\")]\n", var.name));
                }
                let base = self.variable_base_type(&var.name, var.ty.to_type_ref())?;
                out.push_str(&format!(
                    "    pub {rust_name}: {},\n",
                    rust_type(&var.ty.to_type_ref(), &base)
                ));
            }
            out.push_str("}\n\n");
            ty
        };

        let data_type = format!("{name}Data");
        out.push_str("#[derive(Debug, Clone, Deserialize)]\n");
        out.push_str(&format!("pub struct {data_type} {{\n"));
        for root in &projection.roots {
            let rust_name = snake_case(&root.field.name);
            if rust_name != root.field.name {
                out.push_str(&format!("    #[serde(rename = \"{}\")]\n", root.field.name));
            }
            let base = match &root.object {
                Some(_) => struct_name(name, &root.field.name),
                None => scalar_type(root.field.ty.named_type()).to_string(),
            };
            out.push_str(&format!(
                "    pub {rust_name}: {},\n",
                rust_type(&root.field.ty, &base)
            ));
        }
        out.push_str("}\n\n");

        for root in &projection.roots {
            if let Some(object) = &root.object {
                self.emit_result_structs(out, &struct_name(name, &root.field.name), object);
            }
        }

        out.push_str(&format!("impl TypedOperation for {name} {{\n"));
        out.push_str(&format!("    type Variables = {variables_type};\n"));
        out.push_str(&format!("    type Response = {data_type};\n\n"));
        out.push_str(&format!(
            "    const OPERATION: &'static str = \"{}\";\n",
            escape_str(&render_operation(op))
        ));
        out.push_str(&format!("    const OPERATION_NAME: &'static str = \"{name}\";\n"));
        let kind = match op.kind {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
        };
        out.push_str(&format!("    const KIND: OperationKind = OperationKind::{kind};\n"));
        out.push_str("}\n\n");
        Ok(())
    }

    fn emit_result_structs(&self, out: &mut String, name: &str, object: &ProjectedObject) {
        out.push_str("#[derive(Debug, Clone, Deserialize)]\n");
        out.push_str(&format!("pub struct {name} {{\n"));
        for field in &object.fields {
            let rust_name = snake_case(&field.name);
            if rust_name != field.name {
                out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
            }
            let base = match &field.object {
                Some(_) => struct_name(name, &field.name),
                None => self.result_base_type(&field.ty),
            };
            out.push_str(&format!(
                "    pub {rust_name}: {},\n",
                rust_type(&field.ty, &base)
            ));
        }
        out.push_str("}\n\n");

        for field in &object.fields {
            if let Some(nested) = &field.object {
                self.emit_result_structs(out, &struct_name(name, &field.name), nested);
            }
        }
    }

    /// Base Rust type of a scalar- or enum-typed result field.
    fn result_base_type(&self, ty: &TypeRef) -> String {
        let named = ty.named_type();
        match self.schema.get_type(named) {
            Some(TypeDef::Enum(e)) => e.name.clone(),
            _ => scalar_type(named).to_string(),
        }
    }

    /// Base Rust type of a variable; only scalars and enums can cross the
    /// wire as variables in this pipeline.
    fn variable_base_type(&self, name: &str, ty: TypeRef) -> Result<String, CodegenError> {
        let named = ty.named_type();
        match self.schema.get_type(named) {
            Some(TypeDef::Scalar(_)) => Ok(scalar_type(named).to_string()),
            Some(TypeDef::Enum(e)) => Ok(e.name.clone()),
            _ => Err(CodegenError::UnsupportedVariableType {
                name: name.to_string(),
                type_name: named.to_string(),
            }),
        }
    }
}

/// Maps a schema type reference onto a Rust type, wrapping nullable
/// positions in `Option` and lists in `Vec`.
fn rust_type(ty: &TypeRef, base: &str) -> String {
    match ty {
        TypeRef::NonNull(inner) => rust_type_required(inner, base),
        other => format!("Option<{}>", rust_type_required(other, base)),
    }
}

fn rust_type_required(ty: &TypeRef, base: &str) -> String {
    match ty {
        TypeRef::Named(_) => base.to_string(),
        TypeRef::List(inner) => format!("Vec<{}>", rust_type(inner, base)),
        TypeRef::NonNull(inner) => rust_type_required(inner, base),
    }
}

fn scalar_type(name: &str) -> &'static str {
    match name {
        "Int" => "i64",
        "Float" => "f64",
        "Boolean" => "bool",
        // ID and String are both strings on this side of the wire.
        _ => "String",
    }
}

/// `HomePosts` + `posts` -> `HomePostsPosts`.
fn struct_name(prefix: &str, field: &str) -> String {
    format!("{prefix}{}", pascal_case(field))
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}

fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `ID_ASC` -> `IdAsc`.
fn variant_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for segment in value.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            for c in chars {
                out.push(c.to_ascii_lowercase());
            }
        }
    }
    out
}

fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
