//! Canonical SDL rendering.
//!
//! Rendering is deterministic: type and field order follow the graph's
//! insertion order, so an unchanged graph always renders to byte-identical
//! text. That property is what makes the published artifact diffable and
//! cacheable across builds.

use typeflow_schema::{ArgumentDef, FieldDef, Schema, TypeDef, TypeRef};

use crate::ast::{OperationDefinition, Selection, Value};

/// Renders a schema graph as canonical SDL.
pub fn render_schema(schema: &Schema) -> String {
    let mut renderer = Renderer::new();

    for def in schema.types.values() {
        match def {
            // Built-in scalars are implicit in SDL.
            TypeDef::Scalar(_) => {}
            TypeDef::Object(obj) => {
                renderer.block(&format!("type {}", obj.name), |r| {
                    for field in obj.fields.values() {
                        r.field_line(field);
                    }
                });
            }
            TypeDef::Enum(e) => {
                renderer.block(&format!("enum {}", e.name), |r| {
                    for value in &e.values {
                        r.line(value);
                    }
                });
            }
        }
    }

    if !schema.query.is_empty() {
        renderer.block("type Query", |r| {
            for field in schema.query.values() {
                r.field_line(field);
            }
        });
    }
    if !schema.mutation.is_empty() {
        renderer.block("type Mutation", |r| {
            for field in schema.mutation.values() {
                r.field_line(field);
            }
        });
    }

    renderer.finish()
}

/// Renders an operation document in compact, single-line form.
///
/// This is the text embedded into generated operations and sent on the
/// wire as the `query` member of the request body.
pub fn render_operation(op: &OperationDefinition) -> String {
    let mut out = String::new();
    out.push_str(op.kind.keyword());
    if let Some(name) = &op.name {
        out.push(' ');
        out.push_str(name);
    }
    if !op.variables.is_empty() {
        out.push('(');
        for (i, var) in op.variables.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('$');
            out.push_str(&var.name);
            out.push_str(": ");
            out.push_str(&render_type_node(&var.ty));
        }
        out.push(')');
    }
    out.push(' ');
    render_selection_set(&op.selection_set, &mut out);
    out
}

fn render_selection_set(selections: &[Selection], out: &mut String) {
    out.push('{');
    for selection in selections {
        out.push(' ');
        out.push_str(&selection.name);
        if !selection.arguments.is_empty() {
            out.push('(');
            for (i, arg) in selection.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&arg.name);
                out.push_str(": ");
                render_value(&arg.value, out);
            }
            out.push(')');
        }
        if !selection.selection_set.is_empty() {
            out.push(' ');
            render_selection_set(&selection.selection_set, out);
        }
    }
    out.push_str(" }");
}

fn render_value(value: &Value, out: &mut String) {
    match value {
        Value::Variable(name) => {
            out.push('$');
            out.push_str(name);
        }
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        }
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Enum(name) => out.push_str(name),
        Value::Null => out.push_str("null"),
    }
}

fn render_type_node(ty: &crate::ast::TypeNode) -> String {
    use crate::ast::TypeNode;
    match ty {
        TypeNode::Named(name) => name.clone(),
        TypeNode::NonNull(inner) => format!("{}!", render_type_node(inner)),
        TypeNode::List(inner) => format!("[{}]", render_type_node(inner)),
    }
}

fn render_type_ref(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(name) => name.clone(),
        TypeRef::NonNull(inner) => format!("{}!", render_type_ref(inner)),
        TypeRef::List(inner) => format!("[{}]", render_type_ref(inner)),
    }
}

/// Block-structured SDL writer.
struct Renderer {
    output: String,
    blocks: usize,
}

impl Renderer {
    fn new() -> Self {
        Self {
            output: String::new(),
            blocks: 0,
        }
    }

    fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        if self.blocks > 0 {
            self.output.push('\n');
        }
        self.blocks += 1;
        self.output.push_str(header);
        self.output.push_str(" {\n");
        body(self);
        self.output.push_str("}\n");
    }

    fn line(&mut self, text: &str) {
        self.output.push_str("  ");
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn field_line(&mut self, field: &FieldDef) {
        let mut line = field.name.clone();
        if !field.arguments.is_empty() {
            line.push('(');
            for (i, arg) in field.arguments.values().enumerate() {
                if i > 0 {
                    line.push_str(", ");
                }
                line.push_str(&render_argument(arg));
            }
            line.push(')');
        }
        line.push_str(": ");
        line.push_str(&render_type_ref(&field.ty));
        self.line(&line);
    }

    fn finish(self) -> String {
        self.output
    }
}

fn render_argument(arg: &ArgumentDef) -> String {
    format!("{}: {}", arg.name, render_type_ref(&arg.ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;
    use typeflow_schema::{EntityDescriptor, ScalarKind, SchemaBuilder};

    fn demo_schema() -> Schema {
        let post = EntityDescriptor::builder("Post")
            .id("id")
            .string("title")
            .text("body")
            .internal("createdAt", ScalarKind::Str)
            .build();

        SchemaBuilder::new()
            .entity(&post)
            .list_query("posts", &post)
            .create_mutation("createPost", &post)
            .build()
            .unwrap()
    }

    #[test]
    fn renders_canonical_sdl() {
        let sdl = render_schema(&demo_schema());
        insta::assert_snapshot!(sdl, @r"
type Post {
  id: ID!
  title: String!
  body: String!
}

enum PostOrder {
  ID_ASC
  ID_DESC
}

type Query {
  posts(orderBy: PostOrder, limit: Int): [Post!]!
}

type Mutation {
  createPost(title: String!, body: String!): Post!
}
");
    }

    #[test]
    fn rendering_is_deterministic() {
        let schema = demo_schema();
        assert_eq!(render_schema(&schema), render_schema(&schema));
    }

    #[test]
    fn rendered_sdl_parses_back_to_the_same_graph() {
        let schema = demo_schema();
        let reparsed = crate::parse_schema(&render_schema(&schema)).unwrap();
        assert_eq!(schema, reparsed);
    }

    #[test]
    fn renders_compact_operation_text() {
        let source = r#"
query HomePosts($orderBy: PostOrder, $limit: Int) {
  posts(orderBy: $orderBy, limit: $limit) {
    id
    title
  }
}
"#;
        let document = parse_document(source).unwrap();
        assert_eq!(
            render_operation(&document.operations[0]),
            "query HomePosts($orderBy: PostOrder, $limit: Int) \
             { posts(orderBy: $orderBy, limit: $limit) { id title } }"
        );
    }

    #[test]
    fn renders_inline_values() {
        let document =
            parse_document(r#"mutation { createPost(title: "A \"B\"", limit: 3) { id } }"#)
                .unwrap();
        assert_eq!(
            render_operation(&document.operations[0]),
            r#"mutation { createPost(title: "A \"B\"", limit: 3) { id } }"#
        );
    }
}
