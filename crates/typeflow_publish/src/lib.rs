//! Schema publisher.
//!
//! Serializes a schema graph to canonical SDL and writes it to the fixed
//! artifact path consumed by the client-generation step. Runs once during
//! a build phase; holds no state afterwards.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use typeflow_schema::Schema;
use typeflow_syntax::render_schema;

/// A failed artifact write.
///
/// Fatal to the build step: the invoking step must abort with the message,
/// never swallow or retry it.
#[derive(Debug, Error)]
#[error("failed to publish schema artifact to `{path}`")]
pub struct PublishError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Renders the schema and writes the artifact atomically.
///
/// Intermediate directories are created as needed. The write goes to a
/// temp file in the target directory followed by a rename, so readers
/// never observe a half-written artifact. Re-publishing an unchanged graph
/// produces byte-identical output.
pub fn publish(schema: &Schema, path: impl AsRef<Path>) -> Result<(), PublishError> {
    let path = path.as_ref();
    let sdl = render_schema(schema);
    debug!(bytes = sdl.len(), "rendered schema artifact");

    write_atomic(path, sdl.as_bytes()).map_err(|source| PublishError {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "published schema artifact");
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no file name"))?;
    let mut tmp = path.to_path_buf();
    tmp.set_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("typeflow_publish_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn publishes_and_creates_directories() {
        let dir = temp_dir("creates");
        let path = dir.join("nested/out/schema.graphql");

        publish(&demo_schema(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("type Post {"));
        assert!(written.ends_with('\n'));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn republishing_is_byte_identical() {
        let dir = temp_dir("idempotent");
        let path = dir.join("schema.graphql");
        let schema = demo_schema();

        publish(&schema, &path).unwrap();
        let first = fs::read(&path).unwrap();
        publish(&schema, &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = temp_dir("tmpfile");
        let path = dir.join("schema.graphql");

        publish(&demo_schema(), &path).unwrap();

        let entries: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["schema.graphql"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unwritable_target_surfaces_io_error() {
        let dir = temp_dir("unwritable");
        fs::create_dir_all(&dir).unwrap();
        // The parent "file" is a regular file, so create_dir_all fails.
        let blocker = dir.join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = publish(&demo_schema(), blocker.join("schema.graphql")).unwrap_err();
        assert_eq!(err.path, blocker.join("schema.graphql"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
