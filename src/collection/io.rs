use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write as _},
    path::Path,
};

use serde::Serialize as _;

use crate::collection::model::SceneCollection;
use crate::foundation::error::{ScenegenError, ScenegenResult};
use crate::foundation::fs::write_atomic;

const INDENT: &[u8] = b"    ";

impl SceneCollection {
    /// Parse a collection from a JSON reader.
    pub fn from_reader<R: Read>(r: R) -> ScenegenResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScenegenError::DocumentParse(format!("parse scene collection JSON: {e}")))
    }

    /// Parse a collection from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ScenegenResult<Self> {
        let f = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScenegenError::DocumentNotFound(path.display().to_string())
            } else {
                ScenegenError::DocumentLoad(format!("open '{}': {e}", path.display()))
            }
        })?;
        let collection: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            if e.is_io() {
                ScenegenError::DocumentLoad(format!("read '{}': {e}", path.display()))
            } else {
                ScenegenError::DocumentParse(format!("'{}': {e}", path.display()))
            }
        })?;
        tracing::debug!(
            sources = collection.sources.len(),
            scenes = collection.scene_order.len(),
            "loaded scene collection"
        );
        Ok(collection)
    }

    /// Serialize as UTF-8 JSON with a four-space indent.
    pub fn to_json_pretty(&self) -> ScenegenResult<String> {
        let mut buf = Vec::new();
        self.write_pretty(&mut buf)
            .map_err(|e| ScenegenError::DocumentWrite(format!("serialize scene collection: {e}")))?;
        String::from_utf8(buf)
            .map_err(|e| ScenegenError::DocumentWrite(format!("serialized JSON is not UTF-8: {e}")))
    }

    /// Write the collection to `path`, replacing any existing file only once the new content is
    /// completely written.
    #[tracing::instrument(skip(self), fields(name = %self.name))]
    pub fn write_to_path(&self, path: &Path) -> ScenegenResult<()> {
        write_atomic(path, |f| {
            let mut w = BufWriter::new(f);
            self.write_pretty(&mut w).map_err(std::io::Error::from)?;
            w.write_all(b"\n")?;
            w.flush()
        })
        .map_err(|e| ScenegenError::DocumentWrite(format!("{e:#}")))?;
        tracing::info!(path = %path.display(), "wrote scene collection");
        Ok(())
    }

    fn write_pretty<W: std::io::Write>(&self, w: W) -> serde_json::Result<()> {
        let fmt = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(w, fmt);
        self.serialize(&mut ser)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collection/io.rs"]
mod tests;
