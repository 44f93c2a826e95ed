use std::{fs::File, io, path::Path};

use anyhow::Context as _;

/// Directory that will hold `path`, treating a bare file name as the current directory.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Write `dest` through a temporary file in the same directory, then rename it into place.
///
/// If `write` fails, or the rename fails, `dest` keeps whatever content it had before.
pub(crate) fn write_atomic<T>(
    dest: &Path,
    write: impl FnOnce(&mut File) -> io::Result<T>,
) -> anyhow::Result<T> {
    let dir = parent_dir(dest);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory '{}'", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary file in '{}'", dir.display()))?;
    let out = write(tmp.as_file_mut()).with_context(|| format!("write '{}'", dest.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("flush '{}'", dest.display()))?;
    tmp.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("move temporary file into '{}'", dest.display()))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/fs.rs"]
mod tests;
