use std::{fmt, io::Read};

use crate::foundation::error::{ScenegenError, ScenegenResult};

/// Slide page reference, kept as the literal text of the spreadsheet cell.
///
/// Pages are spliced into a URL fragment verbatim, so no numeric parsing or re-encoding happens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageNumber(String);

impl PageNumber {
    /// Wrap cell text as a page reference.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The page text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for PageNumber {
    fn from(page: u32) -> Self {
        Self(page.to_string())
    }
}

impl From<&str> for PageNumber {
    fn from(page: &str) -> Self {
        Self(page.to_string())
    }
}

impl From<String> for PageNumber {
    fn from(page: String) -> Self {
        Self(page)
    }
}

/// One data row of a run-list: which scene to create, from which template, showing which page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunListEntry {
    /// Name of the scene to generate.
    pub scene_name: String,
    /// Name of the template scene to clone.
    pub template_name: String,
    /// Slide page shown by the scene's browser item.
    pub page: PageNumber,
}

impl RunListEntry {
    /// Build an entry.
    pub fn new(
        scene_name: impl Into<String>,
        template_name: impl Into<String>,
        page: impl Into<PageNumber>,
    ) -> Self {
        Self {
            scene_name: scene_name.into(),
            template_name: template_name.into(),
            page: page.into(),
        }
    }
}

fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Decode spreadsheet rows into run-list entries.
///
/// Row 0 is the header and is dropped. Rows made only of blank cells are skipped, trailing blank
/// cells are ignored, and every remaining row must hold exactly scene, template and page.
pub fn parse_run_list(rows: &[Vec<String>]) -> ScenegenResult<Vec<RunListEntry>> {
    let mut entries = Vec::with_capacity(rows.len().saturating_sub(1));
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let used = row
            .iter()
            .rposition(|cell| !is_blank(cell))
            .map_or(0, |last| last + 1);
        match &row[..used] {
            [] => continue,
            [scene, template, page] => entries.push(RunListEntry::new(
                scene.as_str(),
                template.as_str(),
                page.as_str(),
            )),
            cells => {
                return Err(ScenegenError::run_list(format!(
                    "row {}: expected 3 cells (scene, template, page), found {}",
                    idx + 1,
                    cells.len()
                )));
            }
        }
    }
    Ok(entries)
}

/// Read CSV text into rows of cells. Rows may have differing lengths.
pub fn read_csv_rows<R: Read>(r: R) -> ScenegenResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(r);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ScenegenError::run_list(format!("parse CSV: {e}")))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

/// Read a run-list from CSV text, header row included.
pub fn read_run_list_csv<R: Read>(r: R) -> ScenegenResult<Vec<RunListEntry>> {
    parse_run_list(&read_csv_rows(r)?)
}

#[cfg(test)]
#[path = "../tests/unit/runlist.rs"]
mod tests;
