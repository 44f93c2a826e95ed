use std::collections::HashMap;

/// Slide-deck links keyed by run-list name, read from the spreadsheet's link tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideIndex {
    links: HashMap<String, String>,
}

impl SlideIndex {
    /// Build from rows of `(name, link, ...)`. Later rows override earlier ones and rows with
    /// fewer than two cells are ignored.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let links = rows
            .iter()
            .filter_map(|row| match row.as_slice() {
                [name, link, ..] => Some((name.clone(), link.clone())),
                _ => None,
            })
            .collect();
        Self { links }
    }

    /// Link registered for `name`.
    pub fn link_for(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    /// Number of names with a link.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no links were found.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/remote/slides.rs"]
mod tests;
