use super::*;

fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn later_rows_override_earlier_ones() {
    let idx = SlideIndex::from_rows(&rows(&[
        &["Name", "Link"],
        &["2026-10-18", "https://drive.google.com/file/d/old/view"],
        &["2026-10-25", "https://drive.google.com/file/d/next/view", "note"],
        &["2026-10-18", "https://drive.google.com/file/d/new/view"],
    ]));
    assert_eq!(
        idx.link_for("2026-10-18"),
        Some("https://drive.google.com/file/d/new/view")
    );
    assert_eq!(
        idx.link_for("2026-10-25"),
        Some("https://drive.google.com/file/d/next/view")
    );
    assert_eq!(idx.len(), 3);
}

#[test]
fn short_rows_are_ignored() {
    let idx = SlideIndex::from_rows(&rows(&[&[], &["lonely"], &["a", "b"]]));
    assert_eq!(idx.len(), 1);
    assert_eq!(idx.link_for("lonely"), None);
    assert!(SlideIndex::from_rows(&[]).is_empty());
}
