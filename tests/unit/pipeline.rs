use std::cell::RefCell;
use std::collections::BTreeMap;

use super::*;
use crate::synth::engine::DuplicatePolicy;

const TEMPLATES: &str = include_str!("../data/templates.json");
const SHEET: &str = "https://docs.google.com/spreadsheets/d/abc/edit#gid=0";
const RUN: &str = "2026-10-18";

#[derive(Default)]
struct FakeSheets {
    tabs: BTreeMap<String, String>,
    rows: BTreeMap<String, Vec<Vec<String>>>,
}

impl FakeSheets {
    fn with_tab(mut self, title: &str, url: &str, rows: &[&[&str]]) -> Self {
        self.tabs.insert(title.to_string(), url.to_string());
        self.with_rows(url, rows)
    }

    fn with_rows(mut self, url: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        self.rows.insert(url.to_string(), rows);
        self
    }
}

impl SpreadsheetSource for FakeSheets {
    fn tab_urls(&self, _url: &str) -> ScenegenResult<BTreeMap<String, String>> {
        Ok(self.tabs.clone())
    }

    fn rows(&self, tab_url: &str) -> ScenegenResult<Vec<Vec<String>>> {
        self.rows
            .get(tab_url)
            .cloned()
            .ok_or_else(|| ScenegenError::not_found(tab_url.to_string()))
    }
}

#[derive(Default)]
struct FakeDrive {
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl FileDownloader for FakeDrive {
    fn download(&self, url: &str, dest: &Path) -> ScenegenResult<u64> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), dest.to_path_buf()));
        std::fs::write(dest, b"%PDF-1.7").map_err(anyhow::Error::from)?;
        Ok(8)
    }
}

fn setup() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let scenes = dir.path().join("scenes");
    let slides = dir.path().join("slides");
    std::fs::create_dir_all(&scenes).unwrap();
    std::fs::create_dir_all(&slides).unwrap();
    std::fs::write(scenes.join("templates.json"), TEMPLATES).unwrap();

    let cfg = Config {
        spreadsheet_url: Some(SHEET.to_string()),
        scenes_dir: scenes,
        slides_dir: slides,
        templates_file: "templates.json".to_string(),
        api_key: None,
    };
    (dir, cfg)
}

fn run_tab() -> FakeSheets {
    FakeSheets::default().with_tab(
        RUN,
        "tab-run",
        &[
            &["Scene", "Template", "Page"],
            &["Intro", "Base", "1"],
            &["", "", ""],
            &["Q&A", "Base", "5"],
        ],
    )
}

#[test]
fn generate_writes_collection_into_scenes_dir() {
    let (_dir, cfg) = setup();
    let path =
        generate_scene_collection(&cfg, &run_tab(), SHEET, RUN, &GenerateOptions::default())
            .unwrap();
    assert_eq!(path, cfg.output_path(RUN));

    let out = SceneCollection::from_path(&path).unwrap();
    out.validate().unwrap();
    assert_eq!(out.name, RUN);

    let intro = out.find_scene("Intro").unwrap();
    let browser = out
        .browsers()
        .find(|b| b.name == "BrowserIntro")
        .unwrap();
    assert_eq!(intro.browser_item().unwrap().source_uuid, browser.uuid);
    assert_eq!(
        browser.settings.url.as_deref(),
        Some(format!("{}&page=1", cfg.slide_base_url(RUN)).as_str())
    );
    assert!(out.extra.contains_key("modules"));
}

#[test]
fn generate_fails_before_writing_when_tab_missing() {
    let (_dir, cfg) = setup();
    let err = generate_scene_collection(
        &cfg,
        &FakeSheets::default(),
        SHEET,
        RUN,
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScenegenError::Validation(_)));
    assert!(!cfg.output_path(RUN).exists());
}

#[test]
fn generate_surfaces_engine_errors_without_output() {
    let (_dir, cfg) = setup();
    let sheets = FakeSheets::default().with_tab(
        RUN,
        "tab-run",
        &[&["Scene", "Template", "Page"], &["Intro", "Missing", "1"]],
    );
    let err = generate_scene_collection(&cfg, &sheets, SHEET, RUN, &GenerateOptions::default())
        .unwrap_err();
    assert!(matches!(err, ScenegenError::TemplateNotFound(_)));
    assert!(!cfg.output_path(RUN).exists());
}

#[test]
fn generate_honours_duplicate_policy() {
    let (_dir, cfg) = setup();
    let sheets = FakeSheets::default().with_tab(
        RUN,
        "tab-run",
        &[
            &["Scene", "Template", "Page"],
            &["Song", "Base", "1"],
            &["Song", "Base", "2"],
        ],
    );
    let err = generate_scene_collection(&cfg, &sheets, SHEET, RUN, &GenerateOptions::default())
        .unwrap_err();
    assert!(matches!(err, ScenegenError::DuplicateScene(_)));

    let opts = GenerateOptions {
        synthesis: SynthesisOptions {
            duplicates: DuplicatePolicy::Allow,
        },
    };
    let path = generate_scene_collection(&cfg, &sheets, SHEET, RUN, &opts).unwrap();
    let out = SceneCollection::from_path(&path).unwrap();
    assert_eq!(out.scenes().filter(|s| s.name == "Song").count(), 2);
}

#[test]
fn fetch_slides_downloads_registered_link() {
    let (_dir, cfg) = setup();
    let sheets = FakeSheets::default().with_rows(
        SHEET,
        &[
            &["Name", "Slides"],
            &[RUN, "https://drive.google.com/file/d/deck/view"],
        ],
    );
    let drive = FakeDrive::default();

    let got = fetch_slides(&cfg, &sheets, &drive, SHEET, RUN).unwrap();
    assert_eq!(got, Some(cfg.slide_pdf_path(RUN)));
    assert_eq!(
        drive.calls.borrow().as_slice(),
        &[(
            "https://drive.google.com/file/d/deck/view".to_string(),
            cfg.slide_pdf_path(RUN)
        )]
    );
    assert!(cfg.slide_pdf_path(RUN).is_file());
}

#[test]
fn fetch_slides_without_link_is_none() {
    let (_dir, cfg) = setup();
    let sheets = FakeSheets::default().with_rows(SHEET, &[&["Name", "Slides"]]);
    let drive = FakeDrive::default();
    assert_eq!(fetch_slides(&cfg, &sheets, &drive, SHEET, RUN).unwrap(), None);
    assert!(drive.calls.borrow().is_empty());
}

#[test]
fn synthesize_files_reads_csv_and_writes_output() {
    let (dir, cfg) = setup();
    let csv = dir.path().join("run.csv");
    std::fs::write(&csv, "Scene,Template,Page\nIntro,Base,1\nOutro,Camera Only,9\n").unwrap();
    let out_path = dir.path().join("out").join("result.json");

    let out = synthesize_files(
        &cfg.templates_path(),
        &csv,
        "offline",
        "file:///deck.pdf#toolbar=0",
        &out_path,
        &SynthesisOptions::default(),
    )
    .unwrap();
    assert_eq!(out.scenes().count(), 4);
    assert_eq!(SceneCollection::from_path(&out_path).unwrap(), out);
}

#[test]
fn synthesize_files_reports_missing_run_list() {
    let (dir, cfg) = setup();
    let err = synthesize_files(
        &cfg.templates_path(),
        &dir.path().join("nope.csv"),
        "offline",
        "u",
        &dir.path().join("o.json"),
        &SynthesisOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScenegenError::RunList(_)));
}
