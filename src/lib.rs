//! Generate streaming scene collections from a spreadsheet run-of-show.
//!
//! A run-list of `(scene, template, page)` rows is turned into a new scene collection by cloning
//! template scenes from an existing collection and pointing each clone's browser source at one
//! page of a slide deck. [`synthesize`] is the pure core; [`pipeline`] wires it to the
//! spreadsheet, the file host and the local scene directory.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Next-Sunday default run name.
pub mod calendar;
pub mod collection;
pub mod config;
mod foundation;
/// End-to-end flows used by the command-line tool.
pub mod pipeline;
pub mod preflight;
pub mod remote;
/// Run-list rows and their parsing.
pub mod runlist;
pub mod synth;

pub use calendar::{default_run_name, next_sunday, run_name};
pub use collection::model::{
    BrowserSettings, BrowserSource, Extra, SceneCollection, SceneItem, SceneOrderEntry, SceneRef,
    SceneSettings, SceneSource, Source,
};
pub use config::Config;
pub use foundation::error::{MissingTemplate, ScenegenError, ScenegenResult};
pub use foundation::ids::UuidAllocator;
pub use pipeline::{GenerateOptions, fetch_slides, generate_scene_collection, synthesize_files};
pub use preflight::{check_paths, check_sheet_tab, preflight};
pub use remote::drive::{FileDownloader, GoogleDrive};
pub use remote::sheets::{GoogleSheets, SheetRef, SpreadsheetSource};
pub use remote::slides::SlideIndex;
pub use runlist::{PageNumber, RunListEntry, parse_run_list, read_run_list_csv};
pub use synth::engine::{
    CONTINUATION_SUFFIX, DuplicatePolicy, GeneratedScene, SynthesisOptions, slide_page_url,
    synthesize, synthesize_with,
};
