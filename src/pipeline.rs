use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::collection::model::SceneCollection;
use crate::config::Config;
use crate::foundation::error::{ScenegenError, ScenegenResult};
use crate::preflight::preflight;
use crate::remote::drive::FileDownloader;
use crate::remote::sheets::SpreadsheetSource;
use crate::remote::slides::SlideIndex;
use crate::runlist::{parse_run_list, read_run_list_csv};
use crate::synth::engine::{SynthesisOptions, synthesize_with};

/// Options for [`generate_scene_collection`].
#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    /// Options forwarded to the synthesis engine.
    pub synthesis: SynthesisOptions,
}

/// Build the scene collection for run `name` and write it into the scenes directory.
///
/// The run-list comes from the tab called `name` of the spreadsheet at `url`. Returns the path of
/// the written collection.
#[tracing::instrument(skip(config, sheets, opts))]
pub fn generate_scene_collection(
    config: &Config,
    sheets: &dyn SpreadsheetSource,
    url: &str,
    name: &str,
    opts: &GenerateOptions,
) -> ScenegenResult<PathBuf> {
    let tab_url = preflight(config, sheets, url, name)?;
    let run_list = parse_run_list(&sheets.rows(&tab_url)?)?;
    let template = SceneCollection::from_path(&config.templates_path())?;

    let collection = synthesize_with(
        &run_list,
        &template,
        name,
        &config.slide_base_url(name),
        &opts.synthesis,
    )?;

    let out = config.output_path(name);
    collection.write_to_path(&out)?;
    Ok(out)
}

/// Download the slide deck registered for `name` in the link tab at `url`.
///
/// Returns `None` when the tab has no link for `name`.
#[tracing::instrument(skip(config, sheets, downloader))]
pub fn fetch_slides(
    config: &Config,
    sheets: &dyn SpreadsheetSource,
    downloader: &dyn FileDownloader,
    url: &str,
    name: &str,
) -> ScenegenResult<Option<PathBuf>> {
    let index = SlideIndex::from_rows(&sheets.rows(url)?);
    let Some(link) = index.link_for(name) else {
        tracing::warn!(links = index.len(), "no slide link for '{name}'");
        return Ok(None);
    };

    let dest = config.slide_pdf_path(name);
    downloader.download(link, &dest)?;
    Ok(Some(dest))
}

/// Offline variant of [`generate_scene_collection`]: template and run-list come from local
/// files and the slide base URL is given directly.
#[tracing::instrument(skip(opts))]
pub fn synthesize_files(
    template_path: &Path,
    run_list_csv: &Path,
    name: &str,
    slide_base_url: &str,
    out: &Path,
    opts: &SynthesisOptions,
) -> ScenegenResult<SceneCollection> {
    let template = SceneCollection::from_path(template_path)?;
    let f = File::open(run_list_csv).map_err(|e| {
        ScenegenError::run_list(format!("open '{}': {e}", run_list_csv.display()))
    })?;
    let run_list = read_run_list_csv(BufReader::new(f))?;

    let collection = synthesize_with(&run_list, &template, name, slide_base_url, opts)?;
    collection.write_to_path(out)?;
    Ok(collection)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
