//! Checks that run before any network-heavy or file-writing work starts.

use crate::config::Config;
use crate::foundation::error::{ScenegenError, ScenegenResult};
use crate::remote::sheets::SpreadsheetSource;

/// Verify the scenes directory, slides directory and template file exist.
pub fn check_paths(config: &Config) -> ScenegenResult<()> {
    if !config.scenes_dir.is_dir() {
        return Err(ScenegenError::validation(format!(
            "missing scenes directory: {}",
            config.scenes_dir.display()
        )));
    }
    if !config.slides_dir.is_dir() {
        return Err(ScenegenError::validation(format!(
            "missing pdf slides directory: {}",
            config.slides_dir.display()
        )));
    }
    let templates = config.templates_path();
    if !templates.is_file() {
        return Err(ScenegenError::validation(format!(
            "missing scene templates file: {}",
            templates.display()
        )));
    }
    Ok(())
}

/// Verify the spreadsheet behind `url` can be listed and has a tab called `name`.
///
/// Returns the tab's URL.
pub fn check_sheet_tab(
    source: &dyn SpreadsheetSource,
    url: &str,
    name: &str,
) -> ScenegenResult<String> {
    let tabs = source.tab_urls(url).map_err(|e| {
        ScenegenError::validation(format!(
            "cannot access sheet information for spreadsheet: {url} ({e})"
        ))
    })?;
    tabs.get(name).cloned().ok_or_else(|| {
        ScenegenError::validation(format!("cannot find sheet named '{name}' in spreadsheet"))
    })
}

/// Run all checks, spreadsheet first. Returns the URL of the `name` tab.
#[tracing::instrument(skip(config, source))]
pub fn preflight(
    config: &Config,
    source: &dyn SpreadsheetSource,
    url: &str,
    name: &str,
) -> ScenegenResult<String> {
    let tab = check_sheet_tab(source, url, name)?;
    check_paths(config)?;
    tracing::debug!("pre-flight checks passed");
    Ok(tab)
}

#[cfg(test)]
#[path = "../tests/unit/preflight.rs"]
mod tests;
