//! User configuration: where the streaming application keeps its scene collections, where slide
//! decks go, and which spreadsheet drives the run-of-show.
//!
//! ```toml
//! spreadsheet_url = "https://docs.google.com/spreadsheets/d/<id>/edit#gid=0"
//! scenes_dir = "C:/Users/me/AppData/Roaming/obs-studio/basic/scenes"
//! slides_dir = "C:/Users/me/Slides"
//! templates_file = "templates.json"
//! api_key = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ScenegenError, ScenegenResult};

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "SCENEGEN_API_KEY";
/// Template collection file name used when the config does not name one.
pub const DEFAULT_TEMPLATES_FILE: &str = "templates.json";

fn default_templates_file() -> String {
    DEFAULT_TEMPLATES_FILE.to_string()
}

/// Settings loaded from `config.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Spreadsheet holding the slide links and one run-list tab per service.
    #[serde(default)]
    pub spreadsheet_url: Option<String>,
    /// Scene collection directory of the streaming application.
    pub scenes_dir: PathBuf,
    /// Directory slide PDFs are downloaded into.
    pub slides_dir: PathBuf,
    /// Template collection file name inside `scenes_dir`.
    #[serde(default = "default_templates_file")]
    pub templates_file: String,
    /// Google Sheets API key, needed to list tabs.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    /// Parse TOML text. Environment overrides are not applied.
    pub fn from_toml_str(text: &str) -> ScenegenResult<Self> {
        toml::from_str(text).map_err(|e| ScenegenError::config(format!("parse config: {e}")))
    }

    /// Load a config file and apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> ScenegenResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ScenegenError::config(format!("read config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_toml_str(&text).map_err(|e| match e {
            ScenegenError::Config(msg) => {
                ScenegenError::config(format!("{msg} (in '{}')", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load `path`, or the per-user default location when `path` is `None`.
    pub fn load(path: Option<&Path>) -> ScenegenResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let p = Self::default_path().ok_or_else(|| {
                    ScenegenError::config("no config path given and no user config directory")
                })?;
                Self::from_file(p)
            }
        }
    }

    /// `<user config dir>/scenegen/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scenegen").join("config.toml"))
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// The configured spreadsheet URL.
    pub fn spreadsheet_url(&self) -> ScenegenResult<&str> {
        self.spreadsheet_url
            .as_deref()
            .ok_or_else(|| ScenegenError::config("spreadsheet_url is not set"))
    }

    /// Template collection file.
    pub fn templates_path(&self) -> PathBuf {
        self.scenes_dir.join(&self.templates_file)
    }

    /// Where the collection for `name` is written.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.scenes_dir.join(format!("{name}.json"))
    }

    /// Where the slide deck for `name` is downloaded.
    pub fn slide_pdf_path(&self, name: &str) -> PathBuf {
        self.slides_dir.join(format!("Slides-{name}.pdf"))
    }

    /// `file:///` URL of the slide deck for `name`, with the viewer toolbar hidden.
    pub fn slide_base_url(&self, name: &str) -> String {
        let path = self.slide_pdf_path(name);
        let path = path.to_string_lossy().replace('\\', "/");
        format!("file:///{}#toolbar=0", path.trim_start_matches('/'))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
