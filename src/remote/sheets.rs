use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::foundation::error::{ScenegenError, ScenegenResult};
use crate::remote::http;
use crate::runlist::read_csv_rows;

const DOCS_BASE: &str = "https://docs.google.com/spreadsheets/d";
const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Tab addressed when a URL carries no `gid`.
pub const DEFAULT_GID: &str = "0";

static SHEET_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://docs\.google\.com/spreadsheets/d/([a-zA-Z0-9_-]+)")
        .expect("invalid regex pattern")
});
static GID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gid=([0-9]+)").expect("invalid regex pattern"));

/// A spreadsheet tab, identified by spreadsheet id and tab `gid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRef {
    /// Spreadsheet document id.
    pub id: String,
    /// Tab id within the spreadsheet.
    pub gid: String,
}

impl SheetRef {
    /// Extract the spreadsheet id and tab from a sharing or edit URL.
    pub fn parse(url: &str) -> ScenegenResult<Self> {
        let id = SHEET_ID_RE
            .captures(url)
            .and_then(|c| c.get(1))
            .ok_or_else(|| {
                ScenegenError::validation(format!("not a Google Sheets URL: '{url}'"))
            })?
            .as_str()
            .to_string();
        let gid = GID_RE
            .captures(url)
            .and_then(|c| c.get(1))
            .map_or(DEFAULT_GID, |m| m.as_str())
            .to_string();
        Ok(Self { id, gid })
    }

    /// URL serving this tab as CSV.
    pub fn csv_export_url(&self) -> String {
        format!("{DOCS_BASE}/{}/export?format=csv&gid={}", self.id, self.gid)
    }

    /// Edit URL of another tab of the same spreadsheet.
    pub fn tab_url(&self, gid: &str) -> String {
        format!("{DOCS_BASE}/{}/edit#gid={gid}", self.id)
    }
}

/// Read access to a spreadsheet.
pub trait SpreadsheetSource {
    /// Map every tab title of the spreadsheet behind `spreadsheet_url` to that tab's URL.
    fn tab_urls(&self, spreadsheet_url: &str) -> ScenegenResult<BTreeMap<String, String>>;

    /// All rows of the tab behind `tab_url`, header included, as raw cell text.
    fn rows(&self, tab_url: &str) -> ScenegenResult<Vec<Vec<String>>>;
}

/// [`SpreadsheetSource`] backed by Google Sheets.
///
/// Rows come from the public CSV export; the tab map needs a Sheets API key.
pub struct GoogleSheets {
    agent: ureq::Agent,
    api_key: Option<String>,
}

impl GoogleSheets {
    /// Client using `api_key` for tab lookups.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            agent: http::agent(),
            api_key,
        }
    }
}

impl SpreadsheetSource for GoogleSheets {
    #[tracing::instrument(skip(self))]
    fn tab_urls(&self, spreadsheet_url: &str) -> ScenegenResult<BTreeMap<String, String>> {
        let sheet = SheetRef::parse(spreadsheet_url)?;
        let key = self.api_key.as_deref().ok_or_else(|| {
            ScenegenError::config("an API key is required to list spreadsheet tabs")
        })?;

        let url = format!(
            "{API_BASE}/{}?fields=sheets.properties&key={key}",
            sheet.id
        );
        let what = format!("list tabs of spreadsheet {}", sheet.id);
        let body = http::read_text(http::get(&self.agent, &url, &what)?, &what)?;
        let tabs = parse_tab_map(&sheet, &body)?;
        tracing::debug!(tabs = tabs.len(), "fetched tab map");
        Ok(tabs)
    }

    #[tracing::instrument(skip(self))]
    fn rows(&self, tab_url: &str) -> ScenegenResult<Vec<Vec<String>>> {
        let sheet = SheetRef::parse(tab_url)?;
        let what = format!("export tab {} of spreadsheet {}", sheet.gid, sheet.id);
        let resp = http::get(&self.agent, &sheet.csv_export_url(), &what)?;
        let rows = read_csv_rows(resp.into_reader())?;
        tracing::debug!(rows = rows.len(), "fetched rows");
        Ok(rows)
    }
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: u64,
    title: String,
}

/// Decode a `sheets.properties` response into title -> tab URL.
pub(crate) fn parse_tab_map(
    sheet: &SheetRef,
    body: &str,
) -> ScenegenResult<BTreeMap<String, String>> {
    let meta: SpreadsheetMeta = serde_json::from_str(body).map_err(|e| {
        ScenegenError::network(format!("unexpected spreadsheet metadata: {e}"))
    })?;
    Ok(meta
        .sheets
        .into_iter()
        .map(|s| {
            let url = sheet.tab_url(&s.properties.sheet_id.to_string());
            (s.properties.title, url)
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/remote/sheets.rs"]
mod tests;
