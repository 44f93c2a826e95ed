use std::{io, path::Path, sync::LazyLock};

use regex::Regex;

use crate::foundation::error::{ScenegenError, ScenegenResult};
use crate::foundation::fs::write_atomic;
use crate::remote::http;

const WARNING_COOKIE_PREFIX: &str = "download_warning";

static FILE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:/d/|id=|/file/d/|open\?id=)([a-zA-Z0-9_-]+)").expect("invalid regex pattern")
});
static HTML_CONFIRM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:confirm=|name="confirm"\s+value=")([0-9A-Za-z_-]+)"#)
        .expect("invalid regex pattern")
});

/// File id embedded in a Drive sharing link (`/d/<id>`, `/file/d/<id>`, `id=<id>`, `open?id=<id>`).
pub fn drive_file_id(url: &str) -> ScenegenResult<String> {
    FILE_ID_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ScenegenError::validation(format!("no Drive file id in '{url}'")))
}

/// Direct download URL for a Drive file id.
pub fn drive_download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?id={file_id}&export=download")
}

/// Token from the first `download_warning*` cookie among raw `Set-Cookie` header values.
pub fn confirm_token_from_cookies<'a>(
    set_cookie: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    set_cookie.into_iter().find_map(|header| {
        let pair = header.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        (name.trim().starts_with(WARNING_COOKIE_PREFIX) && !value.trim().is_empty())
            .then(|| value.trim().to_string())
    })
}

/// Token from a "file too large to scan" interstitial page.
pub fn confirm_token_from_html(body: &str) -> Option<String> {
    HTML_CONFIRM_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Something that can fetch a shared file to local disk.
pub trait FileDownloader {
    /// Download the file behind `url` into `dest`, returning the number of bytes written.
    ///
    /// `dest` is replaced atomically; on failure it keeps its previous content.
    fn download(&self, url: &str, dest: &Path) -> ScenegenResult<u64>;
}

/// [`FileDownloader`] for Google Drive sharing links.
pub struct GoogleDrive {
    agent: ureq::Agent,
}

impl GoogleDrive {
    /// New client with its own connection pool.
    pub fn new() -> Self {
        Self {
            agent: http::agent(),
        }
    }

    fn confirmed(&self, direct: &str, token: &str, what: &str) -> ScenegenResult<ureq::Response> {
        tracing::debug!("retrying download with confirmation token");
        http::get(&self.agent, &format!("{direct}&confirm={token}"), what)
    }
}

impl Default for GoogleDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDownloader for GoogleDrive {
    #[tracing::instrument(skip(self), fields(dest = %dest.display()))]
    fn download(&self, url: &str, dest: &Path) -> ScenegenResult<u64> {
        let id = drive_file_id(url)?;
        let direct = drive_download_url(&id);
        let what = format!("download Drive file {id}");

        let resp = http::get(&self.agent, &direct, &what)?;
        let cookie_token = confirm_token_from_cookies(resp.all("set-cookie"));
        let resp = if let Some(token) = cookie_token {
            self.confirmed(&direct, &token, &what)?
        } else if resp.content_type() == "text/html" {
            let body = http::read_text(resp, &what)?;
            let token = confirm_token_from_html(&body).ok_or_else(|| {
                ScenegenError::network(format!(
                    "{what}: got an HTML page instead of the file (is the link shared?)"
                ))
            })?;
            self.confirmed(&direct, &token, &what)?
        } else {
            resp
        };

        let mut body = resp.into_reader();
        let bytes = write_atomic(dest, |f| io::copy(&mut body, f))?;
        tracing::info!(bytes, "downloaded '{}'", dest.display());
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/remote/drive.rs"]
mod tests;
