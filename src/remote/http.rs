use std::time::Duration;

use crate::foundation::error::{ScenegenError, ScenegenResult};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout_read(READ_TIMEOUT)
        .user_agent(concat!("scenegen/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// GET `url`, turning any non-2xx status or transport failure into [`ScenegenError::Network`].
///
/// `what` names the request in errors and logs; `url` may carry secrets and is never echoed.
pub(crate) fn get(agent: &ureq::Agent, url: &str, what: &str) -> ScenegenResult<ureq::Response> {
    tracing::debug!(what, "GET");
    match agent.get(url).call() {
        Ok(resp) => Ok(resp),
        Err(ureq::Error::Status(code, resp)) => {
            let reason = resp.status_text().to_string();
            Err(ScenegenError::network(format!("{what}: HTTP {code} {reason}")))
        }
        Err(ureq::Error::Transport(e)) => Err(ScenegenError::network(format!(
            "{what}: {}",
            describe_transport(&e)
        ))),
    }
}

/// Transport failure text without the request URL, which `Display` on the error would include.
fn describe_transport(e: &ureq::Transport) -> String {
    use std::error::Error as _;

    let mut text = e.kind().to_string();
    if let Some(message) = e.message() {
        text.push_str(": ");
        text.push_str(message);
    }
    if let Some(source) = e.source() {
        text.push_str(": ");
        text.push_str(&source.to_string());
    }
    text
}

pub(crate) fn read_text(resp: ureq::Response, what: &str) -> ScenegenResult<String> {
    resp.into_string()
        .map_err(|e| ScenegenError::network(format!("{what}: read response body: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/remote/http.rs"]
mod tests;
