use std::collections::{HashMap, HashSet};

use crate::collection::model::{BrowserSource, SceneCollection, SceneSource, Source};
use crate::foundation::error::{ScenegenError, ScenegenResult};

/// Template lookup table built once per synthesis run.
///
/// First match wins for both lookups, in `sources` order.
pub(crate) struct TemplateIndex<'a> {
    scenes: HashMap<&'a str, &'a SceneSource>,
    names: HashSet<&'a str>,
    browser: Option<&'a BrowserSource>,
    browser_count: usize,
}

impl<'a> TemplateIndex<'a> {
    pub(crate) fn build(collection: &'a SceneCollection) -> Self {
        let mut scenes = HashMap::new();
        let names = collection.sources.iter().filter_map(Source::name).collect();
        let mut browser = None;
        let mut browser_count = 0;
        for source in &collection.sources {
            match source {
                Source::Scene(s) => {
                    scenes.entry(s.name.as_str()).or_insert(s);
                }
                Source::Browser(b) => {
                    browser_count += 1;
                    browser.get_or_insert(b);
                }
                Source::Other(_) => {}
            }
        }
        Self {
            scenes,
            names,
            browser,
            browser_count,
        }
    }

    pub(crate) fn scene(&self, name: &str) -> ScenegenResult<&'a SceneSource> {
        self.scenes
            .get(name)
            .copied()
            .ok_or_else(|| ScenegenError::scene_template(name))
    }

    /// Whether any source object, of any kind, is called `name`.
    pub(crate) fn is_name_taken(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub(crate) fn browser(&self) -> ScenegenResult<&'a BrowserSource> {
        self.browser.ok_or_else(ScenegenError::browser_template)
    }

    pub(crate) fn browser_count(&self) -> usize {
        self.browser_count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/index.rs"]
mod tests;
