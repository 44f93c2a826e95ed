use std::collections::HashSet;

use crate::collection::model::{
    BROWSER_ITEM_PREFIX, BrowserSource, SceneCollection, SceneOrderEntry, SceneRef, SceneSource,
    Source,
};
use crate::foundation::error::{ScenegenError, ScenegenResult};
use crate::foundation::ids::UuidAllocator;
use crate::runlist::{PageNumber, RunListEntry};
use crate::synth::index::TemplateIndex;

/// Browser names ending with this suffix reload their page each time the scene is shown.
pub const CONTINUATION_SUFFIX: &str = "->";

/// What to do when a generated scene name is already taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail the run if a generated scene or browser name repeats within the run-list or matches
    /// the name of any source object already in the collection.
    #[default]
    Reject,
    /// Append duplicates anyway; they differ only by identifier.
    Allow,
}

/// Knobs for [`synthesize_with`].
#[derive(Clone, Debug, Default)]
pub struct SynthesisOptions {
    /// Handling of repeated scene names.
    pub duplicates: DuplicatePolicy,
}

/// One generated scene and the browser source wired into it, if the scene has a browser item.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedScene {
    /// The cloned, renamed scene.
    pub scene: SceneSource,
    /// The cloned browser source its browser item now points at.
    pub browser: Option<BrowserSource>,
}

/// URL of one slide page: `base + "&page=" + page`, no re-encoding.
pub fn slide_page_url(slide_base_url: &str, page: &PageNumber) -> String {
    format!("{slide_base_url}&page={page}")
}

/// Synthesize a scene collection with default [`SynthesisOptions`].
///
/// See [`synthesize_with`].
pub fn synthesize(
    run_list: &[RunListEntry],
    template: &SceneCollection,
    output_name: &str,
    slide_base_url: &str,
) -> ScenegenResult<SceneCollection> {
    synthesize_with(
        run_list,
        template,
        output_name,
        slide_base_url,
        &SynthesisOptions::default(),
    )
}

/// Generate one scene per run-list entry and append them to a copy of `template`.
///
/// For every entry, in order, the named template scene is cloned, renamed and given a fresh
/// identifier. If the clone has an item whose name starts with `Browser`, the collection's first
/// `browser_source` is cloned as well, pointed at the entry's slide page, and the item is rewired
/// to it. The first generated scene becomes both the current and the program scene, and the
/// result is renamed to `output_name`.
///
/// `run_list` must not include the header row. Any failure aborts the whole run and `template`
/// is never modified.
#[tracing::instrument(skip(run_list, template, opts), fields(rows = run_list.len()))]
pub fn synthesize_with(
    run_list: &[RunListEntry],
    template: &SceneCollection,
    output_name: &str,
    slide_base_url: &str,
    opts: &SynthesisOptions,
) -> ScenegenResult<SceneCollection> {
    if run_list.is_empty() {
        return Err(ScenegenError::EmptyRunList);
    }

    let index = TemplateIndex::build(template);
    if opts.duplicates == DuplicatePolicy::Reject {
        check_unique_names(run_list, &index)?;
    }
    if index.browser_count() > 1 {
        tracing::warn!(
            count = index.browser_count(),
            "several browser_source objects found, cloning the first one"
        );
    }

    let mut ids = UuidAllocator::with_reserved(template.uuids());
    let generated = run_list
        .iter()
        .map(|entry| generate_scene(entry, &index, slide_base_url, &mut ids))
        .collect::<ScenegenResult<Vec<_>>>()?;

    let browsers = generated.iter().filter(|g| g.browser.is_some()).count();
    tracing::info!(
        scenes = generated.len(),
        browsers,
        "generated scenes for '{output_name}'"
    );

    Ok(assemble(template.clone(), generated, output_name))
}

fn browser_name(scene_name: &str) -> String {
    format!("{BROWSER_ITEM_PREFIX}{scene_name}")
}

/// Reject any scene or browser name that is already used by a source object in the template
/// collection or by an earlier row of this run.
fn check_unique_names(run_list: &[RunListEntry], index: &TemplateIndex<'_>) -> ScenegenResult<()> {
    let mut generated = HashSet::with_capacity(run_list.len() * 2);
    let mut claim = |name: String| {
        if index.is_name_taken(&name) || generated.contains(&name) {
            return Err(ScenegenError::DuplicateScene(name));
        }
        generated.insert(name);
        Ok(())
    };

    for entry in run_list {
        claim(entry.scene_name.clone())?;
        // Rows with an unknown template fail later with TemplateNotFound.
        let wired = index
            .scene(&entry.template_name)
            .is_ok_and(|t| t.browser_item().is_some());
        if wired {
            claim(browser_name(&entry.scene_name))?;
        }
    }
    Ok(())
}

fn generate_scene(
    entry: &RunListEntry,
    index: &TemplateIndex<'_>,
    slide_base_url: &str,
    ids: &mut UuidAllocator,
) -> ScenegenResult<GeneratedScene> {
    let mut scene = index.scene(&entry.template_name)?.clone();
    scene.name = entry.scene_name.clone();
    scene.uuid = Some(ids.fresh());

    let browser = match scene.browser_item_mut() {
        Some(item) => {
            let mut browser = index.browser()?.clone();
            browser.name = browser_name(&entry.scene_name);
            browser.uuid = Some(ids.fresh());
            browser.settings.url = Some(slide_page_url(slide_base_url, &entry.page));
            if browser.name.ends_with(CONTINUATION_SUFFIX) {
                browser.settings.restart_when_active = Some(true);
            }

            item.name = browser.name.clone();
            item.source_uuid = browser.uuid.clone();
            Some(browser)
        }
        None => {
            tracing::debug!(
                scene = %entry.scene_name,
                template = %entry.template_name,
                "template has no browser item"
            );
            None
        }
    };

    Ok(GeneratedScene { scene, browser })
}

fn assemble(
    mut collection: SceneCollection,
    generated: Vec<GeneratedScene>,
    output_name: &str,
) -> SceneCollection {
    if let Some(first) = generated.first() {
        let active = SceneRef::Snapshot(Box::new(Source::Scene(first.scene.clone())));
        collection.current_scene = Some(active.clone());
        collection.current_program_scene = Some(active);
    }

    collection.sources.reserve(generated.len() * 2);
    for GeneratedScene { scene, browser } in generated {
        collection
            .scene_order
            .push(SceneOrderEntry::new(scene.name.clone()));
        collection.sources.push(Source::Scene(scene));
        if let Some(browser) = browser {
            collection.sources.push(Source::Browser(browser));
        }
    }

    collection.name = output_name.to_string();
    collection
}

#[cfg(test)]
#[path = "../../tests/unit/synth/engine.rs"]
mod tests;
