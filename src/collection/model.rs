use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::foundation::error::{ScenegenError, ScenegenResult};

/// Fields a typed node does not model explicitly, kept verbatim for round-tripping.
pub type Extra = Map<String, Value>;

/// Discriminator key of a source object.
pub const KIND_KEY: &str = "id";
/// Discriminator value for scene sources.
pub const SCENE_KIND: &str = "scene";
/// Discriminator value for browser sources.
pub const BROWSER_KIND: &str = "browser_source";
/// Scene items whose name starts with this prefix display a browser source.
pub const BROWSER_ITEM_PREFIX: &str = "Browser";

/// A complete scene collection as written by the streaming application.
///
/// The same type serves as the template library read before synthesis and as the generated
/// output. Only the keys synthesis touches are typed; everything else rides along in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneCollection {
    /// Collection label shown by the streaming application.
    #[serde(default)]
    pub name: String,
    /// Flat list of every source object, scenes included.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Display order of scenes.
    #[serde(default)]
    pub scene_order: Vec<SceneOrderEntry>,
    /// Scene shown in preview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_scene: Option<SceneRef>,
    /// Scene shown on program output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_program_scene: Option<SceneRef>,
    /// Untyped top-level keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One `scene_order` record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneOrderEntry {
    /// Name of the scene source.
    pub name: String,
    /// Untyped keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl SceneOrderEntry {
    /// Order entry for the scene called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Extra::new(),
        }
    }
}

/// Value of `current_scene` / `current_program_scene`.
///
/// The application itself writes a scene name; generated collections embed a full snapshot of
/// the active scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SceneRef {
    /// Reference by scene name.
    Name(String),
    /// Embedded copy of the scene object.
    Snapshot(Box<Source>),
}

/// A source object, discriminated by its `id` key.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// `"id": "scene"`.
    Scene(SceneSource),
    /// `"id": "browser_source"`.
    Browser(BrowserSource),
    /// Any other kind, kept as raw JSON (including its `id`).
    Other(Extra),
}

/// A scene: a named, ordered stack of display items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSource {
    /// Scene name, unique among scenes of a well-formed collection.
    pub name: String,
    /// Object identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Scene settings.
    #[serde(default)]
    pub settings: SceneSettings,
    /// Untyped keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Settings block of a scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Display layers, bottom first.
    #[serde(default)]
    pub items: Vec<SceneItem>,
    /// Untyped keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One display layer of a scene, pointing at a source object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    /// Name of the referenced source.
    #[serde(default)]
    pub name: String,
    /// Identifier of the referenced source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_uuid: Option<String>,
    /// Untyped keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// An embedded web view, used here to show one page of the slide PDF.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserSource {
    /// Source name.
    pub name: String,
    /// Object identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Browser settings.
    #[serde(default)]
    pub settings: BrowserSettings,
    /// Untyped keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Settings block of a browser source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Page the browser loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Reload the page whenever the scene becomes active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_when_active: Option<bool>,
    /// Untyped keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Source {
    /// The `id` discriminator, or `""` for an untyped object without one.
    pub fn kind(&self) -> &str {
        match self {
            Self::Scene(_) => SCENE_KIND,
            Self::Browser(_) => BROWSER_KIND,
            Self::Other(fields) => fields.get(KIND_KEY).and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// Source name, if present.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Scene(s) => Some(&s.name),
            Self::Browser(b) => Some(&b.name),
            Self::Other(fields) => fields.get("name").and_then(Value::as_str),
        }
    }

    /// Object identifier, if present.
    pub fn uuid(&self) -> Option<&str> {
        match self {
            Self::Scene(s) => s.uuid.as_deref(),
            Self::Browser(b) => b.uuid.as_deref(),
            Self::Other(fields) => fields.get("uuid").and_then(Value::as_str),
        }
    }

    /// Borrow as a scene.
    pub fn as_scene(&self) -> Option<&SceneSource> {
        match self {
            Self::Scene(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a browser source.
    pub fn as_browser(&self) -> Option<&BrowserSource> {
        match self {
            Self::Browser(b) => Some(b),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let mut fields = Extra::deserialize(deserializer)?;
        let kind = fields.get(KIND_KEY).and_then(Value::as_str);
        match kind {
            Some(SCENE_KIND) => {
                fields.remove(KIND_KEY);
                serde_json::from_value(Value::Object(fields))
                    .map(Self::Scene)
                    .map_err(|e| D::Error::custom(format!("scene source: {e}")))
            }
            Some(BROWSER_KIND) => {
                fields.remove(KIND_KEY);
                serde_json::from_value(Value::Object(fields))
                    .map(Self::Browser)
                    .map_err(|e| D::Error::custom(format!("browser source: {e}")))
            }
            _ => Ok(Self::Other(fields)),
        }
    }
}

impl Serialize for Source {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;

        let typed = match self {
            Self::Scene(s) => serde_json::to_value(s),
            Self::Browser(b) => serde_json::to_value(b),
            Self::Other(fields) => return fields.serialize(serializer),
        };
        let Value::Object(mut fields) = typed.map_err(S::Error::custom)? else {
            return Err(S::Error::custom("source did not serialize to a JSON object"));
        };
        fields.insert(KIND_KEY.to_string(), Value::String(self.kind().to_string()));
        fields.serialize(serializer)
    }
}

impl SceneSource {
    /// First item displaying a browser source.
    pub fn browser_item(&self) -> Option<&SceneItem> {
        self.settings
            .items
            .iter()
            .find(|item| item.name.starts_with(BROWSER_ITEM_PREFIX))
    }

    /// Mutable access to the first item displaying a browser source.
    pub fn browser_item_mut(&mut self) -> Option<&mut SceneItem> {
        self.settings
            .items
            .iter_mut()
            .find(|item| item.name.starts_with(BROWSER_ITEM_PREFIX))
    }
}

impl SceneCollection {
    /// Iterate over scene sources in list order.
    pub fn scenes(&self) -> impl Iterator<Item = &SceneSource> {
        self.sources.iter().filter_map(Source::as_scene)
    }

    /// First scene called `name`.
    pub fn find_scene(&self, name: &str) -> Option<&SceneSource> {
        self.scenes().find(|s| s.name == name)
    }

    /// Iterate over browser sources in list order.
    pub fn browsers(&self) -> impl Iterator<Item = &BrowserSource> {
        self.sources.iter().filter_map(Source::as_browser)
    }

    /// Identifiers of every source object that has one.
    pub fn uuids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().filter_map(Source::uuid)
    }

    /// Check the structural invariants between `scene_order`, scenes and browser items.
    ///
    /// - every `scene_order` entry names a scene in `sources`
    /// - every browser item with a `source_uuid` points at a `browser_source` in `sources`
    pub fn validate(&self) -> ScenegenResult<()> {
        let scene_names: HashSet<&str> = self.scenes().map(|s| s.name.as_str()).collect();
        for entry in &self.scene_order {
            if !scene_names.contains(entry.name.as_str()) {
                return Err(ScenegenError::validation(format!(
                    "scene_order entry '{}' does not name a scene source",
                    entry.name
                )));
            }
        }

        let browsers: HashSet<&str> = self.browsers().filter_map(|b| b.uuid.as_deref()).collect();
        for scene in self.scenes() {
            for item in &scene.settings.items {
                if !item.name.starts_with(BROWSER_ITEM_PREFIX) {
                    continue;
                }
                let Some(target) = item.source_uuid.as_deref() else {
                    continue;
                };
                if !browsers.contains(target) {
                    return Err(ScenegenError::validation(format!(
                        "scene '{}' item '{}' references missing browser source '{}'",
                        scene.name, item.name, target
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collection/model.rs"]
mod tests;
