use std::collections::HashMap;

use crate::assets::manifest::AssetManifest;
use crate::components::animation::Clip;
use crate::error::ConfigError;

/// Handle to one image. The host resolves it through [`FrameCatalog::paths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u32);

/// Interned image paths plus the manifest they came from.
/// Builds validated [`Clip`]s by `(entity, animation)` name.
#[derive(Debug, Clone, Default)]
pub struct FrameCatalog {
    manifest: AssetManifest,
    paths: Vec<String>,
    index: HashMap<String, FrameId>,
}

impl FrameCatalog {
    /// Intern every path in the manifest. Shared paths get one id.
    pub fn from_manifest(manifest: AssetManifest) -> Self {
        let mut catalog = Self {
            paths: Vec::new(),
            index: HashMap::new(),
            manifest: AssetManifest::default(),
        };
        for path in manifest.paths() {
            catalog.intern(path);
        }
        catalog.manifest = manifest;
        catalog
    }

    fn intern(&mut self, path: &str) -> FrameId {
        if let Some(&id) = self.index.get(path) {
            return id;
        }
        let id = FrameId(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.index.insert(path.to_string(), id);
        id
    }

    /// Look up a frame by path.
    pub fn get(&self, path: &str) -> Option<FrameId> {
        self.index.get(path).copied()
    }

    pub fn path(&self, id: FrameId) -> Option<&str> {
        self.paths.get(id.0 as usize).map(String::as_str)
    }

    /// All paths, indexed by `FrameId`.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Paths as a JSON array for the host's image preloader.
    pub fn paths_json(&self) -> String {
        serde_json::to_string(&self.paths).unwrap_or_else(|err| {
            log::warn!("frame catalog: could not serialize paths: {}", err);
            String::from("[]")
        })
    }

    /// Build a clip. Missing or empty animations are errors.
    pub fn clip(&self, entity: &str, animation: &str) -> Result<Clip, ConfigError> {
        let frames = self
            .manifest
            .animation(entity, animation)?
            .iter()
            .filter_map(|path| self.get(path))
            .collect();
        Ok(Clip::new(frames))
    }

    /// Build a clip that must have exactly `expected` frames.
    pub fn clip_exact(
        &self,
        entity: &str,
        animation: &str,
        expected: usize,
    ) -> Result<Clip, ConfigError> {
        let clip = self.clip(entity, animation)?;
        if clip.len() != expected {
            return Err(ConfigError::FrameCount {
                entity: entity.to_string(),
                animation: animation.to_string(),
                expected,
                found: clip.len(),
            });
        }
        Ok(clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(json: &str) -> FrameCatalog {
        FrameCatalog::from_manifest(AssetManifest::from_json(json).unwrap())
    }

    #[test]
    fn shared_paths_intern_once() {
        let cat = catalog(
            r#"{
                "a": { "idle": ["x.png", "y.png"] },
                "b": { "idle": ["y.png"] }
            }"#,
        );
        assert_eq!(cat.paths().len(), 2);
        let a = cat.clip("a", "idle").unwrap();
        let b = cat.clip("b", "idle").unwrap();
        assert_eq!(a.frame(1), b.frame(0));
        assert_eq!(cat.path(FrameId(0)), Some("x.png"));
    }

    #[test]
    fn clip_exact_checks_length() {
        let cat = catalog(r#"{ "bar": { "health": ["0.png", "50.png", "100.png"] } }"#);
        assert!(cat.clip_exact("bar", "health", 3).is_ok());
        assert!(matches!(
            cat.clip_exact("bar", "health", 6),
            Err(ConfigError::FrameCount { expected: 6, found: 3, .. })
        ));
    }

    #[test]
    fn unknown_path_returns_none() {
        let cat = FrameCatalog::default();
        assert!(cat.get("nonexistent.png").is_none());
        assert_eq!(cat.paths_json(), "[]");
    }
}
