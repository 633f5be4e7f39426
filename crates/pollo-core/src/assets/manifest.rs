use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const BUILTIN_MANIFEST: &str = include_str!("../../assets/manifest.json");

/// Image paths for every animation of every entity type:
/// `entity -> animation -> ordered frame paths`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetManifest {
    pub entities: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The manifest shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    /// Frame paths of one animation. Empty animations are an error.
    pub fn animation(&self, entity: &str, animation: &str) -> Result<&[String], ConfigError> {
        let section = self
            .entities
            .get(entity)
            .ok_or_else(|| ConfigError::MissingEntity(entity.to_string()))?;
        let frames = section
            .get(animation)
            .ok_or_else(|| ConfigError::MissingAnimation {
                entity: entity.to_string(),
                animation: animation.to_string(),
            })?;
        if frames.is_empty() {
            return Err(ConfigError::EmptyAnimation {
                entity: entity.to_string(),
                animation: animation.to_string(),
            });
        }
        Ok(frames)
    }

    /// Every path in deterministic (entity, animation, frame) order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entities
            .values()
            .flat_map(|section| section.values())
            .flatten()
            .map(String::as_str)
    }
}
