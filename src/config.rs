use crate::classify::ClassifierConfig;
use crate::error::Result;
use crate::heading::AntarcticHeading;
use crate::mesh::MeshOptions;
use crate::polygon::DEFAULT_DENSIFICATION;
use crate::view::DEFAULT_PIXEL_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Settings of the projection selection and the geometry builders
///
/// Every field falls back to its default when missing from the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub classifier: ClassifierConfig,
    pub antarctic_heading: AntarcticHeading,
    /// Vertices per densified polygon edge on the polar maps
    pub densification: usize,
    /// On-screen diagonal (pixels) below which a bounding box is shown as a
    /// marker
    pub pixel_threshold: f64,
    pub mesh: MeshOptions,
}

impl ViewerConfig {
    /// Parse a configuration from a JSON document
    ///
    /// # Examples
    ///
    /// ```
    /// use polarview::ViewerConfig;
    ///
    /// let config = ViewerConfig::from_json_str(r#"{"densification": 100}"#).unwrap();
    /// assert_eq!(config.densification, 100);
    /// assert_eq!(config.mesh.segments, 1000);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::DEFAULT,
            antarctic_heading: AntarcticHeading::default(),
            densification: DEFAULT_DENSIFICATION,
            pixel_threshold: DEFAULT_PIXEL_THRESHOLD,
            mesh: MeshOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use claims::{assert_err, assert_matches, assert_ok_eq};
    use insta::assert_debug_snapshot;

    #[test]
    fn empty_document_uses_defaults() {
        assert_ok_eq!(ViewerConfig::from_json_str("{}"), ViewerConfig::default());
    }

    #[test]
    fn defaults() {
        assert_debug_snapshot!(ViewerConfig::default(), @r"
        ViewerConfig {
            classifier: ClassifierConfig {
                arctic_min_latitude: 50.0,
                antarctic_max_latitude: -50.0,
            },
            antarctic_heading: Direct,
            densification: 50,
            pixel_threshold: 10.0,
            mesh: MeshOptions {
                height: 5000.0,
                segments: 1000,
                area_threshold: 20.0,
            },
        }
        ");
    }

    #[test]
    fn nested_overrides() {
        let json = r#"{
            "classifier": { "antarctic_max_latitude": -60 },
            "antarctic_heading": "mirrored",
            "mesh": { "segments": 200 }
        }"#;

        let config = ViewerConfig::from_json_str(json).unwrap();
        assert_eq!(config.classifier.arctic_min_latitude, 50.0);
        assert_eq!(config.classifier.antarctic_max_latitude, -60.0);
        assert_eq!(config.antarctic_heading, AntarcticHeading::Mirrored);
        assert_eq!(config.densification, 50);
        assert_eq!(config.pixel_threshold, 10.0);
        assert_eq!(config.mesh.segments, 200);
        assert_eq!(config.mesh.height, 5000.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        for json in [r#"{"densify": 10}"#, r#"{"mesh": {"heigth": 1}}"#, r#"{"antarctic_heading": "flipped"}"#] {
            assert_matches!(assert_err!(ViewerConfig::from_json_str(json)), Error::Json(_));
        }
    }
}
