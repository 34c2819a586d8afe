use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{SimplificationMethod, DEFAULT_THRESHOLD, DEFAULT_TOLERANCE},
    fence::HemisphereLabeling,
};

/// Tunables shared by every image of a batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ConversionSettings {
    /// Luminance cutoff; brighter pixels are foreground
    pub threshold: u8,
    /// Simplification tolerance in pixels
    #[schemars(range(min = 0.0))]
    pub tolerance: f64,
    pub simplification: SimplificationMethod,
    /// Gaussian blur sigma applied before thresholding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_sigma: Option<f32>,
    pub hemisphere: HemisphereLabeling,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            tolerance: DEFAULT_TOLERANCE,
            simplification: SimplificationMethod::default(),
            blur_sigma: None,
            hemisphere: HemisphereLabeling::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ConversionSettings = serde_json::from_str(r#"{ "tolerance": 0.5 }"#).unwrap();
        assert_eq!(settings.tolerance, 0.5);
        assert_eq!(settings.threshold, 120);
        assert_eq!(settings.simplification, SimplificationMethod::DouglasPeucker);
        assert_eq!(settings.hemisphere, HemisphereLabeling::FixedNorthEast);
        assert_eq!(settings.blur_sigma, None);
    }

    #[test]
    fn test_enum_spelling() {
        let settings: ConversionSettings =
            serde_json::from_str(r#"{ "simplification": "visvalingam_whyatt", "hemisphere": "from_sign" }"#).unwrap();
        assert_eq!(settings.simplification, SimplificationMethod::VisvalingamWhyatt);
        assert_eq!(settings.hemisphere, HemisphereLabeling::FromSign);
    }
}
