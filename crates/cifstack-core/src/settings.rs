use serde::{Deserialize, Serialize};

/// Extrusion and admission parameters for one scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionSettings {
    /// Height of a polygon solid.
    pub layer_thickness: f64,
    /// Height of the posts drawn for point and segment markers.
    pub spike_thickness: f64,
    /// Half-width of a marker post.
    pub spike_width: f64,
    /// Largest accepted X or Y extent of a shape, inclusive.
    pub max_size_threshold: i64,
}

impl Default for ExtrusionSettings {
    fn default() -> Self {
        Self {
            layer_thickness: 50.0,
            spike_thickness: 500.0,
            spike_width: 20.0,
            max_size_threshold: 15_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: ExtrusionSettings =
            serde_json::from_str(r#"{"layer_thickness": 80.0}"#).unwrap();
        assert_eq!(settings.layer_thickness, 80.0);
        assert_eq!(settings.spike_thickness, 500.0);
        assert_eq!(settings.max_size_threshold, 15_000);
    }
}
