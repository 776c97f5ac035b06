use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a layer stack.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayerError {
    #[error("Layer '{0}' is already part of the stack")]
    Duplicate(String),
}

/// A manufacturing layer in the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    /// Display color. Layers without one render in [`LayerColor::FALLBACK`].
    #[serde(default)]
    pub color: Option<LayerColor>,
    #[serde(default)]
    pub description: String,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: None,
            description: String::new(),
        }
    }

    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = Some(LayerColor { r, g, b });
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }
}

/// RGB color for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LayerColor {
    /// Color used for any layer the stack has no color for.
    pub const FALLBACK: LayerColor = LayerColor {
        r: 255,
        g: 255,
        b: 255,
    };
}

impl Default for LayerColor {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// The ordered technology stack. A layer's position in the list is its
/// stacking index; the list order never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// The stock stack for CIF layouts: drawn layers first, then the contact
    /// families that `4N` records refer to.
    pub fn cif_default() -> Self {
        let layers = vec![
            Layer::new("KN").with_color(200, 0, 0),
            Layer::new("CM1").with_color(0, 0, 0),
            Layer::new("CM2").with_color(0, 255, 255),
            Layer::new("CSI").with_color(255, 165, 0),
            Layer::new("P").with_color(0, 0, 255),
            Layer::new("NA").with_color(255, 0, 0),
            Layer::new("NE").with_color(173, 216, 230),
            Layer::new("PE").with_color(255, 255, 0),
            Layer::new("CPA").with_color(255, 255, 0),
            Layer::new("CNA").with_color(255, 192, 203),
            Layer::new("CPE").with_color(165, 42, 42),
            Layer::new("CNE").with_color(144, 238, 144),
            Layer::new("SP").with_color(128, 128, 128),
            Layer::new("SN").with_color(128, 128, 128),
            Layer::new("SI").with_color(0, 128, 0),
            Layer::new("M1").with_color(255, 0, 255),
            Layer::new("M2").with_color(0, 255, 255),
            // Contact families
            Layer::new("C").with_color(238, 130, 238)
                .with_description("contact family"),
            Layer::new("E").with_color(0, 128, 128)
                .with_description("contact family"),
            Layer::new("S").with_color(128, 128, 0)
                .with_description("contact family"),
            Layer::new("TN").with_color(128, 0, 0)
                .with_description("contact family"),
            Layer::new("TP").with_color(0, 0, 128)
                .with_description("contact family"),
            Layer::new("X").with_color(64, 224, 208)
                .with_description("contact family"),
            Layer::new("Y").with_color(0, 255, 0)
                .with_description("contact family"),
            Layer::new("ZERO").with_color(75, 0, 130)
                .with_description("contact family"),
        ];
        Self { layers }
    }

    /// Append a layer at the top of the stack.
    pub fn add_layer(&mut self, layer: Layer) -> Result<(), LayerError> {
        if self.contains(&layer.name) {
            return Err(LayerError::Duplicate(layer.name));
        }
        self.layers.push(layer);
        Ok(())
    }

    pub fn get_layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_layer(name).is_some()
    }

    /// Position of `name` in the stack, `None` for layers outside it.
    pub fn stack_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    /// Elevation of the bottom face of solids on `layer`.
    ///
    /// Layers are spaced by the layer count, independently of any extrusion
    /// thickness: `stack_index * layer_count`. Unknown or unset layers sit
    /// at 0.0.
    pub fn base_z(&self, layer: Option<&str>) -> f64 {
        layer
            .and_then(|name| self.stack_index(name))
            .map(|index| (index * self.layer_count()) as f64)
            .unwrap_or(0.0)
    }

    /// Display color for `layer`, or [`LayerColor::FALLBACK`] when the layer is
    /// unset, unknown, or has no color.
    pub fn color_of(&self, layer: Option<&str>) -> LayerColor {
        layer
            .and_then(|name| self.get_layer(name))
            .and_then(|l| l.color)
            .unwrap_or(LayerColor::FALLBACK)
    }

    pub fn all_layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl TryFrom<Vec<Layer>> for LayerStack {
    type Error = LayerError;

    fn try_from(layers: Vec<Layer>) -> Result<Self, Self::Error> {
        let mut stack = Self::new();
        for layer in layers {
            stack.add_layer(layer)?;
        }
        Ok(stack)
    }
}

impl From<LayerStack> for Vec<Layer> {
    fn from(stack: LayerStack) -> Self {
        stack.layers
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::cif_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stack_order() {
        let stack = LayerStack::cif_default();
        assert_eq!(stack.layer_count(), 25);
        assert_eq!(stack.stack_index("KN"), Some(0));
        assert_eq!(stack.stack_index("M1"), Some(15));
        assert_eq!(stack.stack_index("ZERO"), Some(24));
        assert_eq!(stack.stack_index("M3"), None);
    }

    #[test]
    fn test_contact_families_labelled() {
        let stack = LayerStack::cif_default();
        assert_eq!(stack.get_layer("TN").unwrap().description, "contact family");
        assert_eq!(stack.get_layer("ZERO").unwrap().description, "contact family");
        assert!(stack.get_layer("M1").unwrap().description.is_empty());
    }

    #[test]
    fn test_base_z_uses_layer_count_spacing() {
        let stack = LayerStack::cif_default();
        assert_eq!(stack.base_z(Some("KN")), 0.0);
        assert_eq!(stack.base_z(Some("CM1")), 25.0);
        assert_eq!(stack.base_z(Some("M1")), 375.0);
        assert_eq!(stack.base_z(Some("C")), 425.0);
    }

    #[test]
    fn test_unknown_layer_defaults() {
        let stack = LayerStack::cif_default();
        assert_eq!(stack.base_z(Some("POLY2")), 0.0);
        assert_eq!(stack.base_z(None), 0.0);
        assert_eq!(stack.color_of(Some("POLY2")), LayerColor::FALLBACK);
        assert_eq!(stack.color_of(None), LayerColor::FALLBACK);
    }

    #[test]
    fn test_color_lookup_independent_of_index() {
        let mut stack = LayerStack::new();
        stack.add_layer(Layer::new("A")).unwrap();
        stack.add_layer(Layer::new("B").with_color(1, 2, 3)).unwrap();

        assert_eq!(stack.stack_index("A"), Some(0));
        assert_eq!(stack.color_of(Some("A")), LayerColor::FALLBACK);
        assert_eq!(stack.color_of(Some("B")), LayerColor { r: 1, g: 2, b: 3 });
        assert_eq!(stack.base_z(Some("B")), 2.0);
    }

    #[test]
    fn test_duplicate_layer_rejected() {
        let mut stack = LayerStack::new();
        stack.add_layer(Layer::new("M1")).unwrap();
        let err = stack.add_layer(Layer::new("M1")).unwrap_err();
        assert_eq!(err, LayerError::Duplicate("M1".into()));
        assert_eq!(stack.layer_count(), 1);
    }

    #[test]
    fn test_stack_json_is_a_layer_list() {
        let json = r#"[{"name": "M1", "color": {"r": 255, "g": 0, "b": 255}}, {"name": "M2"}]"#;
        let stack: LayerStack = serde_json::from_str(json).unwrap();
        assert_eq!(stack.stack_index("M2"), Some(1));
        assert_eq!(stack.color_of(Some("M2")), LayerColor::FALLBACK);

        let dup = r#"[{"name": "M1"}, {"name": "M1"}]"#;
        assert!(serde_json::from_str::<LayerStack>(dup).is_err());
    }
}
