//! # cifstack I/O
//!
//! Reads CIF layout text into a shape database, scans layouts for the layer
//! names they use, and loads the JSON scene configuration.

pub mod cif;
pub mod config;
pub mod inventory;

pub use cif::{parse_cif, read_cif_file, CifError, CifReader};
pub use config::{ConfigError, SceneConfig};
pub use inventory::LayerInventory;
