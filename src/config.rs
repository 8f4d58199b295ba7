use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Artifact locations
// ---------------------------------------------------------------------------

/// Fixed relative locations of every artifact the app reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Gzip-compressed ONNX model, shipped with the app.
    pub compressed_model: PathBuf,
    /// Where the model is decompressed to on first start.
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub feature_columns: PathBuf,
    pub cleaned_data: PathBuf,
    pub encoded_data: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::under(Path::new(""))
    }
}

impl ArtifactPaths {
    /// The default layout rebased under `root`.
    pub fn under(root: &Path) -> Self {
        let artifacts = root.join("artifacts");
        let data = root.join("data");
        Self {
            compressed_model: artifacts.join("rf_model.onnx.gz"),
            model: artifacts.join("rf_model.onnx"),
            scaler: artifacts.join("scaler.onnx"),
            feature_columns: artifacts.join("feature_columns.json"),
            cleaned_data: data.join("cleaned_data.csv"),
            encoded_data: data.join("encoded_data.csv"),
        }
    }
}

// ---------------------------------------------------------------------------
// Form widget bounds
// ---------------------------------------------------------------------------

/// Bounds and default of one numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberField {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl NumberField {
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

pub struct FormLimits;

impl FormLimits {
    pub const ROOMS: NumberField = NumberField {
        label: "Number of Rooms",
        min: 1,
        max: 21,
        step: 1,
        default: 2,
    };
    pub const BATHROOMS: NumberField = NumberField {
        label: "Number of Bathrooms",
        min: 1,
        max: 20,
        step: 1,
        default: 1,
    };
    pub const CAR_PARKS: NumberField = NumberField {
        label: "Number of Car Parks",
        min: 0,
        max: 30,
        step: 1,
        default: 1,
    };
    pub const SIZE: NumberField = NumberField {
        label: "Size",
        min: 750,
        max: 12_000_000,
        step: 1,
        default: 1500,
    };
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

pub const WINDOW_TITLE: &str = "Kuala Lumpur House Price Prediction";
pub const WINDOW_SIZE: [f32; 2] = [760.0, 520.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [520.0, 380.0];

/// Currency label printed in front of every estimate.
pub const CURRENCY: &str = "RM";
