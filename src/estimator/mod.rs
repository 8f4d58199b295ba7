/// Prediction path: aligned row → scaler → model → price.
///
/// ```text
///  HouseInputs ──assemble──► InputRecord ──align──► AlignedRow
///                                                       │
///                                                  FeatureScaler
///                                                       ▼
///               PredictedPrice ◄──Regressor──── ScaledVector
/// ```
///
/// Both fitted stages are opaque ONNX graphs run through `ort`.
pub mod onnx;

pub use onnx::OnnxRuntime;

use std::path::Path;

use anyhow::Result;

use crate::data::encode::{align, assemble_record};
use crate::data::model::{AlignedRow, FeatureColumns, HouseInputs, PredictedPrice, ScaledVector};

/// A fitted transform applied to the aligned row before prediction.
pub trait FeatureScaler {
    /// Input width fixed by the artifact, if it declares one.
    fn n_features(&self) -> Option<usize>;
    fn transform(&self, row: &AlignedRow) -> Result<ScaledVector>;
}

/// A fitted model producing one value per row.
pub trait Regressor {
    /// Input width fixed by the artifact, if it declares one.
    fn n_features(&self) -> Option<usize>;
    fn predict_row(&self, row: &ScaledVector) -> Result<f64>;
}

/// Turns artifact files into a scaler and a model.
pub trait ModelRuntime {
    fn load_scaler(&self, path: &Path) -> Result<Box<dyn FeatureScaler>>;
    fn load_model(&self, path: &Path) -> Result<Box<dyn Regressor>>;
}

/// Encode `inputs`, scale them and run the model on that single row.
pub fn estimate_price(
    columns: &FeatureColumns,
    scaler: &dyn FeatureScaler,
    model: &dyn Regressor,
    inputs: &HouseInputs,
) -> Result<PredictedPrice> {
    let aligned = align(&assemble_record(inputs), columns);
    log::debug!("Aligned row: {:?}", aligned.0);
    let scaled = scaler.transform(&aligned)?;
    Ok(PredictedPrice(model.predict_row(&scaled)?))
}
