use std::error::Error;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, ensure, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Tensor, ValueType};

use super::{FeatureScaler, ModelRuntime, Regressor};
use crate::data::model::{AlignedRow, ScaledVector};

/// A fitted ONNX graph with one float input of shape `[batch, n_features]`.
///
/// The exported scaler and the exported regressor both have this shape, so
/// one type backs both traits.
pub struct OnnxModel {
    session: Mutex<Session>,
    input: String,
    width: Option<usize>,
}

fn open_session(path: &Path) -> std::result::Result<Session, Box<dyn Error>> {
    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .commit_from_file(path)?;
    Ok(session)
}

impl OnnxModel {
    pub fn load(path: &Path) -> Result<Self> {
        let session = open_session(path)
            .map_err(|e| anyhow!("{e}"))
            .context("creating ONNX session")?;

        let first = session.inputs.first().context("graph declares no inputs")?;
        let input = first.name.clone();
        // Dynamic dimensions are negative and leave the width unknown.
        let width = match &first.input_type {
            ValueType::Tensor { shape, .. } => {
                shape.last().and_then(|&d| usize::try_from(d).ok())
            }
            _ => None,
        };
        log::debug!("ONNX graph {} takes '{input}' with width {width:?}", path.display());

        Ok(Self {
            session: Mutex::new(session),
            input,
            width,
        })
    }

    /// Run a single `[1, n]` row and return the first output, flattened.
    fn run_row(&self, row: &[f64]) -> Result<Vec<f32>> {
        self.try_run_row(row)
            .map_err(|e| anyhow!("{e}"))
            .context("running ONNX inference")
    }

    fn try_run_row(&self, row: &[f64]) -> std::result::Result<Vec<f32>, Box<dyn Error>> {
        let input_vec: Vec<f32> = row.iter().map(|&x| x as f32).collect();
        let input_tensor = Tensor::from_array(([1usize, row.len()], input_vec))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| "ONNX session lock poisoned")?;
        let outputs = session.run(ort::inputs![self.input.as_str() => input_tensor])?;
        let (_, output_data) = outputs[0].try_extract_tensor::<f32>()?;
        Ok(output_data.to_vec())
    }
}

impl FeatureScaler for OnnxModel {
    fn n_features(&self) -> Option<usize> {
        self.width
    }

    fn transform(&self, row: &AlignedRow) -> Result<ScaledVector> {
        let out = self.run_row(&row.0)?;
        ensure!(
            out.len() == row.0.len(),
            "scaler returned {} values for {} inputs",
            out.len(),
            row.0.len()
        );
        Ok(ScaledVector(out.into_iter().map(f64::from).collect()))
    }
}

impl Regressor for OnnxModel {
    fn n_features(&self) -> Option<usize> {
        self.width
    }

    fn predict_row(&self, row: &ScaledVector) -> Result<f64> {
        let out = self.run_row(&row.0)?;
        out.first()
            .map(|&v| f64::from(v))
            .context("model returned no prediction")
    }
}

/// Loads both fitted artifacts as ONNX Runtime sessions.
pub struct OnnxRuntime;

impl ModelRuntime for OnnxRuntime {
    fn load_scaler(&self, path: &Path) -> Result<Box<dyn FeatureScaler>> {
        Ok(Box::new(OnnxModel::load(path)?))
    }

    fn load_model(&self, path: &Path) -> Result<Box<dyn Regressor>> {
        Ok(Box::new(OnnxModel::load(path)?))
    }
}
