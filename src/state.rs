use crate::data::bootstrap::LoadedArtifacts;
use crate::data::encode::all_category_options;
use crate::data::model::{Category, CategoryChoices, HouseInputs, PredictedPrice};
use crate::estimator::estimate_price;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Result of the last Calculate press.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Price(PredictedPrice),
    /// Inference failed; the message is shown instead of a price.
    Failed(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Current form values.
    pub inputs: HouseInputs,

    /// Choices offered by each dropdown, derived from the feature columns.
    pub options: CategoryChoices,

    /// Outcome for the inputs currently on screen, set only by Calculate.
    pub estimate: Option<Estimate>,

    /// Number of listings in the reference dataset, shown in the status bar.
    pub reference_rows: usize,
}

/// What happened in the form during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormEvents {
    pub changed: bool,
    pub calculate: bool,
}

impl AppState {
    /// Build the initial form for a set of loaded artifacts. Each dropdown
    /// starts on its first option.
    pub fn new(artifacts: &LoadedArtifacts) -> Self {
        let options = all_category_options(&artifacts.columns);
        let mut inputs = HouseInputs::default();
        for category in Category::ALL {
            let choices = options.for_category(category);
            if choices.is_empty() {
                log::warn!("No {:?} columns in feature list", category);
            }
            *inputs.selection_mut(category) = choices.first().cloned();
        }

        Self {
            inputs,
            options,
            estimate: None,
            reference_rows: artifacts.reference.cleaned.len(),
        }
    }

    /// Apply one frame's form events.
    pub fn handle(&mut self, events: FormEvents, artifacts: &LoadedArtifacts) {
        if events.changed {
            self.estimate = None;
        }
        if events.calculate {
            self.calculate(artifacts);
        }
    }

    /// Run the prediction for the current inputs.
    pub fn calculate(&mut self, artifacts: &LoadedArtifacts) {
        let result = estimate_price(
            &artifacts.columns,
            artifacts.scaler.as_ref(),
            artifacts.model.as_ref(),
            &self.inputs,
        );
        self.estimate = Some(match result {
            Ok(price) => {
                log::info!("Estimated {price} for {:?}", self.inputs);
                Estimate::Price(price)
            }
            Err(e) => {
                log::error!("Prediction failed for {:?}: {e:#}", self.inputs);
                Estimate::Failed(format!("{e:#}"))
            }
        });
    }

    /// The single output line, if Calculate has been pressed.
    pub fn output_line(&self) -> Option<String> {
        self.estimate.as_ref().map(|estimate| match estimate {
            Estimate::Price(p) => format!("Predicted Price: {p}"),
            Estimate::Failed(msg) => format!("Prediction failed: {msg}"),
        })
    }
}
