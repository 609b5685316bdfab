use std::path::Path;

use tract_onnx::prelude::*;

use crate::models::{StrokeInput, VALID_SMOKING_STATUS, VALID_WORK_TYPE};

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/stroke_xgb.onnx";

/// Width of the encoded feature row: three numeric columns plus one-hot
/// slots for each categorical level.
pub const FEATURE_WIDTH: usize = 3 + VALID_SMOKING_STATUS.len() + VALID_WORK_TYPE.len();

/// Classifies a validated record into a binary stroke class (1 = stroke
/// risk, 0 = none). Callers must run domain validation first.
pub trait Predictor: Send + Sync {
    fn predict(&self, input: &StrokeInput) -> anyhow::Result<i64>;
}

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// The exported XGBoost pipeline, loaded once at startup.
pub struct StrokeModel {
    model: RunnablePlan,
}

impl StrokeModel {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_WIDTH)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model })
    }
}

/// Encodes a record into the feature layout the pipeline was trained with:
/// `[age, high_glucose_flag, bmi]` followed by the one-hot smoking and work
/// slots, in the order of the valid-value tables.
pub fn encode_features(input: &StrokeInput) -> [f32; FEATURE_WIDTH] {
    let mut row = [0.0f32; FEATURE_WIDTH];
    row[0] = input.age as f32;
    row[1] = input.high_glucose_flag as f32;
    row[2] = input.bmi as f32;

    if let Some(slot) = VALID_SMOKING_STATUS
        .iter()
        .position(|s| *s == input.smoking_status)
    {
        row[3 + slot] = 1.0;
    }
    if let Some(slot) = VALID_WORK_TYPE.iter().position(|w| *w == input.work_type) {
        row[3 + VALID_SMOKING_STATUS.len() + slot] = 1.0;
    }

    row
}

impl Predictor for StrokeModel {
    fn predict(&self, input: &StrokeInput) -> anyhow::Result<i64> {
        let row = encode_features(input);
        let tensor = Tensor::from_shape(&[1, FEATURE_WIDTH], &row)?;
        let outputs = self.model.run(tvec!(tensor.into()))?;

        let margin: f32 = *outputs[0]
            .to_array_view::<f32>()?
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("model produced no output"))?;

        // The exported booster emits a raw margin; logistic link, 0.5 cut.
        let probability = 1.0 / (1.0 + (-margin).exp());
        Ok(i64::from(probability >= 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(smoking_status: &str, work_type: &str) -> StrokeInput {
        StrokeInput {
            age: 54.0,
            high_glucose_flag: 0,
            bmi: 24.1,
            smoking_status: smoking_status.to_string(),
            work_type: work_type.to_string(),
        }
    }

    #[test]
    fn numeric_columns_lead_the_row() {
        let row = encode_features(&record("smokes", "Govt_job"));
        assert_eq!(row[0], 54.0);
        assert_eq!(row[1], 0.0);
        assert_eq!(row[2], 24.1);
    }

    #[test]
    fn one_hot_slots_are_exclusive() {
        let row = encode_features(&record("smokes", "Govt_job"));
        let smoking = &row[3..3 + VALID_SMOKING_STATUS.len()];
        let work = &row[3 + VALID_SMOKING_STATUS.len()..];

        assert_eq!(smoking.iter().sum::<f32>(), 1.0);
        assert_eq!(smoking[2], 1.0); // "smokes"
        assert_eq!(work.iter().sum::<f32>(), 1.0);
        assert_eq!(work[2], 1.0); // "Govt_job"
    }

    #[test]
    fn feature_width_covers_every_slot() {
        assert_eq!(FEATURE_WIDTH, 12);
        let row = encode_features(&record("Unknown", "Never_worked"));
        assert_eq!(row[3 + VALID_SMOKING_STATUS.len() - 1], 1.0);
        assert_eq!(row[FEATURE_WIDTH - 1], 1.0);
    }

    #[test]
    fn load_fails_on_missing_artifact() {
        assert!(StrokeModel::load("models/does_not_exist.onnx").is_err());
    }
}
