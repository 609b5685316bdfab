use serde::{Deserialize, Serialize};

pub const VALID_SMOKING_STATUS: [&str; 4] =
    ["never smoked", "formerly smoked", "smokes", "Unknown"];

pub const VALID_WORK_TYPE: [&str; 5] =
    ["Private", "Self-employed", "Govt_job", "children", "Never_worked"];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StrokeInput {
    pub age: f64,
    pub high_glucose_flag: i64,
    pub bmi: f64,
    pub smoking_status: String,
    pub work_type: String,
}

/// A named domain check. Returns the violation message, or `None` if the
/// field is in range.
pub type Rule = (&'static str, fn(&StrokeInput) -> Option<String>);

/// Checked in order; the first violation is the one reported.
pub const RULES: &[Rule] = &[
    ("age", check_age),
    ("high_glucose_flag", check_high_glucose_flag),
    ("bmi", check_bmi),
    ("smoking_status", check_smoking_status),
    ("work_type", check_work_type),
];

fn check_age(input: &StrokeInput) -> Option<String> {
    (input.age < 0.0).then(|| "Age must be non-negative.".to_string())
}

fn check_high_glucose_flag(input: &StrokeInput) -> Option<String> {
    (input.high_glucose_flag != 0 && input.high_glucose_flag != 1)
        .then(|| "high_glucose_flag must be 0 or 1.".to_string())
}

fn check_bmi(input: &StrokeInput) -> Option<String> {
    (input.bmi <= 0.0).then(|| "BMI must be positive.".to_string())
}

fn check_smoking_status(input: &StrokeInput) -> Option<String> {
    (!VALID_SMOKING_STATUS.contains(&input.smoking_status.as_str()))
        .then(|| format!("smoking_status must be one of {:?}.", VALID_SMOKING_STATUS))
}

fn check_work_type(input: &StrokeInput) -> Option<String> {
    (!VALID_WORK_TYPE.contains(&input.work_type.as_str()))
        .then(|| format!("work_type must be one of {:?}.", VALID_WORK_TYPE))
}

impl StrokeInput {
    pub fn validate(&self) -> Result<(), String> {
        for (_, rule) in RULES {
            if let Some(violation) = rule(self) {
                return Err(violation);
            }
        }
        Ok(())
    }
}

/// Binary class emitted by the model, mapped to its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLabel {
    NoStroke,
    Stroke,
}

impl StrokeLabel {
    pub fn from_class(class: i64) -> Self {
        match class {
            1 => StrokeLabel::Stroke,
            _ => StrokeLabel::NoStroke,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeLabel::Stroke => "Stroke",
            StrokeLabel::NoStroke => "No Stroke",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: &'static str,
    pub status: &'static str,
    pub input: StrokeInput,
}

impl PredictionResponse {
    pub fn new(label: StrokeLabel, input: StrokeInput) -> Self {
        PredictionResponse {
            prediction: label.as_str(),
            status: "success",
            input,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> StrokeInput {
        StrokeInput {
            age: 67.0,
            high_glucose_flag: 1,
            bmi: 28.4,
            smoking_status: "formerly smoked".to_string(),
            work_type: "Private".to_string(),
        }
    }

    #[test]
    fn valid_input_passes_all_rules() {
        assert_eq!(valid_input().validate(), Ok(()));
    }

    #[test]
    fn negative_age_rejected() {
        let mut input = valid_input();
        input.age = -1.0;
        assert_eq!(input.validate(), Err("Age must be non-negative.".to_string()));
    }

    #[test]
    fn zero_age_allowed() {
        let mut input = valid_input();
        input.age = 0.0;
        assert!(check_age(&input).is_none());
    }

    #[test]
    fn out_of_range_flag_rejected() {
        let mut input = valid_input();
        input.high_glucose_flag = 2;
        assert_eq!(
            input.validate(),
            Err("high_glucose_flag must be 0 or 1.".to_string())
        );
    }

    #[test]
    fn zero_bmi_rejected() {
        let mut input = valid_input();
        input.bmi = 0.0;
        assert_eq!(input.validate(), Err("BMI must be positive.".to_string()));
    }

    #[test]
    fn unknown_smoking_status_is_valid() {
        let mut input = valid_input();
        input.smoking_status = "Unknown".to_string();
        assert!(check_smoking_status(&input).is_none());
    }

    #[test]
    fn bad_smoking_status_lists_valid_set() {
        let mut input = valid_input();
        input.smoking_status = "vapes".to_string();
        let message = input.validate().unwrap_err();
        assert!(message.starts_with("smoking_status must be one of"));
        assert!(message.contains("never smoked"));
        assert!(message.contains("Unknown"));
    }

    #[test]
    fn bad_work_type_lists_valid_set() {
        let mut input = valid_input();
        input.work_type = "Retired".to_string();
        let message = input.validate().unwrap_err();
        assert!(message.starts_with("work_type must be one of"));
        assert!(message.contains("Never_worked"));
    }

    #[test]
    fn first_violation_wins() {
        // Both age and bmi out of range: the age rule is listed first.
        let mut input = valid_input();
        input.age = -5.0;
        input.bmi = -2.0;
        assert_eq!(input.validate(), Err("Age must be non-negative.".to_string()));
    }

    #[test]
    fn label_mapping() {
        assert_eq!(StrokeLabel::from_class(1), StrokeLabel::Stroke);
        assert_eq!(StrokeLabel::from_class(0), StrokeLabel::NoStroke);
        assert_eq!(StrokeLabel::Stroke.as_str(), "Stroke");
        assert_eq!(StrokeLabel::NoStroke.as_str(), "No Stroke");
    }
}
