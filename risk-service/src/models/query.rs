use serde::Deserialize;
use std::collections::HashMap;
use validator::Validate;

/// The fixed health/lifestyle questionnaire payload.
///
/// Boolean-like answers arrive as `"Yes"`/`"No"` strings from the intake
/// form; anything other than `"Yes"` encodes to 0.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RiskQuery {
    #[validate(range(min = 1, max = 130, message = "age out of range"))]
    pub age: i64,
    #[validate(range(min = 0, message = "cholesterol must be non-negative"))]
    pub cholesterol: i64,
    /// Occupational danger scale.
    #[validate(range(min = 0, message = "occupation must be non-negative"))]
    pub occupation: i64,
    #[validate(range(min = 1.0, max = 500.0, message = "bmi out of range"))]
    pub bmi: f64,
    pub smoke: String,
    pub diabetes: String,
    pub heart_disease: String,
    pub asthma: String,
    #[validate(range(min = 0, message = "alcohol must be non-negative"))]
    pub alcohol: i64,
    #[validate(range(min = 0, message = "exercise must be non-negative"))]
    pub exercise: i64,
    pub family_cancer: String,
}

fn yes_no(answer: &str) -> f64 {
    if answer == "Yes" {
        1.0
    } else {
        0.0
    }
}

impl RiskQuery {
    /// Assemble the model's feature record from the questionnaire.
    ///
    /// Column names follow the training data, not the payload: `occupation`
    /// feeds `occup_danger` and `heart_disease` feeds `hds`. The bmi is
    /// divided by 500, matching the normalization the scaler was fitted
    /// against. Cholesterol is a numeric pass-through.
    pub fn assemble(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("age".to_string(), self.age as f64),
            ("cholesterol".to_string(), self.cholesterol as f64),
            ("occup_danger".to_string(), self.occupation as f64),
            ("bmi".to_string(), self.bmi / 500.0),
            ("smoker".to_string(), yes_no(&self.smoke)),
            ("diabetes".to_string(), yes_no(&self.diabetes)),
            ("hds".to_string(), yes_no(&self.heart_disease)),
            ("asthma".to_string(), yes_no(&self.asthma)),
            ("alcohol".to_string(), self.alcohol as f64),
            ("exercise".to_string(), self.exercise as f64),
            ("family_cancer".to_string(), yes_no(&self.family_cancer)),
        ])
    }
}
