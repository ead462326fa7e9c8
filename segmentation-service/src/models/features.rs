use serde_json::{Map, Value};
use std::collections::HashMap;

/// Expense categories the trained pipeline was fed as income percentages.
pub const EXPENSE_CATEGORIES: [&str; 11] = [
    "Rent",
    "Loan_Repayment",
    "Insurance",
    "Groceries",
    "Transport",
    "Eating_Out",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Education",
    "Miscellaneous",
];

/// Engineer the ratio features the trained pipeline expects from a raw
/// full-feature payload.
///
/// All numeric fields are carried through unchanged, since the pipeline
/// selects its columns by name. `Savings_Ratio` and one `<Category>_PctIncome`
/// per expense category are added on top; missing categories count as 0.
///
/// A zero or missing `Income` is substituted with 1.0 before division, so an
/// income of 0 behaves exactly like an income of 1. The quirk is inherited
/// from the data the model was trained against and is kept, not fixed.
pub fn engineer_features(raw: &Map<String, Value>) -> HashMap<String, f64> {
    let mut features: HashMap<String, f64> = raw
        .iter()
        .filter_map(|(name, value)| value.as_f64().map(|n| (name.clone(), n)))
        .collect();

    let income = match features.get("Income").copied() {
        Some(value) if value != 0.0 => value,
        _ => 1.0,
    };

    let desired_savings = features.get("Desired_Savings").copied().unwrap_or(0.0);
    features.insert("Savings_Ratio".to_string(), desired_savings / income);

    for category in EXPENSE_CATEGORIES {
        let value = features.get(category).copied().unwrap_or(0.0);
        features.insert(format!("{category}_PctIncome"), value / income);
    }

    features
}
