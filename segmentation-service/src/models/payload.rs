use serde::Deserialize;
use serde_json::Value;
use service_core::error::AppError;

pub const LABEL_CONSERVATIVE: &str = "conservative saver";
pub const LABEL_BALANCED: &str = "balanced spender";
pub const LABEL_OVER_SPENDER: &str = "frequent over-spender";

/// Fallback labels for cluster ids with no mapping entry, in cluster order.
pub const DEFAULT_SEGMENT_LABELS: [&str; 3] =
    [LABEL_CONSERVATIVE, LABEL_BALANCED, LABEL_OVER_SPENDER];

/// Fixed monthly commitments reported by the lite payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commitments {
    #[serde(rename = "housingLoan", default)]
    pub housing_loan: f64,
    #[serde(rename = "carLoan", default)]
    pub car_loan: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub others: f64,
}

impl Commitments {
    pub fn total(&self) -> f64 {
        self.housing_loan + self.car_loan + self.insurance + self.others
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Lifestyle {
    Balanced,
    Frugal,
    Luxury,
    None,
}

/// The lite segmentation payload: income plus fixed commitments.
///
/// `lifestyle` is part of the contract and accepted, but the burden
/// heuristic does not consume it.
#[derive(Debug, Clone, Deserialize)]
pub struct LitePayload {
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub commitments: Commitments,
    #[serde(default)]
    pub lifestyle: Option<Lifestyle>,
}

impl LitePayload {
    /// Commitments-to-income burden. Zero when there is no positive income,
    /// so a zero-income payload never divides by zero.
    pub fn burden(&self) -> f64 {
        if self.income > 0.0 {
            self.commitments.total() / self.income
        } else {
            0.0
        }
    }

    /// Heuristic segment label from the burden ratio.
    ///
    /// 0.4 and 0.6 are inclusive toward the saver/over-spender sides; only
    /// the open interval between them is balanced.
    pub fn segment_label(&self) -> &'static str {
        let burden = self.burden();
        if burden >= 0.6 {
            LABEL_OVER_SPENDER
        } else if burden <= 0.4 {
            LABEL_CONSERVATIVE
        } else {
            LABEL_BALANCED
        }
    }
}

/// The two mutually exclusive request shapes of `POST /api/segment`.
#[derive(Debug)]
pub enum BudgetQuery {
    Lite(LitePayload),
    Full(serde_json::Map<String, Value>),
}

impl BudgetQuery {
    /// Classify a raw JSON body by key presence.
    ///
    /// The lite shape (`income` + `commitments`) wins over the full shape
    /// (`Income`) when a body carries both key sets. Anything else is an
    /// unsupported payload.
    pub fn classify(body: Value) -> Result<Self, AppError> {
        let obj = match body {
            Value::Object(map) => map,
            _ => return Err(unsupported_payload()),
        };

        if obj.contains_key("income") && obj.contains_key("commitments") {
            let lite: LitePayload = serde_json::from_value(Value::Object(obj))
                .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid lite payload: {e}")))?;
            return Ok(BudgetQuery::Lite(lite));
        }

        if obj.contains_key("Income") {
            return Ok(BudgetQuery::Full(obj));
        }

        Err(unsupported_payload())
    }
}

fn unsupported_payload() -> AppError {
    AppError::BadRequest(anyhow::anyhow!("Unsupported payload"))
}
