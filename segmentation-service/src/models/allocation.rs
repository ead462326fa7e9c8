use serde::{Deserialize, Serialize};

/// A budget split across the four fixed categories.
///
/// Every allocation handed back to a caller is a convex combination: four
/// non-negative values summing to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioAllocation {
    pub essentials: f64,
    pub savings: f64,
    pub insurance: f64,
    pub other: f64,
}

impl RatioAllocation {
    pub const CONSERVATIVE: Self = Self {
        essentials: 0.50,
        savings: 0.30,
        insurance: 0.10,
        other: 0.10,
    };

    pub const OVER_SPENDER: Self = Self {
        essentials: 0.58,
        savings: 0.20,
        insurance: 0.10,
        other: 0.12,
    };

    /// Also the fallback whenever normalization has nothing to work with.
    pub const BALANCED: Self = Self {
        essentials: 0.55,
        savings: 0.25,
        insurance: 0.10,
        other: 0.10,
    };

    /// Map a segment label to its fixed allocation.
    ///
    /// Matching is case-insensitive substring; an empty or unrecognized
    /// label gets the balanced split.
    pub fn for_label(label: &str) -> Self {
        let key = label.to_lowercase();
        if key.contains("conservative") {
            Self::CONSERVATIVE
        } else if key.contains("over") {
            Self::OVER_SPENDER
        } else {
            Self::BALANCED
        }
    }

    /// Clamp negatives to zero and rescale to sum to 1.0.
    ///
    /// A non-positive total falls back to the balanced split, so the
    /// convex-combination invariant holds for every return value.
    pub fn normalized(self) -> Self {
        let essentials = self.essentials.max(0.0);
        let savings = self.savings.max(0.0);
        let insurance = self.insurance.max(0.0);
        let other = self.other.max(0.0);

        let total = essentials + savings + insurance + other;
        if total <= 0.0 {
            return Self::BALANCED;
        }

        Self {
            essentials: essentials / total,
            savings: savings / total,
            insurance: insurance / total,
            other: other / total,
        }
    }

    pub fn total(&self) -> f64 {
        self.essentials + self.savings + self.insurance + self.other
    }
}
