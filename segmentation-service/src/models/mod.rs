pub mod allocation;
pub mod features;
pub mod payload;

pub use allocation::RatioAllocation;
pub use features::engineer_features;
pub use payload::{
    BudgetQuery, Commitments, Lifestyle, LitePayload, DEFAULT_SEGMENT_LABELS, LABEL_BALANCED,
    LABEL_CONSERVATIVE, LABEL_OVER_SPENDER,
};
