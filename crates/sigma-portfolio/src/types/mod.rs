//! Portfolio data types.

mod data_source;
mod holding;
mod market;
mod ratio;
mod vendor;
mod weights;

pub use data_source::DataSource;
pub use holding::{Holding, HoldingAmount};
pub use market::{ContextSource, MarketContext};
pub use ratio::Ratio;
pub use vendor::{FiveYearRiskStats, VendorStats};
pub use weights::{validate_weight_sum, PortfolioWeights, WeightOrigin, DEFAULT_WEIGHT_TOLERANCE};
