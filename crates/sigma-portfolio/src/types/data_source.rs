//! Provenance tags for per-holding statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which resolution tier produced a holding's beta and risk figures.
///
/// Ordered from most to least authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataSource {
    /// Full five-year vendor risk record used verbatim.
    #[serde(rename = "vendor-5y")]
    Vendor5y,
    /// Only a vendor beta was available.
    #[serde(rename = "vendor-beta")]
    VendorBeta,
    /// Beta estimated by regression on monthly returns.
    #[serde(rename = "calculated")]
    Calculated,
    /// Beta fell back to the configured default.
    #[serde(rename = "default")]
    Default,
}

impl DataSource {
    /// Tag as written in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataSource::Vendor5y => "vendor-5y",
            DataSource::VendorBeta => "vendor-beta",
            DataSource::Calculated => "calculated",
            DataSource::Default => "default",
        }
    }

    /// True for tiers backed by vendor data.
    #[must_use]
    pub const fn is_vendor(&self) -> bool {
        matches!(self, DataSource::Vendor5y | DataSource::VendorBeta)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
