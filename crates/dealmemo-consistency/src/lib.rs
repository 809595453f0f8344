//! # dealmemo-consistency
//!
//! Cross-document consistency checking: indexes extracted metrics,
//! groups values by metric-specific tolerance, emits discrepancies and
//! timeline/missing-data findings, and scores overall agreement.

pub mod discrepancy;
pub mod grouping;
pub mod index;
pub mod missing_data;
pub mod report;
pub mod similarity;
pub mod temporal;
pub mod tolerance;

pub use discrepancy::{detect_discrepancies, Discrepancy};
pub use grouping::{group_values, ValueGroup};
pub use index::{build_index, MetricValue};
pub use missing_data::{missing_data_issues, MissingDataIssue};
pub use report::{check_consistency, ConsistencyOptions, ConsistencyReport};
pub use similarity::document_similarity;
pub use temporal::{check_timeline, TimelineIssue};
pub use tolerance::{classify, is_critical, within_tolerance, ToleranceClass, CRITICAL_METRICS};
