//! # dealmemo-memo
//!
//! The recommendation engine: turns a [`dealmemo_core::model::ScoreBreakdown`]
//! plus a [`dealmemo_consistency::ConsistencyReport`] and optional sector
//! benchmarks into the final [`dealmemo_core::model::DealMemo`].

pub mod benchmarks;
pub mod builder;
pub mod diligence;
pub mod projection;
pub mod recommendation;
pub mod risks;
pub mod terms;
pub mod timeline;

pub use benchmarks::build_benchmark_comparisons;
pub use builder::{build_deal_memo, MemoOptions};
pub use diligence::build_diligence_questions;
pub use projection::project_growth;
pub use recommendation::recommend;
pub use risks::{build_risk_flags, partition_by_severity};
pub use terms::{suggest_check_size, valuation_cap_band};
pub use timeline::suggest_timeline;
