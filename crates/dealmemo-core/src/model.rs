//! The shared data model flowing through every pipeline stage.
//!
//! Types here are produced by exactly one stage and consumed by the
//! stages downstream of it; see each type's doc comment for its
//! lifecycle. Everything is `Serialize`/`Deserialize` so the CLI and any
//! external collaborator can round-trip the pipeline's intermediate and
//! terminal artifacts as JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// Immutable once created by a parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub filename: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub processing_status: ProcessingStatus,
}

/// Produced only by parsers/OCR; never constructed elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub title: String,
    pub content: String,
    pub page_number: Option<u32>,
    pub source_document: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Pdf,
    Docx,
    Pptx,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Text,
    Ocr,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScores {
    pub text_clarity: f64,
    pub structure_preservation: f64,
    pub completeness: f64,
}

/// Created by parsers, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    pub id: String,
    pub source_type: SourceType,
    pub extracted_text: String,
    pub sections: Vec<DocumentSection>,
    pub metadata: DocumentMetadata,
    pub word_count: usize,
    /// ISO 639-1 code, or `"unknown"`.
    pub language: String,
    pub encoding: String,
    pub extraction_method: ExtractionMethod,
    pub quality: QualityScores,
    pub warnings: Vec<String>,
    pub processing_timestamp: DateTime<Utc>,
    #[serde(with = "duration_millis")]
    pub processing_duration: Duration,
}

impl ProcessedDocument {
    /// `wordCount` invariant: whitespace-split token count of `extractedText`.
    pub fn word_count_of(text: &str) -> usize {
        text.split_whitespace().count()
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(value.as_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// ---------------------------------------------------------------------
// Extracted entities
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Financial,
    Market,
    Team,
    Company,
    Funding,
    Product,
    Competitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityExtractionMethod {
    Pattern,
    Ai,
    Merged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    pub value: EntityValue,
    pub unit: Option<String>,
    pub confidence: f64,
    pub source_document_id: String,
    pub context: String,
    pub extraction_method: EntityExtractionMethod,
}

// ---------------------------------------------------------------------
// Investment metrics
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub arr: Option<f64>,
    pub mrr: Option<f64>,
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub projected_arr: Vec<f64>,
    pub gross_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TractionMetrics {
    pub customers: Option<f64>,
    pub customer_growth_rate: Option<f64>,
    pub churn_rate: Option<f64>,
    pub nps: Option<f64>,
    pub active_users: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub ltv_cac_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetrics {
    pub size: Option<f64>,
    pub founders_count: Option<f64>,
    #[serde(default)]
    pub key_hires: Vec<String>,
    pub burn_rate: Option<f64>,
    pub runway: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    Growth,
    Ipo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingMetrics {
    pub total_raised: Option<f64>,
    pub last_round_size: Option<f64>,
    pub last_round_date: Option<NaiveDate>,
    pub current_ask: Option<f64>,
    pub valuation: Option<f64>,
    pub stage: Option<FundingStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMetrics {
    #[serde(default)]
    pub revenue: RevenueMetrics,
    #[serde(default)]
    pub traction: TractionMetrics,
    #[serde(default)]
    pub team: TeamMetrics,
    #[serde(default)]
    pub funding: FundingMetrics,
}

// ---------------------------------------------------------------------
// Company profile & LLM-sourced assessments
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub crunchbase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub one_liner: Option<String>,
    pub sector: Option<String>,
    pub stage: Option<FundingStage>,
    pub founded_year: Option<i32>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub social_links: Option<SocialLinks>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            one_liner: None,
            sector: None,
            stage: None,
            founded_year: None,
            location: None,
            website: None,
            description: None,
            social_links: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketClaims {
    pub tam: Option<f64>,
    pub sam: Option<f64>,
    pub som: Option<f64>,
    pub market_growth_rate: Option<f64>,
    #[serde(default)]
    pub target_segments: Vec<String>,
    pub source_quality: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssessment {
    #[serde(default)]
    pub founders: Vec<String>,
    pub domain_expertise_years: Option<f64>,
    pub prior_exits: Option<u32>,
    #[serde(default)]
    pub notable_advisors: Vec<String>,
    pub team_completeness: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfile {
    pub stage: Option<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    pub differentiation: Option<String>,
    pub technical_moat: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveAnalysis {
    #[serde(default)]
    pub direct_competitors: Vec<String>,
    #[serde(default)]
    pub indirect_competitors: Vec<String>,
    pub competitive_advantage: Option<String>,
    pub market_position: Option<String>,
}

// ---------------------------------------------------------------------
// Analysis result
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Full,
    Partial,
}

/// Created by the analyzer. `consistencyFlags` is the only field the
/// consistency checker is permitted to append to after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub company_profile: CompanyProfile,
    pub investment_metrics: InvestmentMetrics,
    pub market_claims: MarketClaims,
    pub team_assessment: TeamAssessment,
    #[serde(default)]
    pub product_profile: ProductProfile,
    #[serde(default)]
    pub competitive_analysis: CompetitiveAnalysis,
    #[serde(default)]
    pub entities: Vec<ExtractedEntity>,
    pub analysis_type: AnalysisType,
    pub confidence: f64,
    #[serde(with = "duration_millis")]
    pub processing_time: Duration,
    pub source_document_ids: Vec<String>,
    #[serde(default)]
    pub consistency_flags: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}



impl AnalysisResult {
    pub fn append_consistency_flag(&mut self, flag: impl Into<String>) {
        self.consistency_flags.push(flag.into());
    }
}

// ---------------------------------------------------------------------
// Risk register
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    FinancialInconsistency,
    MarketSizeConcern,
    CompetitiveThreat,
    TeamGap,
    ProductRisk,
    Regulatory,
    TimelineInconsistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlag {
    pub id: String,
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub description: String,
    pub affected_metrics: Vec<String>,
    pub suggested_mitigation: String,
    pub source_documents: Vec<String>,
}

// ---------------------------------------------------------------------
// Weightings & scoring
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weightings {
    pub market_opportunity: f64,
    pub team: f64,
    pub traction: f64,
    pub product: f64,
    pub competitive_position: f64,
}

impl Default for Weightings {
    fn default() -> Self {
        Self {
            market_opportunity: 25.0,
            team: 25.0,
            traction: 20.0,
            product: 15.0,
            competitive_position: 15.0,
        }
    }
}

impl Weightings {
    pub fn sum(&self) -> f64 {
        self.market_opportunity + self.team + self.traction + self.product + self.competitive_position
    }

    pub fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("marketOpportunity", self.market_opportunity),
            ("team", self.team),
            ("traction", self.traction),
            ("product", self.product),
            ("competitivePosition", self.competitive_position),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponents {
    pub market_opportunity: f64,
    pub team: f64,
    pub traction: f64,
    pub product: f64,
    pub competitive_position: f64,
}

impl RawComponents {
    pub fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("marketOpportunity", self.market_opportunity),
            ("team", self.team),
            ("traction", self.traction),
            ("product", self.product),
            ("competitivePosition", self.competitive_position),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub raw_components: RawComponents,
    pub weighted_components: RawComponents,
    pub total_score: f64,
    pub weightings: Weightings,
    pub confidence: f64,
    pub methodology: String,
}

// ---------------------------------------------------------------------
// Deal memo
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Pass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoSummary {
    pub company_name: String,
    pub one_liner: Option<String>,
    pub sector: Option<String>,
    pub stage: Option<FundingStage>,
    pub signal_score: f64,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub metric_name: String,
    pub company_value: f64,
    pub sector_p50: f64,
    /// 0-100 integer percentile rank.
    pub percentile_rank: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPotential {
    pub current_arr: f64,
    pub year1_projection: f64,
    pub year3_projection: f64,
    pub year5_projection: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub high_priority_risks: Vec<RiskFlag>,
    pub medium_priority_risks: Vec<RiskFlag>,
    pub low_priority_risks: Vec<RiskFlag>,
    pub overall_consistency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecommendation {
    pub recommendation: Recommendation,
    pub thesis: String,
    pub suggested_check_size: Option<f64>,
    pub valuation_cap_band: Option<(f64, f64)>,
    pub diligence_questions: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealMemoMetadata {
    pub generated_by: String,
    pub analysis_version: String,
    pub source_documents: Vec<String>,
    #[serde(with = "duration_millis")]
    pub processing_time: Duration,
    pub data_quality: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealMemo {
    pub summary: MemoSummary,
    pub key_benchmarks: Vec<BenchmarkComparison>,
    pub growth_potential: Option<GrowthPotential>,
    pub risk_assessment: RiskAssessment,
    pub investment_recommendation: InvestmentRecommendation,
    pub analysis_weightings: Weightings,
    pub metadata: DealMemoMetadata,
}
