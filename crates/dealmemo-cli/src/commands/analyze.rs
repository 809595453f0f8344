//! `dealmemo analyze`: runs the full pipeline over a set of pitch
//! documents and prints or writes the resulting deal memo.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use chrono::Utc;
use dealmemo_benchmarks::BenchmarkLookup;
use dealmemo_consistency::{check_consistency, ConsistencyOptions};
use dealmemo_core::config::ParserConfig;
use dealmemo_core::model::{DocumentMetadata, ExtractionMethod, ProcessedDocument, ProcessingStatus, QualityScores};
use dealmemo_extraction::{extract_entities, reconcile, ReconcileOptions};
use dealmemo_llm::{AnalysisContext, LlmAnalyzer, PromptManager};
use dealmemo_memo::{build_deal_memo, MemoOptions};
use dealmemo_observe::{AuditEntry, PerformanceMetrics};
use dealmemo_ocr::{pages_to_sections, run_ocr};
use dealmemo_parsers::parse_document;
use dealmemo_resilience::RetryPolicy;
use dealmemo_scoring::weighting::{normalize, validate, PartialWeightings, ValidateOptions};
use dealmemo_scoring::{DefaultScoringStrategy, ScoreCalculator};
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::fixtures::{PatternBackedLlmClient, StaticBenchmarkClient};
use crate::output;

/// Process-wide latency registry shared by every `analyze` invocation
/// in this run of the binary.
fn performance_metrics() -> &'static PerformanceMetrics {
    static METRICS: OnceLock<PerformanceMetrics> = OnceLock::new();
    METRICS.get_or_init(PerformanceMetrics::default)
}

pub struct AnalyzeArgs {
    pub inputs: Vec<PathBuf>,
    pub sector: String,
    pub company: Option<String>,
    pub stage: Option<String>,
    pub weighting_profile: String,
    pub weight_market: Option<f64>,
    pub weight_team: Option<f64>,
    pub weight_traction: Option<f64>,
    pub weight_product: Option<f64>,
    pub weight_competitive: Option<f64>,
    pub allow_zero_weights: bool,
    pub allow_hold_tier: bool,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

fn mime_type_for_filename(filename: &str) -> String {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".pptx") {
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    } else {
        "text/plain"
    }
    .to_string()
}

/// Loads and parses one input document, falling back to OCR when the
/// format parser can't make sense of the bytes (e.g. a scanned PDF).
async fn load_document(path: &Path) -> CliResult<ProcessedDocument> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let metadata = DocumentMetadata {
        filename: filename.clone(),
        byte_size: bytes.len() as u64,
        mime_type: mime_type_for_filename(&filename),
        uploaded_at: Utc::now(),
        processing_status: ProcessingStatus::Pending,
    };

    match parse_document(&bytes, metadata.clone()) {
        Ok(document) => Ok(document),
        Err(parse_err) => {
            let ocr_client = crate::fixtures::EmptyOcrClient;
            let ocr_result = run_ocr(&ocr_client, &bytes, &[], 0.5)
                .await
                .map_err(|ocr_err| {
                    CliError::Other(format!(
                        "failed to parse '{filename}' ({parse_err}) and OCR fallback also failed: {ocr_err}"
                    ))
                })?;

            let sections = pages_to_sections(&ocr_result.pages, &filename);
            Ok(ProcessedDocument {
                id: filename.clone(),
                source_type: dealmemo_core::model::SourceType::Text,
                word_count: ProcessedDocument::word_count_of(&ocr_result.text),
                extracted_text: ocr_result.text,
                sections,
                metadata,
                language: ocr_result.language,
                encoding: "utf-8".to_string(),
                extraction_method: ExtractionMethod::Ocr,
                quality: QualityScores {
                    text_clarity: ocr_result.confidence,
                    structure_preservation: 0.5,
                    completeness: ocr_result.confidence,
                },
                warnings: ocr_result.warnings,
                processing_timestamp: Utc::now(),
                processing_duration: Duration::default(),
            })
        }
    }
}

fn resolve_weightings(args: &AnalyzeArgs) -> CliResult<dealmemo_core::model::Weightings> {
    use dealmemo_scoring::WeightingManager;

    let manager = WeightingManager::new();
    let base = manager
        .get(&args.weighting_profile)
        .map(|profile| profile.weightings)
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown weighting profile '{}'", args.weighting_profile)))?;

    let partial = PartialWeightings {
        market_opportunity: args.weight_market.or(Some(base.market_opportunity)),
        team: args.weight_team.or(Some(base.team)),
        traction: args.weight_traction.or(Some(base.traction)),
        product: args.weight_product.or(Some(base.product)),
        competitive_position: args.weight_competitive.or(Some(base.competitive_position)),
    };

    let weightings = normalize(&partial);
    let options = ValidateOptions { allow_zero_weights: args.allow_zero_weights, ..ValidateOptions::default() };
    let warnings = validate(&weightings, &options).map_err(CliError::Pipeline)?;
    for warning in warnings {
        output::print_warning(&warning);
    }

    Ok(weightings)
}

/// Runs the pipeline to completion, or cancels it if Ctrl-C arrives
/// first. The token is shared with every stage so a Ctrl-C during a
/// multi-document load doesn't wait for the slowest one to finish.
async fn run_cancellable(args: &AnalyzeArgs) -> CliResult<dealmemo_core::model::DealMemo> {
    let token = CancellationToken::new();
    let watcher = token.clone();
    tokio::select! {
        result = run_pipeline(args, &token) => result,
        _ = tokio::signal::ctrl_c() => {
            watcher.cancel();
            Err(CliError::Pipeline(dealmemo_core::CoreError::cancelled()))
        }
    }
}

pub fn run(args: AnalyzeArgs) -> CliResult<()> {
    let runtime = tokio::runtime::Runtime::new().map_err(CliError::Io)?;
    let memo = runtime.block_on(run_cancellable(&args))?;

    match args.format {
        OutputFormat::Text => output::print_deal_memo_text(&memo, args.output.as_deref())?,
        OutputFormat::Json => output::print_deal_memo_json(&memo, args.output.as_deref())?,
    }

    Ok(())
}

/// Parses every input document, bounded to at most
/// `parser.max_concurrency` documents in flight at once, mirroring the
/// LLM stage's bounded fan-out. Checked cooperatively against `token`
/// between documents so a cancellation doesn't wait for the slowest
/// one still in flight.
async fn load_documents(
    inputs: &[PathBuf],
    parser_config: &ParserConfig,
    token: &CancellationToken,
) -> CliResult<Vec<ProcessedDocument>> {
    use futures::stream::{self, StreamExt, TryStreamExt};

    stream::iter(inputs)
        .map(|path| async move {
            if token.is_cancelled() {
                return Err(CliError::Pipeline(dealmemo_core::CoreError::cancelled()));
            }
            let load_started = Instant::now();
            let document = load_document(path).await?;
            performance_metrics().record("load_document", load_started.elapsed());
            Ok(document)
        })
        .buffer_unordered(parser_config.max_concurrency.max(1))
        .try_collect()
        .await
}

async fn run_pipeline(args: &AnalyzeArgs, token: &CancellationToken) -> CliResult<dealmemo_core::model::DealMemo> {
    let started_at = Instant::now();
    let weightings = resolve_weightings(args)?;

    let documents = load_documents(&args.inputs, &ParserConfig::default(), token).await?;
    let document_ids: Vec<String> = documents.iter().map(|doc| doc.id.clone()).collect();

    if token.is_cancelled() {
        return Err(CliError::Pipeline(dealmemo_core::CoreError::cancelled()));
    }

    let ctx = AnalysisContext {
        company_name: args.company.clone(),
        sector: Some(args.sector.clone()),
        funding_stage: args.stage.clone(),
        additional_instructions: None,
    };

    let analyzer = LlmAnalyzer::new(PromptManager::new(), RetryPolicy::default());
    let llm_client = PatternBackedLlmClient;
    let mut analysis = analyzer
        .analyze_content(&llm_client, &documents, &ctx)
        .await
        .map_err(CliError::Pipeline)?;

    let mut pattern_entities = Vec::new();
    for document in &documents {
        pattern_entities.extend(extract_entities(&document.extracted_text, &document.id));
    }
    analysis.entities = reconcile(pattern_entities, Vec::new(), &ReconcileOptions::default());

    let consistency = check_consistency(std::slice::from_ref(&analysis), &documents, &ConsistencyOptions::default());

    let benchmark_lookup = BenchmarkLookup::new(RetryPolicy::default());
    let benchmark_client = StaticBenchmarkClient::default();
    let (benchmarks, benchmark_warnings) = benchmark_lookup.lookup(&benchmark_client, &args.sector).await;

    let score = ScoreCalculator::new(DefaultScoringStrategy)
        .calculate(&analysis, benchmarks.as_ref(), &weightings);

    let memo_options = MemoOptions { allow_hold_tier: args.allow_hold_tier, ..MemoOptions::default() };
    let memo = build_deal_memo(
        &analysis,
        &score,
        &consistency,
        benchmarks.as_ref(),
        &benchmark_warnings,
        &memo_options,
    );

    let elapsed = started_at.elapsed();
    performance_metrics().record("analyze", elapsed);
    let audit = AuditEntry::new("analyze", document_ids.join(","))
        .with_duration(elapsed.as_millis() as u64)
        .with_details(serde_json::json!({
            "sector": args.sector,
            "documentCount": document_ids.len(),
            "recommendation": format!("{:?}", memo.summary.recommendation),
        }));
    tracing::info!(audit = %serde_json::to_string(&audit).unwrap_or_default(), "analyze completed");

    Ok(memo)
}
