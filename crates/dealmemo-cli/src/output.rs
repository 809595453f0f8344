//! Output formatting utilities

use colored::Colorize;
use dealmemo_core::model::{DealMemo, Recommendation, RiskFlag, RiskSeverity};
use std::fmt::Write as _;
use std::path::Path;

use crate::error::CliResult;

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

fn recommendation_colored(recommendation: Recommendation) -> colored::ColoredString {
    match recommendation {
        Recommendation::StrongBuy => "STRONG_BUY".green().bold(),
        Recommendation::Buy => "BUY".green(),
        Recommendation::Hold => "HOLD".yellow(),
        Recommendation::Pass => "PASS".red(),
    }
}

fn severity_colored(severity: RiskSeverity) -> colored::ColoredString {
    match severity {
        RiskSeverity::High => "HIGH".red().bold(),
        RiskSeverity::Medium => "MEDIUM".yellow(),
        RiskSeverity::Low => "LOW".dimmed(),
    }
}

fn render_risk_section(out: &mut String, title: &str, risks: &[RiskFlag]) {
    if risks.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", title.cyan().bold());
    for risk in risks {
        let _ = writeln!(
            out,
            "  [{}] {} - {}",
            severity_colored(risk.severity),
            format!("{:?}", risk.risk_type).dimmed(),
            risk.description
        );
        if !risk.suggested_mitigation.is_empty() {
            let _ = writeln!(out, "      {} {}", "mitigation:".dimmed(), risk.suggested_mitigation);
        }
    }
}

/// Render a [`DealMemo`] as human-readable text.
fn render_deal_memo_text(memo: &DealMemo) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "═".repeat(60).cyan());
    let _ = writeln!(out, "{}", "Deal Memo".cyan().bold());
    let _ = writeln!(out, "{}", "═".repeat(60).cyan());

    let _ = writeln!(out, "{}: {}", "Company".white().bold(), memo.summary.company_name);
    if let Some(one_liner) = &memo.summary.one_liner {
        let _ = writeln!(out, "{}: {}", "One-liner".white(), one_liner);
    }
    if let Some(sector) = &memo.summary.sector {
        let _ = writeln!(out, "{}: {}", "Sector".white(), sector);
    }
    if let Some(stage) = &memo.summary.stage {
        let _ = writeln!(out, "{}: {:?}", "Stage".white(), stage);
    }
    let _ = writeln!(
        out,
        "{}: {}",
        "Signal score".white(),
        format!("{:.1}", memo.summary.signal_score).yellow()
    );
    let _ = writeln!(out, "{}: {}", "Recommendation".white(), recommendation_colored(memo.summary.recommendation));

    let _ = writeln!(out, "\n{}", "Scoring weights".cyan().bold());
    for (name, value) in memo.analysis_weightings.as_array() {
        let _ = writeln!(out, "  {name}: {value:.1}");
    }

    if !memo.key_benchmarks.is_empty() {
        let _ = writeln!(out, "\n{}", "Benchmarks".cyan().bold());
        for comparison in &memo.key_benchmarks {
            let _ = writeln!(
                out,
                "  {}: {:.2} (sector p50 {:.2}, percentile {})",
                comparison.metric_name, comparison.company_value, comparison.sector_p50, comparison.percentile_rank
            );
        }
    }

    if let Some(growth) = &memo.growth_potential {
        let _ = writeln!(out, "\n{}", "Growth projection".cyan().bold());
        let _ = writeln!(out, "  current ARR: {:.0}", growth.current_arr);
        let _ = writeln!(out, "  year 1: {:.0}", growth.year1_projection);
        let _ = writeln!(out, "  year 3: {:.0}", growth.year3_projection);
        let _ = writeln!(out, "  year 5: {:.0}", growth.year5_projection);
    }

    let _ = writeln!(
        out,
        "\n{}: {:.2}",
        "Overall consistency score".cyan().bold(),
        memo.risk_assessment.overall_consistency_score
    );
    render_risk_section(&mut out, "High priority risks", &memo.risk_assessment.high_priority_risks);
    render_risk_section(&mut out, "Medium priority risks", &memo.risk_assessment.medium_priority_risks);
    render_risk_section(&mut out, "Low priority risks", &memo.risk_assessment.low_priority_risks);

    let _ = writeln!(out, "\n{}", "Investment thesis".cyan().bold());
    let _ = writeln!(out, "  {}", memo.investment_recommendation.thesis);
    if let Some(check_size) = memo.investment_recommendation.suggested_check_size {
        let _ = writeln!(out, "  suggested check size: {check_size:.0}");
    }
    if let Some((low, high)) = memo.investment_recommendation.valuation_cap_band {
        let _ = writeln!(out, "  valuation cap band: {low:.0} - {high:.0}");
    }
    let _ = writeln!(out, "  suggested timeline: {}", memo.investment_recommendation.timeline);

    if !memo.investment_recommendation.diligence_questions.is_empty() {
        let _ = writeln!(out, "\n{}", "Diligence questions".cyan().bold());
        for question in &memo.investment_recommendation.diligence_questions {
            let _ = writeln!(out, "  - {question}");
        }
    }

    let _ = writeln!(out, "\n{}", "─".repeat(60).dimmed());
    let _ = writeln!(
        out,
        "{} {} | {} {:.2}",
        "generated by".dimmed(),
        memo.metadata.generated_by,
        "data quality".dimmed(),
        memo.metadata.data_quality
    );

    out
}

/// Print a [`DealMemo`] as human-readable text, writing it to
/// `output` if given, or to stdout otherwise. Pipeline warnings always
/// go to stderr regardless of where the memo body lands.
pub fn print_deal_memo_text(memo: &DealMemo, output: Option<&Path>) -> CliResult<()> {
    let rendered = render_deal_memo_text(memo);
    if let Some(path) = output {
        std::fs::write(path, &rendered)?;
        print_success(&format!("Deal memo written to {}", path.display()));
    } else {
        print!("{rendered}");
    }
    for warning in &memo.metadata.warnings {
        print_warning(warning);
    }
    Ok(())
}

/// Serialize a [`DealMemo`] as pretty JSON, writing it to `output` if
/// given or stdout otherwise.
pub fn print_deal_memo_json(memo: &DealMemo, output: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(memo)?;
    if let Some(path) = output {
        std::fs::write(path, &json)?;
        print_success(&format!("Deal memo written to {}", path.display()));
    } else {
        println!("{json}");
    }
    Ok(())
}
