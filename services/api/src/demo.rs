use crate::infra::{load_signals, InMemoryResultRepository};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use venture_screen::config::AppConfig;
use venture_screen::error::AppError;
use venture_screen::workflows::viability::{
    screen_batch, AttributeBag, BatchImporter, RawSignals, ResultRepository, ValidationPipeline,
    ValidationRequest, ValidationResult, ValidationService,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Free-text description of the idea
    #[arg(long)]
    pub(crate) idea: String,
    /// Optional JSON file with founder signals
    #[arg(long)]
    pub(crate) signals: Option<PathBuf>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with `id,idea_text` columns
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Optional JSON file with signals shared by every row
    #[arg(long)]
    pub(crate) signals: Option<PathBuf>,
    /// Print one JSON object per row instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the adjustment ledger for each scenario.
    #[arg(long)]
    pub(crate) show_adjustments: bool,
}

fn configured_pipeline() -> Result<ValidationPipeline, AppError> {
    let config = AppConfig::load()?;
    Ok(ValidationPipeline::new(&config.scoring))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let signals = load_signals(args.signals.as_deref())?;
    let pipeline = configured_pipeline()?;
    let result = pipeline.validate(&args.idea, &signals)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).map_err(AppError::Output)?);
    } else {
        render_result(&result, false);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let signals = load_signals(args.signals.as_deref())?;
    let ideas = BatchImporter::from_path(&args.input)?;
    let pipeline = configured_pipeline()?;
    let outcomes = screen_batch(&pipeline, &ideas, &signals);

    if args.json {
        for outcome in &outcomes {
            println!("{}", serde_json::to_string(outcome).map_err(AppError::Output)?);
        }
        return Ok(());
    }

    println!("Screened {} ideas from {}", outcomes.len(), args.input.display());
    for outcome in &outcomes {
        match (&outcome.status, outcome.overall, &outcome.error) {
            (Some(status), Some(overall), _) => println!(
                "- {}: {} ({}/100) {}",
                outcome.id,
                status.label(),
                overall,
                outcome.reasoning.as_deref().unwrap_or_default()
            ),
            (_, _, Some(error)) => println!("- {}: skipped ({})", outcome.id, error),
            _ => println!("- {}: no result", outcome.id),
        }
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryResultRepository::default());
    let service = ValidationService::new(
        ValidationPipeline::default(),
        repository.clone(),
        Duration::from_secs(3_600),
    );

    println!("Venture screening demo");
    for (title, idea_text, signals) in demo_scenarios() {
        println!("\n{title}");
        println!("  Idea: {}", if idea_text.is_empty() { "<empty>" } else { idea_text });
        let request = ValidationRequest {
            idea_text: idea_text.to_string(),
            signals,
        };
        match service.submit(request).await {
            Ok(record) => {
                println!("  Stored as {} (expires {})", record.id, record.expires_at);
                render_result(&record.result, args.show_adjustments);
                match repository.fetch(&record.id, chrono::Utc::now()) {
                    Ok(Some(_)) => println!("  Repository lookup: found"),
                    Ok(None) => println!("  Repository lookup returned no record"),
                    Err(err) => println!("  Repository unavailable: {}", err),
                }
            }
            Err(err) => println!("  Not screened: {}", err),
        }
    }

    Ok(())
}

fn render_result(result: &ValidationResult, show_adjustments: bool) {
    let dna = &result.business_dna;
    println!(
        "  Recommendation: {} (overall {}/100)",
        result.status.label(),
        result.scores.overall
    );
    println!("  Reasoning: {}", result.reasoning);
    println!(
        "  Classified as {} / {} ({:?}, {:?}), confidence {:.2}",
        dna.industry.label(),
        dna.sub_industry,
        dna.business_model,
        dna.customer_type,
        dna.confidence
    );
    println!(
        "  Market: {} at {:.0}% saturation, weights profile {:?}",
        result.competitive_intelligence.market_category,
        result.competitive_intelligence.market_saturation * 100.0,
        result.weights.profile
    );
    println!("  Dimension scores:");
    for (dimension, score) in &result.scores.dimensions {
        let base = result.base_scores.value(*dimension);
        println!("    - {dimension}: {score:.2} (base {base:.2})");
    }
    if !result.red_flags.is_empty() {
        println!("  Red flags: {}", result.red_flags.join(", "));
    }
    for risk in &result.risks {
        println!("  Risk: {risk}");
    }
    for highlight in &result.highlights {
        println!("  Highlight: {highlight}");
    }
    if let Some(outlook) = &result.economics_outlook {
        println!(
            "  Payback months p10/p50/p90: {:.1} / {:.1} / {:.1} ({} runs, seed {})",
            outlook.payback_months_p10,
            outlook.payback_months_p50,
            outlook.payback_months_p90,
            outlook.runs,
            outlook.seed
        );
    }
    if show_adjustments {
        println!("  Adjustments:");
        for adjustment in &result.adjustments {
            println!(
                "    - {} {:?}: {:.2} -> {:.2} ({})",
                adjustment.dimension.label(),
                adjustment.kind,
                adjustment.before,
                adjustment.after,
                adjustment.reason
            );
        }
    }
}

fn demo_scenarios() -> Vec<(&'static str, &'static str, RawSignals)> {
    let prepared = RawSignals {
        unavoidable: 8.0,
        urgency: 8.0,
        underserved: 8.0,
        feasibility: 8.0,
        pain_gain_ratio: 8.0,
        whitespace: 8.0,
        competition_density: 2.0,
        willingness_to_pay: 8.0,
        interviews: Some(15.0),
        interviews_positive_pct: Some(80.0),
        lois: Some(3.0),
        ltv_estimate: Some(3000.0),
        cac_estimate: Some(400.0),
        channels_clarity: 8.0,
        team_experience: 8.0,
        capital_runway_months: 18.0,
        regulatory_risk: 2.0,
        platform_dependency_risk: 2.0,
        safety_risk: 1.0,
        tam_quality: 8.0,
        growth_quality: 8.0,
        attributes: AttributeBag::default()
            .with(AttributeBag::DISRUPTIVE, 7.0)
            .with(AttributeBag::DEFENSIBLE, 8.0)
            .with(AttributeBag::DISCONTINUOUS, 6.0),
        ..RawSignals::default()
    };
    let thin_team = RawSignals {
        regulatory_risk: 9.0,
        team_experience: 2.0,
        ..prepared.clone()
    };

    vec![
        (
            "Crowded category",
            "Generic project management tool with kanban boards and Slack integration, $29/month",
            RawSignals::default(),
        ),
        ("Empty pitch", "", RawSignals::default()),
        (
            "Regulated lending with an inexperienced team",
            "Peer-to-peer lending app that gives small business loans using alternative credit data, with a 2% origination fee",
            thin_team,
        ),
        (
            "Vertical SaaS with demand evidence",
            "Inventory forecasting software for independent bike repair shops that predicts which parts to stock from past service tickets, sold to small business owners at $120/month",
            prepared,
        ),
    ]
}
