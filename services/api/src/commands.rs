use crate::infra::{placeholder_files, read_selections};
use clap::Args;
use nbc_compliance::error::AppError;
use nbc_compliance::workflows::calculator::{
    pending_items, Category, PendingItems, Scorecard, TableVariant, UPGRADE_COSTS,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the form selections
    #[arg(long)]
    pub(crate) selections: PathBuf,
    /// Print the scorecard as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PendingArgs {
    /// JSON file holding the form selections
    #[arg(long)]
    pub(crate) selections: PathBuf,
    /// Number of project documents already uploaded
    #[arg(long, default_value_t = 0)]
    pub(crate) files: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// Limit output to one category key (for example `wallRSI`)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Show the Alberta climate zone 7B table instead of the standard one
    #[arg(long)]
    pub(crate) zone_7b: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let selections = read_selections(&args.selections)?;
    let scorecard = Scorecard::evaluate(&selections);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scorecard)?);
        return Ok(());
    }

    render_scorecard(&scorecard);
    Ok(())
}

pub(crate) fn run_pending(args: PendingArgs) -> Result<(), AppError> {
    let selections = read_selections(&args.selections)?;
    let pending = pending_items(&selections, &placeholder_files(args.files));
    render_pending(&pending);
    Ok(())
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let categories = match args.category.as_deref() {
        None => Category::ordered().to_vec(),
        Some(key) => {
            let category =
                Category::from_key(key).ok_or_else(|| AppError::UnknownCategory(key.to_string()))?;
            vec![category]
        }
    };
    let variant = if args.zone_7b {
        TableVariant::Zone7B
    } else {
        TableVariant::Standard
    };

    for category in categories {
        println!("{} ({})", category.label(), category.key());
        for option in category.table().options(variant) {
            println!("  {:<28} {:>5.1} pts", option.label, option.points);
        }
    }

    if args.category.is_none() {
        println!("\nUpgrade cost estimates");
        for upgrade in UPGRADE_COSTS {
            println!("  {:<44} ${:>6}", upgrade.description, upgrade.cost);
        }
    }

    Ok(())
}

pub(crate) fn render_scorecard(scorecard: &Scorecard) {
    println!("NBC 9.36 energy points");
    if scorecard.breakdown.is_empty() {
        println!("  No scored selections yet");
    }
    for entry in &scorecard.breakdown {
        println!("  {:<32} {:>5.1}", entry.label, entry.points);
    }
    println!("  {:<32} {:>5.1}", "Total", scorecard.total_points);
    println!(
        "\n{} ({:?}): {}",
        scorecard.compliance.tier.label(),
        scorecard.compliance.status,
        scorecard.compliance.description
    );
    println!(
        "Estimated cost: prescriptive ${} | performance ${} | savings ${}",
        scorecard.costs.prescriptive, scorecard.costs.performance, scorecard.costs.savings
    );
}

pub(crate) fn render_pending(pending: &PendingItems) {
    println!("Progress: {:.0}%", pending.progress);
    if pending.is_complete() {
        println!("All required items are complete");
    } else {
        println!("Required:");
        for item in &pending.required {
            println!("  - {} ({})", item.label, item.field_id);
        }
    }
    if !pending.optional.is_empty() {
        println!("Recommended:");
        for item in &pending.optional {
            println!("  - {} ({})", item.label, item.field_id);
        }
    }
}
