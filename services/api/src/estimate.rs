use crate::infra::load_estimator;
use clap::Args;
use house_price::config::AppConfig;
use house_price::error::AppError;
use house_price::valuation::{
    districts, BatchEstimator, BatchSummary, Impact, PredictionOutcome, PredictionResult,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    #[arg(long)]
    pub(crate) district: String,
    #[arg(long)]
    pub(crate) city: String,
    #[arg(long)]
    pub(crate) bedrooms: String,
    #[arg(long)]
    pub(crate) bathrooms: String,
    /// Land area in square meters
    #[arg(long)]
    pub(crate) land_size_m2: String,
    /// Building area in square meters
    #[arg(long)]
    pub(crate) building_size_m2: String,
    #[arg(long)]
    pub(crate) carports: String,
    /// Installed electricity capacity in VA
    #[arg(long)]
    pub(crate) electricity: String,
    #[arg(long)]
    pub(crate) floors: String,
    /// Building age in years
    #[arg(long)]
    pub(crate) building_age: String,
    #[arg(long)]
    pub(crate) garages: String,
    /// furnished, semi-furnished or unfurnished
    #[arg(long)]
    pub(crate) condition: String,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EstimateArgs {
    pub(crate) fn form_fields(&self) -> BTreeMap<String, String> {
        [
            ("district", &self.district),
            ("city", &self.city),
            ("bedrooms", &self.bedrooms),
            ("bathrooms", &self.bathrooms),
            ("land_size_m2", &self.land_size_m2),
            ("building_size_m2", &self.building_size_m2),
            ("carports", &self.carports),
            ("electricity", &self.electricity),
            ("floors", &self.floors),
            ("building_age", &self.building_age),
            ("garages", &self.garages),
            ("condition", &self.condition),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with a header row naming the model columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the full results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(mut args: EstimateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    let estimator = load_estimator(&mut config, args.model.take());
    let result = estimator.estimate(&args.form_fields());

    if args.json {
        print_json(&result);
    } else {
        render_result(&result);
    }
    ensure_estimated(&result)
}

fn ensure_estimated(result: &PredictionResult) -> Result<(), AppError> {
    if result.is_estimated() {
        Ok(())
    } else {
        Err(AppError::NotEstimated(result.price_text().to_string()))
    }
}

pub(crate) fn run_batch(mut args: BatchArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    let estimator = load_estimator(&mut config, args.model.take());
    let rows = BatchEstimator::from_path(&args.csv, &estimator)?;

    if args.json {
        print_json(&rows);
        return Ok(());
    }

    let summary = BatchSummary::from_rows(&rows);
    println!(
        "Estimated {} listing(s), rejected {} from {}",
        summary.estimated,
        summary.rejected,
        args.csv.display()
    );
    for row in &rows {
        println!("\nLine {}", row.line);
        render_result(&row.result);
    }
    Ok(())
}

pub(crate) fn show_districts() {
    for entry in districts::catalog() {
        println!("{}", entry.city);
        for district in entry.districts {
            println!("  - {district}");
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("unable to render JSON output: {err}"),
    }
}

fn render_result(result: &PredictionResult) {
    match &result.outcome {
        PredictionOutcome::Estimated { price, factors, input, .. } => {
            println!(
                "Estimated price for {}, {}: {}",
                input.district, input.city, price
            );
            println!("Pricing factors:");
            for factor in factors {
                println!("  [{}] {}", impact_marker(factor.impact), strip_markup(&factor.text));
            }
        }
        PredictionOutcome::Invalid { message, .. }
        | PredictionOutcome::ModelUnavailable { message } => println!("{message}"),
    }
}

fn impact_marker(impact: Impact) -> &'static str {
    match impact {
        Impact::Positive => "+",
        Impact::Negative => "-",
        Impact::Neutral => "=",
    }
}

fn strip_markup(text: &str) -> String {
    text.replace("<strong>", "").replace("</strong>", "")
}
