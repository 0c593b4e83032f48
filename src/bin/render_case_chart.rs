use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use epi_chart::api::{
    AxisLabelLocale, CaseSource, DashboardConfig, DashboardController, FetchOutcome,
    InMemoryCaseSource,
};
use epi_chart::core::{AggregationSummary, Disease, DuplicatePolicy, FilterSelection, Viewport};
use epi_chart::render::SvgRenderer;
use epi_chart::telemetry::init_default_tracing;
use tracing::info;

const USAGE: &str = "usage: render_case_chart (--input <records.json> | --url <base-url>) --output <chart.svg> \
[--disease-a <name>] [--disease-b <name>] [--start-date YYYY-MM-DD] [--end-date YYYY-MM-DD] \
[--locale en-US|pt-BR] [--duplicates last|sum] [--width <px>] [--height <px>] [--config <config.json>]";

enum RecordInput {
    File(PathBuf),
    Url(String),
}

struct CliArgs {
    input: RecordInput,
    output: PathBuf,
    config: Option<PathBuf>,
    filters: FilterSelection,
    locale: Option<AxisLabelLocale>,
    duplicates: Option<DuplicatePolicy>,
    width: Option<u32>,
    height: Option<u32>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = load_config(&args)?;

    match &args.input {
        RecordInput::File(path) => {
            let body = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            let source = InMemoryCaseSource::from_json_str(&body).map_err(|err| err.to_string())?;
            render_with(source, config, &args)
        }
        RecordInput::Url(url) => render_from_url(url, config, &args),
    }
}

#[cfg(feature = "http-source")]
fn render_from_url(url: &str, config: DashboardConfig, args: &CliArgs) -> Result<(), String> {
    let source = epi_chart::api::HttpCaseSource::new(url).map_err(|err| err.to_string())?;
    render_with(source, config, args)
}

#[cfg(not(feature = "http-source"))]
fn render_from_url(_url: &str, _config: DashboardConfig, _args: &CliArgs) -> Result<(), String> {
    Err("`--url` requires the `http-source` feature".to_owned())
}

fn render_with<S: CaseSource>(
    source: S,
    config: DashboardConfig,
    args: &CliArgs,
) -> Result<(), String> {
    let target = SvgRenderer::new(config.viewport);
    let mut controller = DashboardController::new(source, target, config)
        .map_err(|err| err.to_string())?
        .with_filters(args.filters);

    match controller.apply_filters().map_err(|err| err.to_string())? {
        FetchOutcome::Applied { record_count, .. } => {
            let summary = AggregationSummary::from_buckets(controller.buckets());
            info!(
                records = record_count,
                groups = summary.bucket_count,
                max_value = summary.max_value,
                disease_a = %args.filters.disease_a,
                disease_b = %args.filters.disease_b,
                "chart rendered"
            );
        }
        FetchOutcome::Failed { error, .. } => return Err(error),
        FetchOutcome::Stale { sequence, .. } => {
            return Err(format!("fetch {sequence} was discarded as stale"));
        }
    }

    controller
        .target()
        .write_to(&args.output)
        .map_err(|err| err.to_string())
}

fn load_config(args: &CliArgs) -> Result<DashboardConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };

    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(policy) = args.duplicates {
        config.duplicate_policy = policy;
    }
    config.viewport = Viewport::new(
        args.width.unwrap_or(config.viewport.width),
        args.height.unwrap_or(config.viewport.height),
    );
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn parse_args() -> Result<CliArgs, String> {
    let mut input = None;
    let mut output = None;
    let mut config = None;
    let mut filters = FilterSelection::default();
    let mut locale = None;
    let mut duplicates = None;
    let mut width = None;
    let mut height = None;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for `{flag}`\n{USAGE}"))
        };
        match flag.as_str() {
            "--input" => input = Some(RecordInput::File(PathBuf::from(value()?))),
            "--url" => input = Some(RecordInput::Url(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--disease-a" => filters.disease_a = parse_disease(&value()?)?,
            "--disease-b" => filters.disease_b = parse_disease(&value()?)?,
            "--start-date" => filters.start_date = Some(parse_date(&value()?)?),
            "--end-date" => filters.end_date = Some(parse_date(&value()?)?),
            "--locale" => {
                locale = Some(
                    value()?
                        .parse::<AxisLabelLocale>()
                        .map_err(|err| err.to_string())?,
                );
            }
            "--duplicates" => {
                duplicates = Some(match value()?.as_str() {
                    "last" => DuplicatePolicy::LastWins,
                    "sum" => DuplicatePolicy::Sum,
                    other => return Err(format!("unknown duplicate policy `{other}`")),
                });
            }
            "--width" => width = Some(parse_px(&value()?)?),
            "--height" => height = Some(parse_px(&value()?)?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output: output.ok_or_else(|| USAGE.to_owned())?,
        config,
        filters,
        locale,
        duplicates,
        width,
        height,
    })
}

fn parse_disease(raw: &str) -> Result<Disease, String> {
    raw.parse::<Disease>().map_err(|err| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{raw}` (expected YYYY-MM-DD): {err}"))
}

fn parse_px(raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|err| format!("invalid pixel size `{raw}`: {err}"))
}
