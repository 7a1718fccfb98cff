use trade_insight::config::InsightConfig;
use trade_insight::display;
use trade_insight::{
    PositionAnalyzer, PositionQueryEngine, PricePoint, PriceSeriesFilter, SortOrder, TimeRange,
};

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::env;

struct CliOptions {
    config_file: String,
    account: Option<String>,
    search: Option<String>,
    sort: Option<SortOrder>,
    range: Option<TimeRange>,
    detail: Option<String>,
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions {
        config_file: "config.json".to_string(),
        account: None,
        search: None,
        sort: None,
        range: None,
        detail: None,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("Missing value for {}", flag))
        };

        match arg.as_str() {
            "--account" => options.account = Some(value("--account")?),
            "--search" => options.search = Some(value("--search")?),
            "--sort" => options.sort = Some(value("--sort")?.parse()?),
            "--range" => options.range = Some(value("--range")?.parse()?),
            "--detail" => options.detail = Some(value("--detail")?),
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option: {}", flag),
            path => options.config_file = path.to_string(),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG not set
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info"); }
    }
    env_logger::init();
    info!("Starting Trade Insight");

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;

    info!("Loading configuration from: {}", options.config_file);
    let config = InsightConfig::load_from_file(&options.config_file)?;

    let repository = config.build_repository();
    let analyzer = PositionAnalyzer::new(config.analysis.clone());

    // CLI flags override the configured view
    let mut query = config.view.query();
    if let Some(account) = options.account {
        query.account_filter = Some(account);
    }
    if let Some(search) = options.search {
        query.search_text = search;
    }
    if let Some(sort) = options.sort {
        query.sort_order = sort;
    }
    let time_range = options.range.unwrap_or(config.view.time_range);

    let accounts = repository.accounts();
    info!("Accounts: {}", accounts.join(", "));
    if let Some(account) = &query.account_filter {
        if !accounts.contains(account) {
            warn!("Account filter {} matches no known account", account);
        }
    }

    let listed = PositionQueryEngine::query_source(&repository, &query);
    info!(
        "Showing {} of {} positions",
        listed.len(),
        repository.len()
    );
    println!("{}", display::format_table(&listed));

    let selected = match options.detail.as_deref() {
        Some(code) => repository
            .find_by_code(code)
            .with_context(|| format!("No position with code {}", code))?,
        None => match listed.first().and_then(|p| repository.get(p.id)) {
            Some(position) => position,
            None => {
                info!("No position to show in detail");
                return Ok(());
            }
        },
    };

    let now = Utc::now();
    let history = PricePoint::sample_history(now);
    let series = PriceSeriesFilter::filter(&history, time_range, now);
    let analysis = analyzer.analyze(selected);

    println!();
    println!("{}", display::format_detail(selected, &analysis, &series));

    Ok(())
}
