//! babystat - Daily and period statistics over exported baby-activity logs

use babystat::{
    aggregation::Aggregator,
    aggregation_types::PeriodTotals,
    analyzer,
    cli::{Cli, Command, default_period_range, parse_date_arg, parse_period_arg},
    data_loader::DataLoader,
    error::Result,
    filters::{ActivityFilter, PeriodFilter},
    output::get_formatter,
    timezone::TimezoneConfig,
    types::BabyId,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("babystat=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let tz_config = TimezoneConfig::resolve(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());
    let today = chrono::Utc::now().with_timezone(&tz_config.tz).date_naive();

    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stdout());
    let loader = DataLoader::new(cli.data_path.clone())?.with_progress(show_progress);
    let mut activities = loader.load_activities()?;
    info!("Loaded {} activities", activities.len());

    if let Some(baby) = &cli.baby {
        let baby_filter = ActivityFilter::new()
            .with_baby(BabyId::new(baby.clone()))
            .with_timezone(tz_config.tz);
        activities = baby_filter.apply(activities);
        info!("{} activities after filtering by child", activities.len());
    }

    let aggregator = Aggregator::new(tz_config);
    let formatter = get_formatter(cli.json);

    match &cli.command {
        Command::Daily { date } => {
            let date = match date {
                Some(s) => parse_date_arg(s)?,
                None => today,
            };
            let stats = aggregator.daily_stats(&activities, date);
            println!("{}", formatter.format_daily(date, &stats));
        }
        Command::Period {
            period,
            since,
            until,
        } => {
            let period = parse_period_arg(period)?;
            let (default_since, default_until) = default_period_range(period, today);
            let since = match since {
                Some(s) => parse_date_arg(s)?,
                None => default_since,
            };
            let until = match until {
                Some(s) => parse_date_arg(s)?,
                None => default_until,
            };
            let slices = aggregator.period_series(&activities, &PeriodFilter::new(period, since, until))?;
            let totals = PeriodTotals::from_slices(&slices);
            println!("{}", formatter.format_period(period, &slices, &totals));
        }
        Command::Advice { date } => {
            let date = match date {
                Some(s) => parse_date_arg(s)?,
                None => today,
            };
            let summary = aggregator.daily_summary(&activities, date);
            let report = analyzer::analyze(&summary);
            println!("{}", formatter.format_advice(date, &summary, &report));
        }
    }

    Ok(())
}
