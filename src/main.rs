use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use readiness_board::config::AppConfig;
use readiness_board::error::AppError;
use readiness_board::telemetry;
use readiness_board::workflows::intake::{AssignmentImporter, NormalizedBatch};
use readiness_board::workflows::performance::{
    build_team_scoreboard, build_weekly_report, build_worker_scoreboard, performance_router,
    MonthPeriod, PageRequest, Period, TeamScoreboard, WeeklyReport, WorkerScoreboard,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Work Readiness Scoreboard",
    about = "Run the work-readiness performance scoreboard service or render reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute performance scoreboards from an assignment export
    Performance {
        #[command(subcommand)]
        command: PerformanceCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum PerformanceCommand {
    /// Render worker, team, and weekly scoreboards for one month
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Target month (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    month: MonthPeriod,
    /// Assignment export to score (.json or .csv)
    #[arg(long)]
    assignments: PathBuf,
    /// Worker rows shown per page
    #[arg(long, default_value_t = 10)]
    page_size: usize,
    /// Include the calendar-week breakdown
    #[arg(long)]
    list_weeks: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Performance {
            command: PerformanceCommand::Report(args),
        } => run_performance_report(args),
    }
}

fn parse_month(raw: &str) -> Result<MonthPeriod, String> {
    MonthPeriod::parse(raw).map_err(|err| err.to_string())
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(performance_router())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "work-readiness scoreboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_performance_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        month,
        assignments,
        page_size,
        list_weeks,
    } = args;

    let batch = load_batch(&assignments)?;
    let period = Period::Month(month);
    let page = PageRequest::new(1, page_size);

    let workers = build_worker_scoreboard(&batch, &period, &page);
    let teams = build_team_scoreboard(&batch, &period);
    let weekly = if list_weeks {
        Some(build_weekly_report(&batch, month))
    } else {
        None
    };

    render_report(&workers, &teams, weekly.as_ref());
    Ok(())
}

fn load_batch(path: &Path) -> Result<NormalizedBatch, AppError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let batch = if is_csv {
        AssignmentImporter::from_csv_path(path)?
    } else {
        AssignmentImporter::from_json_path(path)?
    };
    Ok(batch)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_report(
    workers: &WorkerScoreboard,
    teams: &TeamScoreboard,
    weekly: Option<&WeeklyReport>,
) {
    println!("Work-readiness scoreboard for {}", workers.period);

    if workers.dropped_records > 0 {
        println!(
            "Dropped {} malformed record(s) during intake",
            workers.dropped_records
        );
    }

    let org = &workers.organization;
    println!(
        "\nOrganization: {} workers across {} teams, {}/{} completed, composite {:.1} (grade {})",
        org.worker_count,
        org.team_count,
        org.counts.completed,
        org.counts.total_assignments,
        org.composite_score,
        org.grade_label
    );

    println!(
        "\nWorkers (page {} of {}, {} total)",
        workers.workers.page, workers.workers.total_pages, workers.workers.total_count
    );
    for row in &workers.workers.items {
        println!(
            "{:>3}. {} | completion {:.1}% | on-time {:.1}% | quality {:.1} | composite {:.1} | grade {}",
            row.rank,
            row.display_name,
            row.completion_rate,
            row.on_time_rate,
            row.quality_score,
            row.composite_score,
            row.grade_label
        );
    }

    println!("\nTeams");
    for team in &teams.teams {
        println!(
            "{:>3}. {} | {} workers | completion {:.1}% | composite {:.1} | grade {} | quality basis {}",
            team.rank,
            team.team_leader_id,
            team.worker_count,
            team.completion_rate,
            team.composite_score,
            team.grade_label,
            team.quality_basis.label()
        );
    }

    if let Some(weekly) = weekly {
        println!("\nWeekly breakdown for {}", weekly.month);
        for week in &weekly.weeks {
            let trend = match week.trend {
                Some(delta) => format!(" (trend {delta:+.1})"),
                None => String::new(),
            };
            println!(
                "Week {} [{} - {}]: {} assignment(s), score {:.1}, grade {}{}",
                week.week_number,
                week.starts_on,
                week.ends_on,
                week.counts.total_assignments,
                week.quality_score,
                week.grade_label,
                trend
            );
        }
    }
}
