use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use brightctl::cli::{Cli, Commands};
use brightctl::errors::{BrightError, EXIT_CONFIG};
use brightctl::models::{DiscoveryRequest, DispatchOutcome, Outcome, TestSelection};
use brightctl::scanner::{
    clean_names, create_projects, dispatch_scan, fetch_entry_points, filter_by_url_substring,
    read_entry_point_ids, read_list, start_crawl_scan, start_discovery, write_entry_point_ids,
};
use brightctl::{BrightApi, ConsoleReporter, FixedInterval, HttpClient, analyzer};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let code = match run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(!cli.no_color))
        .with(file_layer)
        .init();

    Ok(())
}

async fn run(cli: Cli) -> Result<Outcome, BrightError> {
    let config = cli.client_config();
    config.validate()?;
    let pagination = cli.pagination_options();

    let api = BrightApi::new(Arc::new(HttpClient::new(&config)?));
    let reporter = ConsoleReporter::new();

    match cli.command {
        Commands::CreateProject {
            name,
            project_file,
            group_ids,
            interval_secs,
        } => {
            let mut names = name;
            if let Some(path) = project_file {
                names.extend(read_list(&path)?);
            }
            let names = clean_names(&names);
            if names.is_empty() {
                return Err(BrightError::Config(
                    "No project names given. Pass --name or --project-file (PROJECT_FILE)"
                        .to_string(),
                ));
            }
            let group_ids: Vec<String> = group_ids
                .iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect();

            let limiter = FixedInterval::new(Duration::from_secs(interval_secs));
            let pb = create_progress_bar(names.len(), cli.verbose > 0);
            let report = create_projects(&api, &names, &group_ids, &limiter, &pb).await?;

            reporter.print_batch(&report);
            Ok(Outcome::from_batch(&report))
        }

        Commands::CreateDiscovery {
            project_id,
            target_url,
            name,
            repeater,
        } => {
            let discovery = DiscoveryRequest::crawl(name, &target_url).with_repeaters(repeater);
            let discovery_id = start_discovery(&api, &project_id, &discovery).await?;
            println!(
                "{} {}",
                "Discovery started.".green().bold(),
                discovery_id.unwrap_or_default()
            );
            Ok(Outcome::Done)
        }

        Commands::RunScan {
            project_id,
            target_url,
            scan,
        } => {
            let settings = scan.immediate_settings(TestSelection::default_tests());
            let scan_id = start_crawl_scan(&api, &settings, &project_id, &target_url).await?;
            reporter.print_dispatch(&DispatchOutcome::Started { scan_id });
            Ok(Outcome::Done)
        }

        Commands::EpScan {
            project_id,
            project_name,
            url_contains,
            save,
            no_dispatch,
            scan,
        } => {
            let settings = scan.settings(TestSelection::default_buckets());
            let project_name = project_name.unwrap_or_else(|| project_id.clone());

            let enumeration = fetch_entry_points(&api, &project_id, &pagination)
                .await?
                .require_first_page()?;
            reporter.print_enumeration(&project_id, &enumeration);

            let ids = match url_contains {
                Some(substring) => filter_by_url_substring(&enumeration.entry_points, &substring),
                None => enumeration.ids(),
            };

            if let Some(path) = save {
                write_entry_point_ids(&path, &ids)?;
            }

            if no_dispatch {
                return Ok(Outcome::from_listing(enumeration.is_complete(), ids.len()));
            }

            let outcome = dispatch_scan(&api, &settings, &project_id, &project_name, &ids).await?;
            reporter.print_dispatch(&outcome);
            Ok(Outcome::from_dispatch(enumeration.is_complete(), &outcome))
        }

        Commands::EpScanFile {
            project_id,
            project_name,
            entrypoints_file,
            scan,
        } => {
            let settings = scan.settings(TestSelection::default_buckets());
            let project_name = project_name.unwrap_or_else(|| project_id.clone());

            let ids = read_entry_point_ids(&entrypoints_file)?;
            let outcome = dispatch_scan(&api, &settings, &project_id, &project_name, &ids).await?;
            reporter.print_dispatch(&outcome);
            Ok(Outcome::from_dispatch(true, &outcome))
        }

        Commands::ExportIssues {
            scan_id,
            output_dir,
            mode,
            strict_severity,
            keep_archive,
        } => {
            let options = mode.export_options(output_dir, strict_severity, keep_archive);
            let summary = analyzer::export_scan_logs(&api, &scan_id, &options).await?;
            reporter.print_export(&summary);
            Ok(if summary.matched == 0 {
                Outcome::NothingToDo
            } else {
                Outcome::Done
            })
        }
    }
}

fn create_progress_bar(total: usize, verbose: bool) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);

    if verbose {
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
    }

    pb
}
