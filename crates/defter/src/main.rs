mod tui;

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;

use defter_core::kernel::constants;
use defter_core::preflight::capability::capability_checks;
use defter_core::preflight::paths::required_path_checks;
use defter_core::preflight::{CheckOutcome, PreflightContext, StartupReport, run_checks};
use defter_core::storage::config::load_shell_config;
use defter_core::{Application, FaultReporter, LogSink};

/// Defter: tabbed shell for the business-management suite
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Override the bundled asset root (defaults to $DEFTER_ASSETS or ./assets)
    #[arg(long, value_name = "DIR", global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the startup precondition checks, print the report and exit
    Check,
}

#[tokio::main]
async fn main() {
    let status = run(CliArgs::parse()).await;
    std::process::exit(status);
}

async fn run(args: CliArgs) -> i32 {
    let check_only = matches!(args.command, Some(Commands::Check));
    let asset_root = resolve_asset_root(&args);
    let user_data_dir = dirs::data_dir().map(|d| d.join(constants::APP_DIR_NAME));

    // The log sink comes first so every later failure is recorded somewhere,
    // falling back to the temp dir when no per-user directory resolves (the
    // capability battery then reports that properly).
    let log_path = user_data_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(constants::APP_DIR_NAME))
        .join(constants::LOG_FILE_NAME);
    let sink = match LogSink::open(&log_path) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return constants::EXIT_FAILURE;
        }
    };
    if let Err(e) = sink.register() {
        eprintln!("fatal: {}", e);
        return constants::EXIT_FAILURE;
    }

    // Interceptor next: from here on, any uncaught fault is logged and the
    // process exits non-zero instead of crashing silently.
    let reporter = FaultReporter::new(sink.clone());
    if let Err(e) = reporter.install() {
        eprintln!("fatal: {}", e);
        return constants::EXIT_FAILURE;
    }

    log::info!(
        "starting {} v{} (assets at {})",
        constants::APP_NAME,
        constants::APP_VERSION,
        asset_root.display()
    );

    let mut report = StartupReport::new();
    let ctx = PreflightContext::new(asset_root.clone());

    // Required-path battery, then capabilities; each battery is evaluated in
    // full, and any failure halts startup before storage is touched.
    if let Err(e) = run_checks(&required_path_checks(), &ctx, &mut report) {
        return fatal_startup(&e.to_string(), &report, check_only);
    }
    if let Err(e) = run_checks(&capability_checks(), &ctx, &mut report) {
        return fatal_startup(&e.to_string(), &report, check_only);
    }

    if check_only {
        print_report(&report);
        println!("all startup checks passed");
        return constants::EXIT_SUCCESS;
    }

    let Some(data_dir) = user_data_dir else {
        // The user-dirs capability check passed, so this cannot happen; keep
        // an explicit failure path rather than an unwrap.
        return fatal_startup("per-user data directory vanished", &report, false);
    };
    let Some(config_dir) = dirs::config_dir().map(|d| d.join(constants::APP_DIR_NAME)) else {
        return fatal_startup("per-user config directory vanished", &report, false);
    };

    let shell_config = match load_shell_config(&config_dir) {
        Ok(config) => config,
        Err(e) => return fatal_startup(&e.to_string(), &report, false),
    };

    let mut app = Application::new(asset_root.clone(), data_dir, shell_config);
    for descriptor in [
        defter_dashboard::descriptor(),
        defter_accounting::descriptor(),
        defter_inventory::descriptor(),
        defter_hr::descriptor(),
        defter_reports::descriptor(),
        defter_contacts::descriptor(),
    ] {
        if let Err(e) = app.module_registry_mut().register(descriptor) {
            return fatal_startup(&e.to_string(), &report, false);
        }
    }

    let mut frontend = tui::TerminalFrontend::new(asset_root.join(constants::UI_DIR));
    match app.run(&mut frontend, &mut report).await {
        Ok(status) => status,
        Err(e) => fatal_startup(&e.to_string(), &report, false),
    }
}

/// Asset root resolution: CLI flag, then environment, then `./assets`.
fn resolve_asset_root(args: &CliArgs) -> PathBuf {
    if let Some(root) = &args.assets {
        return root.clone();
    }
    if let Some(root) = std::env::var_os(constants::ASSETS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(constants::DEFAULT_ASSETS_DIR)
}

/// Print the startup report, one line per check.
fn print_report(report: &StartupReport) {
    for entry in report.entries() {
        let tag = match entry.outcome {
            CheckOutcome::Passed => "PASS",
            CheckOutcome::Failed => "FAIL",
        };
        println!("[{}] {} - {}", tag, entry.check, entry.detail);
    }
}

/// Fatal startup path: name the missing requirement on the console, leave
/// the diagnostic readable in interactive contexts, exit non-zero.
fn fatal_startup(message: &str, report: &StartupReport, check_only: bool) -> i32 {
    if check_only {
        print_report(report);
    }
    log::error!("startup aborted: {}", message);
    eprintln!("fatal: {}", message);
    for entry in report.failures() {
        eprintln!("  - {}: {}", entry.check, entry.detail);
    }
    if !check_only && io::stdin().is_tty() {
        eprintln!("Press Enter to close.");
        let _ = io::stdin().lock().read_line(&mut String::new());
    }
    constants::EXIT_FAILURE
}
