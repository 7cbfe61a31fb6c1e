use clap::Parser;
use console::{style, Term};
use env_logger::Env;
use findme::catalog::load_catalog;
use findme::cli::Args;
use findme::models::ScanInfo;
use findme::reporter::{export_json, print_results, print_search_header};
use findme::scanner::UsernameScanner;
use findme::ui::TerminalProgress;
use findme::{FindmeError, FindmeResult};
use std::process;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

const EXIT_FAILURE: i32 = 1;
const EXIT_INTERRUPTED: i32 = 130;

fn display_banner() {
    println!("\x1b[1;32m");
    println!("╭─────[FindME]────────────────────────────────────────╮");
    println!("│                                                     │");
    println!("│         _______           ____  _________           │");
    println!("│        / ____(_)___  ____/ /  |/  / ____/           │");
    println!("│       / /_  / / __ \\/ __  / /|_/ / __/              │");
    println!("│      / __/ / / / / / /_/ / /  / / /___              │");
    println!("│     /_/   /_/_/ /_/\\__,_/_/  /_/_____/  v{:<10} │", env!("CARGO_PKG_VERSION"));
    println!("│                                                     │");
    println!("╰─────────────────────────────────────────────────────╯");
    println!("\x1b[0m");
}

fn prompt_username() -> FindmeResult<String> {
    let term = Term::stdout();
    term.write_str(&format!(
        "{}{}{} Enter username to search social account: ",
        style("[").green(),
        style("*").red(),
        style("]").green()
    ))?;
    Ok(term.read_line()?)
}

fn resolve_username(args: &Args) -> FindmeResult<String> {
    let raw = match &args.username {
        Some(username) => username.clone(),
        None => prompt_username()?,
    };
    let username = raw.trim();
    if username.is_empty() {
        return Err(FindmeError::EmptyUsername);
    }
    Ok(username.to_string())
}

fn fail(err: FindmeError) -> ! {
    log::error!("{}", err);
    eprintln!("{} {}", style("Error:").red().bold(), err);
    process::exit(EXIT_FAILURE);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level()))
        .format_timestamp_millis()
        .init();

    log::debug!("findme starting with args: {:?}", args);

    if !args.quiet {
        display_banner();
    }

    let catalog = load_catalog(args.data.as_deref()).unwrap_or_else(|e| fail(e));
    let config = args.scan_config();
    let scanner = UsernameScanner::from_config(&config).unwrap_or_else(|e| fail(e));
    let username = resolve_username(&args).unwrap_or_else(|e| fail(e));

    let total = catalog.platforms().count();
    print_search_header(&username, total, args.quiet);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::debug!("Interrupt received, stopping scan");
                cancel.cancel();
            }
        });
    }

    let start = Instant::now();
    let start_time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut progress = TerminalProgress::new(args.quiet);
    let report = scanner.scan(&catalog, &username, &mut progress, &cancel).await;
    let duration = start.elapsed();

    print_results(&report);

    if let Some(output) = &args.output {
        let scan_info = ScanInfo {
            username: username.clone(),
            start_time,
            end_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_seconds: duration.as_secs_f64(),
            concurrency: scanner.concurrency(),
            timeout_seconds: config.timeout.as_secs(),
        };
        export_json(&report, &scan_info, output)?;
    }

    if report.cancelled {
        process::exit(EXIT_INTERRUPTED);
    }

    Ok(())
}
