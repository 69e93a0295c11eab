use quicksave_pool::config::LayeredConfig;
use quicksave_pool::host::{ConsoleHost, IdentityProvider};
use quicksave_pool::manager::{QuickloadOutcome, QuicksaveManager};
use quicksave_pool::naming::build_pattern;
use quicksave_pool::paths::{PATH_SAVES, PATH_SETTINGS};
use quicksave_pool::store::{FileSaveStore, SaveStore};
use quicksave_pool::TickOutcome;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::UNIX_EPOCH;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("QUICKSAVE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Value following `flag`; exits with usage when the flag has none
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let index = args.iter().position(|arg| arg == flag)?;
    match args.get(index + 1) {
        Some(value) => Some(value.clone()),
        None => {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }
}

/// First argument that is neither a flag nor a flag's value
fn command(args: &[String]) -> Option<&str> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if matches!(arg.as_str(), "--saves" | "--config" | "--identity" | "--affiliation") {
            iter.next();
            continue;
        }
        if !arg.starts_with("--") {
            return Some(arg.as_str());
        }
    }
    None
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return ExitCode::SUCCESS;
    }

    init_tracing();

    let saves = flag_value(&args, "--saves")
        .map(PathBuf::from)
        .unwrap_or_else(|| PATH_SAVES.clone());
    let settings = flag_value(&args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PATH_SETTINGS.clone());
    let player = flag_value(&args, "--identity");
    let affiliation = flag_value(&args, "--affiliation");

    let mut host = ConsoleHost::for_player(
        FileSaveStore::new(&saves),
        player.as_deref(),
        affiliation.as_deref(),
    );

    let config = LayeredConfig::from_file(&settings);
    if let Err(e) = config.try_current() {
        eprintln!("[quicksave] Warning: {}, using defaults", e);
    }
    let mut manager = QuicksaveManager::new(Box::new(config));
    let session = manager.attach();

    let code = match command(&args) {
        Some("next") => {
            println!("{}", manager.generate_next_save_name(&host));
            ExitCode::SUCCESS
        }
        Some("save") => match manager.quicksave(&mut host) {
            Ok(name) => {
                println!("[quicksave] Saved {}", name);
                ExitCode::SUCCESS
            }
            Err(_) => ExitCode::FAILURE,
        },
        Some("load") => load(&mut manager, &mut host),
        Some("list") => list(&manager, &host),
        _ => {
            eprintln!("{}", USAGE_TEXT);
            ExitCode::FAILURE
        }
    };

    manager.detach(session);
    code
}

fn load(manager: &mut QuicksaveManager, host: &mut ConsoleHost) -> ExitCode {
    match manager.request_quickload(host) {
        QuickloadOutcome::Pending(_) => match manager.on_tick(host) {
            TickOutcome::Applied(_) => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        },
        QuickloadOutcome::NoQuicksaves => ExitCode::SUCCESS,
        QuickloadOutcome::NotAvailable | QuickloadOutcome::Failed(_) => ExitCode::FAILURE,
    }
}

/// Print the quicksaves of the current identity, newest first
fn list(manager: &QuicksaveManager, host: &ConsoleHost) -> ExitCode {
    let config = manager.config();
    let matcher = match build_pattern(&config, &host.current_identity_label()) {
        Ok(matcher) => matcher,
        Err(e) => {
            eprintln!("[quicksave] Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let records = match host.list_save_records() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("[quicksave] Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut quicksaves: Vec<_> = records
        .into_iter()
        .filter(|record| matcher.matches(&record.name))
        .collect();
    quicksaves.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    println!(
        "[quicksave] {} of {} slots in {}",
        quicksaves.len(),
        config.max_slots,
        host.store().dir().display()
    );
    for record in &quicksaves {
        let modified = record
            .last_modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        println!("{}\t{}", modified, record.name);
    }
    ExitCode::SUCCESS
}

static USAGE_TEXT: &str = r#"
Usage: quicksave-pool [OPTIONS] <COMMAND>

Commands:
    next                  Print the name the next quicksave will use
    save                  Write a quicksave into the next rotation slot
    load                  Load the most recent quicksave
    list                  List the quicksaves of the current identity, newest first

Options:
    --saves <dir>         Save directory (default: $XDG_DATA_HOME/quicksave-pool/saves)
    --config <file>       Settings file (default: $XDG_DATA_HOME/quicksave-pool/settings.json)
    --identity <label>    Player identity the quicksaves belong to
    --affiliation <name>  Clan or faction appended to the identity
    --help                Print this help

Set QUICKSAVE_LOG (e.g. QUICKSAVE_LOG=debug) to change log verbosity.
"#;
