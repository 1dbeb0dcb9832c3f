//! Dual-fuel cost calculator entry point: CLI wiring and profile loading.

use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

use dualfuel_cost::calc::{CostReport, EnergyInput, EnergySource};
use dualfuel_cost::cli::Cli;
use dualfuel_cost::config::{ConfigError, ProfileConfig};
use dualfuel_cost::io::export::{export_all, write_json};
use dualfuel_cost::session::Session;

/// Loads the profile: `--profile` takes priority, then `--preset`, then `default`.
fn load_profile(cli: &Cli) -> Result<ProfileConfig, ConfigError> {
    match &cli.profile {
        Some(path) => ProfileConfig::from_toml_file(path),
        None => ProfileConfig::from_preset(cli.preset_or_default()),
    }
}

fn warn_on_zero_distance(profile: &ProfileConfig) {
    let snapshot = profile.snapshot();
    for source in [EnergySource::Electric, EnergySource::Fuel] {
        if let EnergyInput::SpendDistance { distance_km, .. } = *snapshot.input(source)
            && distance_km <= 0.0
        {
            warn!(?source, "distance is 0, cost per km reported as 0");
        }
    }
}

/// One-screen summary printed after each interactive edit.
fn print_summary(report: &CostReport) {
    let r = &report.result;
    println!(
        "electric {:.4}/km | fuel {:.4}/km | diff {:+.4} | critical {:.2}",
        r.electric_cost_per_km, r.fuel_cost_per_km, r.diff, r.critical_electric_price
    );
    println!(
        "{}: {}",
        report.recommendation.decision, report.recommendation.guidance
    );
}

fn run_interactive(session: &mut Session) -> io::Result<()> {
    println!("Enter edits as section.field=value, `show` for the full report, `quit` to exit.");
    print_summary(&session.report());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "" => {}
            "quit" | "q" | "exit" => return Ok(()),
            "show" => println!("{}", session.report()),
            edit => match session.apply(edit) {
                Ok(()) => print_summary(&session.report()),
                Err(e) => eprintln!("{e}"),
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install logger: {e}");
    }

    let profile = match load_profile(&cli) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = profile.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let source = cli.profile.as_deref().map_or_else(
        || cli.preset_or_default().to_string(),
        |p| p.display().to_string(),
    );
    info!(%source, "profile loaded");

    // Overrides are coerced like form input, so they cannot invalidate the profile.
    let mut session = Session::new(profile);
    for assignment in &cli.overrides {
        if let Err(e) = session.apply(assignment) {
            eprintln!("{e}");
            process::exit(1);
        }
    }
    warn_on_zero_distance(session.profile());
    let report = session.report();

    if cli.json {
        if let Err(e) = write_json(&report, io::stdout().lock()) {
            eprintln!("error: failed to write JSON: {e}");
            process::exit(1);
        }
    } else {
        println!("{report}");
    }

    if let Some(dir) = &cli.export_dir {
        match export_all(&report, dir) {
            Ok(files) => eprintln!("Wrote {} files to {}", files.len(), dir.display()),
            Err(e) => {
                eprintln!("error: failed to export CSV: {e}");
                process::exit(1);
            }
        }
    }

    if cli.interactive {
        if let Err(e) = run_interactive(&mut session) {
            eprintln!("error: interactive session failed: {e}");
            process::exit(1);
        }
    }
}
