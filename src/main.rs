use anyhow::{bail, Context, Result};
use clap::Parser;
use price_forecast::export::{save_combined_csv, save_json};
use price_forecast::DataLoader;
use riel_dashboard::{run_session, Cli, Dashboard, DashboardConfig};
use std::io::{self, Write};
use std::process::ExitCode;

fn init_logging(verbose: bool) {
    let (global_level, my_code_level) = if verbose {
        (log::LevelFilter::Info, log::LevelFilter::Debug)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("riel_dashboard"), my_code_level)
        .filter(Some("price_forecast"), my_code_level)
        .filter(Some("trade_math"), my_code_level);
    // RUST_LOG still wins when set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data_path = Some(data.clone());
    }
    let Some(data_path) = config.data_path.clone() else {
        bail!("No price file given: pass --data or set data_path in the config file");
    };

    let series = DataLoader::from_csv(&data_path)
        .with_context(|| format!("Failed to load prices from {}", data_path.display()))?;
    let dashboard = Dashboard::new(series, config)?;
    let params = args.params(dashboard.default_params());

    let params = if args.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        run_session(&dashboard, params, stdin.lock(), &mut stdout)?
    } else {
        params
    };

    let view = dashboard.render(&params);
    if !args.interactive {
        let mut stdout = io::stdout();
        write!(stdout, "{}", view.to_text(dashboard.config()))?;
        stdout.flush()?;
    }

    if let Some(path) = &args.export_csv {
        match view.assembly() {
            Some(assembly) => {
                save_combined_csv(&assembly.combined, path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            None => log::warn!("No forecast to export to {}", path.display()),
        }
    }
    if let Some(path) = &args.export_json {
        save_json(&view.report(dashboard.config()), path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.is_failure(&view) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
