use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::sync::Arc;

use healthfirst::api::HttpBackend;
use healthfirst::core::config::{self, CliOverrides};
use healthfirst::tui;

#[derive(Parser)]
#[command(name = "healthfirst", about = "Terminal client for the HealthFirst medical assistant")]
struct Args {
    /// Backend API base URL (e.g. http://localhost:5000/api)
    #[arg(long)]
    base_url: Option<String>,

    /// Email to pre-fill on the login form
    #[arg(short, long)]
    email: Option<String>,

    /// Route to open first: /login, /signup or /dashboard
    #[arg(short, long)]
    route: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Ignoring config file: {e}");
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            email: args.email,
            route: args.route,
            log_file: args.log_file,
        },
    );

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!("Could not open log file {}: {e}", resolved.log_file.display()),
    }

    log::info!("HealthFirst starting up against {}", resolved.base_url);

    let backend = HttpBackend::new(&resolved.base_url, resolved.request_timeout)?;
    tui::run(&resolved, Arc::new(backend))?;
    Ok(())
}
