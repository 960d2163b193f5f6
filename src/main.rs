use clap::Parser;
use kiosk::core::config;
use kiosk::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kiosk", about = "Terminal content hub")]
struct Args {
    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL that relative tab urls resolve against
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to kiosk.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("kiosk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let loaded = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("kiosk: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&loaded, args.base_url.as_deref());

    log::info!(
        "Kiosk starting up with {} tabs, base url {:?}",
        resolved.tabs.len(),
        resolved.base_url
    );

    tui::run(resolved)
}
