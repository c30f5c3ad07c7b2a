use clap::Parser;
use log::{error, info};
use std::path::Path;
use vigil::configuration::Config;
use vigil::controller::Controller;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(version = "0.0.1")]
#[command(about = "Online session directory for tunnel servers")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(env = "VIGIL_CONFIG")]
    config_file: String,

    /// Overrides `web_ui_port` from the configuration file
    #[arg(long)]
    web_ui_port: Option<u16>,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_target(false)
        .init();

    info!("Importing configuration");

    let args = Args::parse();

    if args.config_file.is_empty() {
        error!("No configuration file found");
        std::process::exit(1);
    }

    let mut config = Config::from_file(Path::new(args.config_file.as_str())).unwrap_or_else(|e| {
        error!("Unable to import configuration from file: {}", e);
        std::process::exit(1);
    });

    if let Some(port) = args.web_ui_port {
        config.web_ui_port = port;
        if let Err(e) = config.validate() {
            error!("Invalid --web-ui-port: {}", e);
            std::process::exit(1);
        }
    }

    info!("Configuration imported successfully");

    // Built outside any runtime, the database backend owns its own.
    let controller = Controller::new(config).unwrap_or_else(|e| {
        error!("Unable to create a controller instance: {}, exiting...", e);
        std::process::exit(1);
    });

    if let Err(e) = controller.run() {
        error!("Error occured in the controller process: {}, exiting...", e);
        std::process::exit(1);
    }
}
