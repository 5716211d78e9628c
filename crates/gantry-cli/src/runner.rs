use clap::{Args, Parser, Subcommand};
use gantry_common::config::AppConfig;

use crate::framework::run_framework_service;

#[derive(Parser)]
#[command(version, name = "gantry", about = "Runs shell commands as tasks on a Mesos cluster")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register with the master and run submitted tasks
    Run {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

/// Command-line options that take precedence over the configuration.
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// The user to register as and to run tasks as
    #[arg(long)]
    user: Option<String>,
    /// The host of the master
    #[arg(long)]
    master: Option<String>,
    /// The port of the master
    #[arg(long)]
    master_port: Option<u16>,
    /// The port to listen on for master events
    #[arg(long)]
    port: Option<u16>,
    /// The port to listen on for the task API
    #[arg(long)]
    api_port: Option<u16>,
}

impl ConfigOverrides {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(user) = self.user.filter(|x| !x.is_empty()) {
            config.framework.user = Some(user);
        }
        if let Some(master) = self.master {
            config.master.host = master;
        }
        if let Some(port) = self.master_port {
            config.master.port = port;
        }
        if let Some(port) = self.port {
            config.transport.listen_port = port;
        }
        if let Some(port) = self.api_port {
            config.api.listen_port = port;
        }
        config
    }
}

pub fn main(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_from(args);

    match cli.command {
        Command::Run { overrides } => {
            let config = overrides.apply(AppConfig::load()?);
            run_framework_service(config)?;
        }
        Command::Config { overrides } => {
            let config = overrides.apply(AppConfig::load()?);
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
