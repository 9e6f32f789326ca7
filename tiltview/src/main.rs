use clap::{Parser, Subcommand};
use protocol::BackendClient;
use tiltview_gui::{run_gui, GuiConfig};

#[derive(Parser)]
#[command(name = "tiltview", version, about = "Telemetry dashboard for the balancing platform")]
struct Cli {
    /// Base URL of the serial bridge backend
    #[arg(long, default_value = protocol::DEFAULT_BACKEND_URL)]
    backend_url: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List serial ports visible to the backend and exit
    Ports,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ports) => {
            let backend = BackendClient::new(&cli.backend_url);
            let ports = backend.ports()?;
            if ports.is_empty() {
                println!("No serial ports found");
            } else {
                for port in ports {
                    println!("{port}");
                }
            }
        }
        None => {
            let config = GuiConfig {
                backend_url: cli.backend_url,
                ..GuiConfig::default()
            };
            run_gui(config)?;
        }
    }
    Ok(())
}
