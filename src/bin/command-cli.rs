use clap::{Parser, Subcommand};
use serde_json::Value;

use command_transport::client::{ClientError, CommandClient};
use command_transport::command::NewCommandRequest;

#[derive(Parser)]
#[command(name = "command-cli")]
#[command(about = "Client for the command service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "/commands")]
    route: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new command
    New {
        /// Command name
        name: String,

        /// JSON payload passed to the command
        #[arg(short, long)]
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = CommandClient::new(&cli.url, &cli.route);

    match cli.command {
        Commands::New { name, payload } => {
            let payload = match payload {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Value::Null,
            };
            let request = NewCommandRequest { name, payload };

            match client.new_command(&request).await {
                Ok(created) => println!("{}", serde_json::to_string_pretty(&created)?),
                Err(ClientError::Remote { status, source }) => {
                    eprintln!("Error: server returned status {}", status);
                    eprintln!("Message: {}", source);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
