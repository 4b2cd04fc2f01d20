use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "insights-cli")]
#[command(about = "Exercise the insights-demo endpoints", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Service health and telemetry status
    Health,
    /// Deployment metadata
    Info,
    /// Emit a custom message at a level (info, warning, error)
    Log {
        message: String,
        #[arg(short, long, default_value = "info")]
        level: String,
    },
    /// Submit a user record
    User {
        name: String,
        email: String,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<i64>,
    },
    /// Trigger the division-by-zero demo
    ErrorDemo,
    /// Log on the untracked channel
    Untracked,
    /// Log every level on every tracked channel
    AllLevels,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{url}/health")),
        Commands::Info => client.get(format!("{url}/app-info")),
        Commands::Log { message, level } => client
            .post(format!("{url}/log"))
            .json(&json!({ "message": message, "level": level })),
        Commands::User { name, email, age } => client
            .post(format!("{url}/user"))
            .json(&json!({ "name": name, "email": email, "age": age })),
        Commands::ErrorDemo => client.get(format!("{url}/error-demo")),
        Commands::Untracked => client.get(format!("{url}/test-untracked")),
        Commands::AllLevels => client.get(format!("{url}/log-all-levels")),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
