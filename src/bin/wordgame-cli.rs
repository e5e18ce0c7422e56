use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "wordgame-cli")]
#[command(about = "Query a running word-game server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "WORDGAME_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Words made from exactly these letters ('?' is a blank)
    Anagram { input: String },
    /// Words fitting this pattern ('?' matches any letter)
    Match { input: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (path, input) = match &cli.command {
        Commands::Anagram { input } => ("anagram", input),
        Commands::Match { input } => ("match", input),
    };

    let res = client
        .post(format!("{}/{}", cli.url.trim_end_matches('/'), path))
        .form(&[("input", input.as_str())])
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
