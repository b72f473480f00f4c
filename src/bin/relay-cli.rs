use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the marketing relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the relay is up
    Health,
    /// Upsert a contact and fire the test event
    SendTest {
        /// Recipient (defaults to the relay's DEFAULT_TEST_EMAIL)
        #[arg(long)]
        email: Option<String>,
        /// Event name (defaults to the relay's LOOPS_EVENT_NAME)
        #[arg(long)]
        event_name: Option<String>,
    },
    /// Trigger the CRM prospects job
    Prospects,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::SendTest { email, event_name } => {
            let mut body = Map::new();
            if let Some(email) = email {
                body.insert("email".into(), json!(email));
            }
            if let Some(event_name) = event_name {
                body.insert("eventName".into(), json!(event_name));
            }
            client
                .post(format!("{}/send/test", base))
                .json(&Value::Object(body))
                .send()
                .await?
        }
        Commands::Prospects => {
            client
                .post(format!("{}/jobs/attio/prospects", base))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
