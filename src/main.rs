use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;

use hsego::api::ApiClient;
use hsego::app::AppConfig;
use hsego::ui::dashboard::{Dashboard, OpKind, OpStatus, Snapshot};
use hsego::ui::{panels, shell};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the HSE GO backend", long_about = None)]
struct Cli {
    /// Backend base URL (e.g. https://hse-go.example.com)
    #[arg(long, env = "HSEGO_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the news feed once
    News,
    /// Fetch and print the incident list once
    Incidents,
    /// Send one chatbot message and print the reply
    Chat { message: String },
    /// Submit one incident report and print the refreshed list
    Report {
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
    },
    /// Persist a base URL to the config file
    SetBase { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Some(Command::SetBase { url }) = &cli.command {
        let config = AppConfig::with_base_url(url)?;
        config.save()?;
        println!("Saved base URL {}", config.base_url);
        return Ok(());
    }

    let config = AppConfig::resolve(cli.api_base.as_deref())?;
    info!("backend base URL: {}", config.base_url);

    let dash = Dashboard::new(ApiClient::new(&config.base_url));

    match cli.command {
        None => shell::run(dash).await,
        Some(Command::News) => {
            dash.load_news().await;
            let snapshot = dash.snapshot();
            print!("{}", panels::news_panel(&snapshot.news));
            exit_on_failure(&snapshot, OpKind::News)
        }
        Some(Command::Incidents) => {
            dash.load_incidents().await;
            let snapshot = dash.snapshot();
            print!("{}", panels::incidents_panel(&snapshot.incidents));
            exit_on_failure(&snapshot, OpKind::Incidents)
        }
        Some(Command::Chat { message }) => match dash.send_chat(&message).await {
            Err(rejection) => anyhow::bail!("{}", rejection.prompt()),
            Ok(()) => {
                let snapshot = dash.snapshot();
                print!("{}", panels::chat_panel(snapshot.chat.as_ref()));
                exit_on_failure(&snapshot, OpKind::Chat)
            }
        },
        Some(Command::Report {
            description,
            location,
        }) => {
            dash.edit_description(&description);
            dash.edit_location(&location);
            match dash.submit_incident().await {
                Err(rejection) => anyhow::bail!("{}", rejection.prompt()),
                Ok(()) => {
                    let snapshot = dash.snapshot();
                    print!("{}", panels::incidents_panel(&snapshot.incidents));
                    exit_on_failure(&snapshot, OpKind::Report)
                }
            }
        }
        Some(Command::SetBase { .. }) => unreachable!("handled above"),
    }
}

fn exit_on_failure(snapshot: &Snapshot, op: OpKind) -> anyhow::Result<()> {
    if let OpStatus::Failed(message) = snapshot.status(op) {
        anyhow::bail!("{message}");
    }
    Ok(())
}
