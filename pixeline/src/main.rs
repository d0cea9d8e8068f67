#![allow(clippy::multiple_crate_versions)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use pixela::types::{
    CreateGraph, CreatePixel, CreateUser, CreateWebhook, GraphColor, GraphType, PixelsQuery,
    SvgQuery, UpdateGraph, UpdatePixel, UpdateUser,
};
use pixela::PixelaClient;
use pixelaconfig::{PixelaConfig, Token};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod dates;
mod output;

use dates::resolve_date;
use output::{check, format_graph, print_json, report};

#[derive(Parser)]
#[command(name = "pixeline", about = "A CLI for Pixela")]
struct Cli {
    /// Log HTTP traffic to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the Pixela user
    #[command(subcommand)]
    User(UserCommand),
    /// Manage graphs
    #[command(subcommand)]
    Graph(GraphCommand),
    /// Record and inspect pixels
    #[command(subcommand)]
    Pixel(PixelCommand),
    /// Manage webhooks
    #[command(subcommand)]
    Webhook(WebhookCommand),
    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// The shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Register the configured username and token with Pixela
    Create {
        /// Supporter thanks code
        #[arg(long)]
        thanks_code: Option<String>,
    },
    /// Rotate the token on the server and in the local config
    Rotate {
        /// The new token
        new_token: String,
        /// Supporter thanks code
        #[arg(long)]
        thanks_code: Option<String>,
    },
    /// Delete the user and all of its graphs
    Delete,
}

#[derive(Subcommand)]
enum GraphCommand {
    /// Create a graph
    Create {
        /// Graph id (URL identifier)
        id: String,
        /// Display name
        name: String,
        /// Unit of the quantity, e.g. "page"
        unit: String,
        /// Quantity type (int/float)
        #[arg(long = "type", default_value = "int")]
        graph_type: GraphType,
        /// Color (shibafu/momiji/sora/ichou/ajisai/kuro)
        #[arg(long, default_value = "shibafu")]
        color: GraphColor,
        /// IANA timezone, e.g. "Asia/Tokyo"
        #[arg(long)]
        timezone: Option<String>,
        /// increment/decrement/none
        #[arg(long)]
        self_sufficient: Option<String>,
    },
    /// List graphs
    List {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Print a graph as SVG
    Svg {
        /// Graph id (defaults to `default_graph` from config)
        #[arg(short, long)]
        graph: Option<String>,
        /// Render as of this date
        #[arg(long)]
        date: Option<String>,
        /// Rendering mode, e.g. "short"
        #[arg(long)]
        mode: Option<String>,
    },
    /// List dates that hold a pixel
    Pixels {
        #[arg(short, long)]
        graph: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Show graph statistics
    Stats {
        #[arg(short, long)]
        graph: Option<String>,
    },
    /// Update a graph definition
    Update {
        #[arg(short, long)]
        graph: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        color: Option<GraphColor>,
        #[arg(long)]
        timezone: Option<String>,
        #[arg(long)]
        self_sufficient: Option<String>,
        /// Hide the graph from the public list (true/false)
        #[arg(long, value_parser = clap::value_parser!(bool))]
        secret: Option<bool>,
    },
    /// Delete a graph
    Delete {
        #[arg(short, long)]
        graph: Option<String>,
    },
}

#[derive(Subcommand)]
enum PixelCommand {
    /// Record a quantity for a day
    Post {
        quantity: String,
        #[arg(short, long)]
        graph: Option<String>,
        /// today, yesterday, YYYY-MM-DD or yyyyMMdd
        #[arg(short, long)]
        date: Option<String>,
        /// JSON value stored as optionalData
        #[arg(long)]
        data: Option<String>,
    },
    /// Show the pixel of a day
    Get {
        #[arg(short, long)]
        graph: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Change the pixel of a day
    Update {
        #[arg(short, long)]
        graph: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        data: Option<String>,
    },
    /// Increment today's pixel
    Inc {
        #[arg(short, long)]
        graph: Option<String>,
    },
    /// Decrement today's pixel
    Dec {
        #[arg(short, long)]
        graph: Option<String>,
    },
    /// Delete the pixel of a day
    Delete {
        #[arg(short, long)]
        graph: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum WebhookCommand {
    /// Register a webhook and print its hash
    Create {
        /// increment/decrement/stopwatch
        webhook_type: String,
        #[arg(short, long)]
        graph: Option<String>,
    },
    /// List webhooks
    List,
    /// Invoke a webhook
    Invoke { hash: String },
    /// Delete a webhook
    Delete { hash: String },
}

struct Session {
    config: PixelaConfig,
    client: PixelaClient,
}

impl Session {
    fn open() -> Result<Self> {
        let config =
            PixelaConfig::load_or_onboard().with_context(|| "Failed to load pixela config")?;
        let username = config
            .username()
            .with_context(|| "Missing username in pixela config")?;
        let token = config
            .token()
            .with_context(|| "Missing token in pixela config")?;

        let mut client = PixelaClient::new(username, token)?;
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url);
        }
        if let Some(timeout) = config.timeout() {
            client = client.with_timeout(timeout)?;
        }
        Ok(Self { config, client })
    }

    fn graph(&self, graph: Option<String>) -> Result<String> {
        graph
            .or_else(|| self.config.default_graph.clone())
            .ok_or_else(|| anyhow!("No graph given; pass --graph or set `default_graph` in config"))
    }
}

fn parse_optional_data(data: Option<&str>) -> Result<Option<serde_json::Value>> {
    data.map(|text| {
        serde_json::from_str(text).with_context(|| format!("--data is not valid JSON: {text}"))
    })
    .transpose()
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "pixela=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command).await {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "pixeline", &mut std::io::stdout());
            Ok(())
        }
        Command::User(command) => run_user(command).await,
        Command::Graph(command) => run_graph(command).await,
        Command::Pixel(command) => run_pixel(command).await,
        Command::Webhook(command) => run_webhook(command).await,
    }
}

async fn run_user(command: UserCommand) -> Result<()> {
    let mut session = Session::open()?;
    match command {
        UserCommand::Create { thanks_code } => {
            let mut user = CreateUser::new(session.config.username()?, session.config.token()?);
            if let Some(code) = thanks_code {
                user = user.with_thanks_code(&code);
            }
            report(&session.client.create_user(&user).await?)
        }
        UserCommand::Rotate {
            new_token,
            thanks_code,
        } => {
            let mut update = UpdateUser::new(new_token.clone());
            if let Some(code) = thanks_code {
                update = update.with_thanks_code(&code);
            }
            let response = session.client.update_user(&update).await?;
            report(&response)?;
            session.client.set_token(new_token.clone());

            if matches!(session.config.token, Token::Literal(_)) {
                session.config.token = Token::Literal(new_token);
                session
                    .config
                    .store()
                    .with_context(|| "Token rotated but the config could not be saved")?;
                debug!("stored rotated token in config");
            } else {
                eprintln!("Token rotated; update your token source to the new value.");
            }
            Ok(())
        }
        UserCommand::Delete => report(&session.client.delete_user().await?),
    }
}

async fn run_graph(command: GraphCommand) -> Result<()> {
    let session = Session::open()?;
    let client = &session.client;
    match command {
        GraphCommand::Create {
            id,
            name,
            unit,
            graph_type,
            color,
            timezone,
            self_sufficient,
        } => {
            let mut graph = CreateGraph::new(id, name, unit, graph_type, color);
            graph.timezone = timezone;
            graph.self_sufficient = self_sufficient;
            report(&client.create_graph(&graph).await?)
        }
        GraphCommand::List { json } => {
            let list = client.get_graphs().await?;
            check(list.is_success, list.message.as_deref())?;
            if json {
                return print_json(&list);
            }
            for graph in &list.graphs {
                println!("{}", format_graph(graph));
            }
            Ok(())
        }
        GraphCommand::Svg { graph, date, mode } => {
            let graph = session.graph(graph)?;
            let query = SvgQuery {
                date: date.as_deref().map(|d| resolve_date(Some(d))).transpose()?,
                mode,
            };
            println!("{}", client.get_graph_svg(&graph, &query).await?);
            Ok(())
        }
        GraphCommand::Pixels { graph, from, to } => {
            let graph = session.graph(graph)?;
            let query = PixelsQuery {
                from: from.as_deref().map(|d| resolve_date(Some(d))).transpose()?,
                to: to.as_deref().map(|d| resolve_date(Some(d))).transpose()?,
            };
            let list = client.get_graph_pixels(&graph, &query).await?;
            check(list.is_success, list.message.as_deref())?;
            for date in &list.pixels {
                println!("{date}");
            }
            Ok(())
        }
        GraphCommand::Stats { graph } => {
            let graph = session.graph(graph)?;
            let stats = client.get_graph_stats(&graph).await?;
            check(stats.is_success, stats.message.as_deref())?;
            print_json(&stats)
        }
        GraphCommand::Update {
            graph,
            name,
            unit,
            color,
            timezone,
            self_sufficient,
            secret,
        } => {
            let graph = session.graph(graph)?;
            let update = UpdateGraph {
                name,
                unit,
                color: color.map(String::from),
                timezone,
                self_sufficient,
                is_secret: secret,
                ..UpdateGraph::new()
            };
            report(&client.update_graph(&graph, &update).await?)
        }
        GraphCommand::Delete { graph } => {
            let graph = session.graph(graph)?;
            report(&client.delete_graph(&graph).await?)
        }
    }
}

async fn run_pixel(command: PixelCommand) -> Result<()> {
    let session = Session::open()?;
    let client = &session.client;
    match command {
        PixelCommand::Post {
            quantity,
            graph,
            date,
            data,
        } => {
            let graph = session.graph(graph)?;
            let mut pixel = CreatePixel::new(resolve_date(date.as_deref())?, quantity);
            if let Some(data) = parse_optional_data(data.as_deref())? {
                pixel = pixel.with_optional_data(&data)?;
            }
            report(&client.create_pixel(&graph, &pixel).await?)
        }
        PixelCommand::Get { graph, date } => {
            let graph = session.graph(graph)?;
            let pixel = client
                .get_pixel(&graph, &resolve_date(date.as_deref())?)
                .await?;
            check(pixel.is_success, pixel.message.as_deref())?;
            print_json(&pixel)
        }
        PixelCommand::Update {
            graph,
            date,
            quantity,
            data,
        } => {
            let graph = session.graph(graph)?;
            let mut update = UpdatePixel::new();
            update.quantity = quantity;
            if let Some(data) = parse_optional_data(data.as_deref())? {
                update = update.with_optional_data(&data)?;
            }
            let date = resolve_date(date.as_deref())?;
            report(&client.update_pixel(&graph, &date, &update).await?)
        }
        PixelCommand::Inc { graph } => {
            let graph = session.graph(graph)?;
            report(&client.increment_pixel(&graph).await?)
        }
        PixelCommand::Dec { graph } => {
            let graph = session.graph(graph)?;
            report(&client.decrement_pixel(&graph).await?)
        }
        PixelCommand::Delete { graph, date } => {
            let graph = session.graph(graph)?;
            let date = resolve_date(date.as_deref())?;
            report(&client.delete_pixel(&graph, &date).await?)
        }
    }
}

async fn run_webhook(command: WebhookCommand) -> Result<()> {
    let session = Session::open()?;
    let client = &session.client;
    match command {
        WebhookCommand::Create {
            webhook_type,
            graph,
        } => {
            let graph = session.graph(graph)?;
            let created = client
                .create_webhook(&CreateWebhook::new(graph, webhook_type))
                .await?;
            if !created.is_success {
                return Err(anyhow!("Pixela rejected the request: {}", created.message));
            }
            println!("{}", created.webhook_hash.unwrap_or_default());
            Ok(())
        }
        WebhookCommand::List => {
            let list = client.get_webhooks().await?;
            check(list.is_success, list.message.as_deref())?;
            for webhook in &list.webhooks {
                println!(
                    "{}  {:10} {}",
                    webhook.webhook_hash, webhook.webhook_type, webhook.graph_id
                );
            }
            Ok(())
        }
        WebhookCommand::Invoke { hash } => report(&client.invoke_webhook(&hash).await?),
        WebhookCommand::Delete { hash } => report(&client.delete_webhook(&hash).await?),
    }
}
