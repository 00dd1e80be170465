//! Conduit demo binary.
//!
//! Registers a few sample functions plus the router and invokes one of them
//! the way an HTTP or background-event host would.

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conduit_core::app::{CatalogBuilder, EventContext, FunctionInvoker, HttpRequest, PubSubMessage};
use conduit_core::catalog::{FunctionCatalog, FunctionRegistration, RoutingFunction};
use conduit_core::config::InvokerConfig;
use conduit_core::domain::Message;
use conduit_core::observability::CatalogSummary;

#[derive(Debug, Parser)]
#[command(name = "conduit", about = "Invoke registered functions from the command line")]
struct Cli {
    /// Function to bind (overrides conduit.toml and CONDUIT_FUNCTION_DEFINITION).
    #[arg(long, global = true)]
    function: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the registered functions as JSON.
    List,

    /// Invoke synchronously and print the response.
    Http {
        /// Request body. Omit for no input.
        #[arg(long, default_value = "")]
        body: String,

        /// Request header as key=value. Repeatable.
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },

    /// Invoke as a background event; results are logged and dropped.
    Event {
        #[arg(long, default_value = "null")]
        payload: String,

        #[arg(long)]
        event_id: Option<String>,

        #[arg(long)]
        event_type: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct Greeting {
    name: String,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn catalog(config: &InvokerConfig) -> anyhow::Result<Arc<FunctionCatalog>> {
    let catalog = CatalogBuilder::new()
        .register(FunctionRegistration::supplier(|| "Hello World!".to_string()).with_name("hello"))?
        .register(
            FunctionRegistration::function(|s: String| s.to_uppercase())
                .with_names(["uppercase", "upper"]),
        )?
        .register(
            FunctionRegistration::function(|greeting: Greeting| {
                Message::new(format!("Hello, {}!", greeting.name)).with_header("greeted", greeting.name)
            })
            .with_name("greet"),
        )?
        .register(
            FunctionRegistration::consumer(|msg: PubSubMessage| {
                info!(message_id = ?msg.message_id, "received: {}", msg.data);
            })
            .with_name("pubsub"),
        )?
        .register(FunctionRegistration::routing(RoutingFunction::from_config(config)))?
        .build()?;
    Ok(catalog)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = InvokerConfig::load().context("failed to load configuration")?;
    if let Some(function) = cli.function {
        config = config.with_definition(function);
    }

    let catalog = catalog(&config)?;

    match cli.command {
        Command::List => {
            let summary = CatalogSummary::of(&catalog);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Http { body, headers } => {
            let invoker = FunctionInvoker::new(catalog, &config)?;
            let request = headers
                .into_iter()
                .fold(HttpRequest::new(body), |request, (key, value)| {
                    request.with_header(key, value)
                });

            let response = invoker.service(request).await;
            for (key, value) in &response.headers {
                println!("{key}: {value}");
            }
            println!();
            println!("{}", response.text());
            if !response.is_success() {
                bail!("function returned status {}", response.status);
            }
        }
        Command::Event {
            payload,
            event_id,
            event_type,
        } => {
            let invoker = FunctionInvoker::new(catalog, &config)?;
            let context = EventContext {
                event_id,
                event_type,
                ..EventContext::default()
            };
            invoker
                .accept(payload.as_bytes(), Some(&context))
                .await
                .context("background invocation failed")?;
        }
    }

    Ok(())
}
