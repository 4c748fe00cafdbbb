//! IronMQ data source CLI
//!
//! Reads `ironio_queues` and `ironio_pull_queue` against a live IronMQ account
//! and prints the populated attributes.

mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ironmq_infra::{load_settings, IronMqClient, SettingsSources};
use ironmq_provider::{
    schemas, AttributeMap, AttributeType, DataSourceSchema, Diagnostic, Provider, ProviderError,
    ReadResponse,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::debug;

#[derive(Parser)]
#[command(name = "ironmq-datasource")]
#[command(about = "Read IronMQ queue data sources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra JSON settings file (must exist)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// OAuth token, overrides every other source
    #[arg(long, global = true)]
    token: Option<String>,

    /// API host, overrides every other source
    #[arg(long, global = true)]
    host: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List queue names of a project
    Queues {
        /// Project id
        #[arg(short, long, env = "IRON_PROJECT_ID")]
        project_id: String,

        /// Name filter: "abc", "abc*", "*abc" or "*abc*"
        #[arg(short, long, default_value = "")]
        filter_name: String,
    },

    /// Show message counters of a pull queue
    PullQueue {
        /// Project id
        #[arg(short, long, env = "IRON_PROJECT_ID")]
        project_id: String,

        /// Queue name
        #[arg(short, long)]
        name: String,
    },

    /// Print attribute schemas
    Schema {
        /// Data source type name (default: all)
        data_source: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct NameRow {
    name: String,
}

#[derive(Tabled)]
struct AttributeRow {
    attribute: String,
    value: String,
}

#[derive(Tabled)]
struct SchemaRow {
    attribute: String,
    #[tabled(rename = "type")]
    ty: String,
    presence: String,
    force_new: bool,
    default: String,
    description: String,
}

impl Commands {
    /// Data source type name and read config
    fn read_request(&self) -> Option<(&'static str, AttributeMap)> {
        let (name, config) = match self {
            Commands::Queues {
                project_id,
                filter_name,
            } => (
                "ironio_queues",
                json!({ "project_id": project_id, "filter_name": filter_name }),
            ),
            Commands::PullQueue { project_id, name } => (
                "ironio_pull_queue",
                json!({ "project_id": project_id, "name": name }),
            ),
            Commands::Schema { .. } => return None,
        };
        match config {
            Value::Object(map) => Some((name, map)),
            _ => None,
        }
    }
}

fn settings_sources(cli: &Cli) -> SettingsSources {
    let mut sources = SettingsSources::standard();
    if let Some(path) = &cli.config {
        sources = sources.with_file(path.clone());
    }
    if let Some(token) = &cli.token {
        sources = sources.with_override("token", token.as_str());
    }
    if let Some(host) = &cli.host {
        sources = sources.with_override("host", host.as_str());
    }
    sources
}

fn build_provider(cli: &Cli) -> Result<Provider, ProviderError> {
    let settings = load_settings(&settings_sources(cli))?;
    debug!(settings = ?settings, "Settings loaded");

    let client = IronMqClient::new(&settings)?;
    Ok(Provider::new(Arc::new(client)))
}

fn diagnostic_error(err: &ProviderError) -> anyhow::Error {
    let diag = Diagnostic::from(err);
    match diag.attribute {
        Some(attribute) => anyhow::anyhow!("{} ({}): {}", diag.summary, attribute, diag.detail),
        None => anyhow::anyhow!("{}: {}", diag.summary, diag.detail),
    }
}

fn type_name(ty: &AttributeType) -> String {
    match ty {
        AttributeType::String => "string".to_string(),
        AttributeType::Int => "int".to_string(),
        AttributeType::List(element) => format!("list({})", type_name(element)),
    }
}

fn schema_rows(schema: &DataSourceSchema) -> Vec<SchemaRow> {
    schema
        .attributes
        .iter()
        .map(|(name, attr)| SchemaRow {
            attribute: name.to_string(),
            ty: type_name(&attr.ty),
            presence: format!("{:?}", attr.presence).to_lowercase(),
            force_new: attr.force_new,
            default: attr
                .default
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default(),
            description: attr.description.unwrap_or_default().to_string(),
        })
        .collect()
}

fn attribute_rows(state: &AttributeMap) -> Vec<AttributeRow> {
    state
        .iter()
        .filter(|(_, v)| !v.is_array())
        .map(|(k, v)| AttributeRow {
            attribute: k.clone(),
            value: match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

fn print_schemas(filter: Option<&str>, output: OutputFormat) -> Result<()> {
    let mut all = schemas();
    if let Some(name) = filter {
        all.retain(|k, _| *k == name);
        if all.is_empty() {
            return Err(diagnostic_error(&ProviderError::UnknownDataSource(
                name.to_string(),
            )));
        }
    }

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    for (name, schema) in &all {
        println!("{}", name.cyan().bold());
        println!("{}", Table::new(schema_rows(schema)));
        println!();
    }
    Ok(())
}

fn print_response(data_source: &str, response: &ReadResponse, output: OutputFormat) -> Result<()> {
    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    if !response.is_present() {
        println!(
            "{}",
            format!("{} not found (missing or not a pull queue)", data_source).yellow()
        );
        return Ok(());
    }

    println!("{} {}", "id:".bold(), response.id);
    println!("{}", Table::new(attribute_rows(&response.state)));

    if let Some(names) = response.state.get("names").and_then(Value::as_array) {
        let rows: Vec<NameRow> = names
            .iter()
            .filter_map(Value::as_str)
            .map(|n| NameRow {
                name: n.to_string(),
            })
            .collect();
        println!();
        println!("{}", format!("{} queue(s)", rows.len()).green().bold());
        if !rows.is_empty() {
            println!("{}", Table::new(rows));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    if let Commands::Schema { data_source } = &cli.command {
        return print_schemas(data_source.as_deref(), cli.output);
    }

    let Some((data_source, config)) = cli.command.read_request() else {
        anyhow::bail!("Command does not read a data source");
    };

    let provider = build_provider(&cli).map_err(|e| diagnostic_error(&e))?;
    let response = provider
        .read_data_source(data_source, &config)
        .await
        .map_err(|e| diagnostic_error(&e))?;

    print_response(data_source, &response, cli.output)
}
