//! Management CLI for the clinic website client.
//!
//! Resolves URLs the way the website would for a given page location,
//! calls backend endpoints with the same retry/CSRF behavior, and runs the
//! form validators from the shell.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::Method;
use url::Url;

use clinic_client::config::{load_config, ClinicConfig, PageLocation};
use clinic_client::http::{ApiClient, RequestOptions};
use clinic_client::observability::logging;
use clinic_client::security::{is_valid_email, is_valid_phone, sanitize_input};

#[derive(Parser)]
#[command(name = "clinic-client")]
#[command(about = "Clinic website API client", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the page the client pretends to run on.
    #[arg(short, long, default_value = "http://localhost/")]
    page_url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected environment and base URLs
    Urls,
    /// Print the full URL of a named endpoint
    Endpoint { name: String },
    /// Call an endpoint and print the JSON response
    Send {
        endpoint: String,
        /// HTTP method (default POST)
        #[arg(short, long)]
        method: Option<Method>,
        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Fetch a CSRF token
    Token,
    /// Check an email address
    CheckEmail { value: String },
    /// Check a phone number
    CheckPhone { value: String },
    /// Sanitize free-text input
    Sanitize { value: String },
    /// Show clinic contact information
    Info,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClinicConfig::default(),
    };
    logging::init_logging(&config.observability.log_level);

    let location = PageLocation::from_url(&cli.page_url);
    let client = ApiClient::new(Arc::new(config), &location)?;

    match cli.command {
        Commands::Urls => {
            println!("environment: {}", client.environment());
            println!("backend:     {}", client.backend_url());
            println!("frontend:    {}", client.frontend_url());
        }
        Commands::Endpoint { name } => match client.api_url(&name) {
            Some(url) => println!("{}", url),
            None => return Err(format!("Unknown API endpoint: {}", name).into()),
        },
        Commands::Send {
            endpoint,
            method,
            data,
        } => {
            let mut options = RequestOptions::new();
            if let Some(method) = method {
                options = options.method(method);
            }
            if let Some(data) = data {
                options = options.body(serde_json::from_str(&data)?);
            }
            let response = client.send(&endpoint, options).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Token => match client.csrf_token().await {
            Some(token) => println!("{}", token),
            None => return Err("No CSRF token available".into()),
        },
        Commands::CheckEmail { value } => print_check(is_valid_email(&value)),
        Commands::CheckPhone { value } => print_check(is_valid_phone(&value)),
        Commands::Sanitize { value } => println!("{}", sanitize_input(&value)),
        Commands::Info => {
            let info = &client.config().clinic_info;
            println!("{}", info.name);
            println!("phone:   {}", info.phone);
            println!("email:   {}", info.email);
            println!("address: {}", info.address);
            println!("website: {}", info.website);
        }
    }

    Ok(())
}

fn print_check(valid: bool) {
    println!("{}", if valid { "valid" } else { "invalid" });
}
