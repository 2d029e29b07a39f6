use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve a GraphQL-style query API over the seeded US states collection",
    long_about = "A small daemon that seeds a SQLite collection of US states and territories and answers prefix-filtered states queries over HTTP.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "listen",
        env = "STATEQL_API_LISTEN",
        default_value = "127.0.0.1:8080",
        value_name = "ADDR",
        help = "GraphQL API listen address (host:port)"
    )]
    pub listen: std::net::SocketAddr,

    #[arg(
        long,
        default_value = ".stateql/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "cors-origin",
        env = "STATEQL_CORS_ORIGIN",
        default_value = "http://localhost:4200",
        value_name = "ORIGIN",
        help = "Browser origin allowed to call the API"
    )]
    pub cors_origin: String,

    #[arg(
        long = "log-file",
        env = "STATEQL_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
