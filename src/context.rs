use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration resolved from CLI arguments and the environment.
pub struct Context {
    pub listen: SocketAddr,
    pub data_dir: PathBuf,
    pub cors_origin: String,
    pub log_file: Option<String>,
    pub reset: bool,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            listen: cli.listen,
            data_dir: PathBuf::from(&cli.data_dir),
            cors_origin: cli.cors_origin.clone(),
            log_file: cli.log_file.clone(),
            reset: cli.reset,
        }
    }
}
