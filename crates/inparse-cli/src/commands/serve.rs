//! Serve command - run the HTTP upload endpoint.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use inparse_core::InparseConfig;

use super::{load_config, resolve_model_dir};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory of static files to serve alongside the API
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    config.server.apply_env();
    apply_args(&mut config, args);

    println!(
        "{} Listening on {}:{} (models in {})",
        style("ℹ").blue(),
        config.server.host,
        config.server.port,
        config.models.model_dir.display()
    );

    inparse_server::serve(&config).await
}

/// Command line flags win over the environment and the config file.
fn apply_args(config: &mut InparseConfig, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = Some(dir);
    }
    config.models.model_dir = resolve_model_dir(config, args.model_dir);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(port: Option<u16>) -> ServeArgs {
        ServeArgs {
            host: None,
            port,
            static_dir: None,
            model_dir: Some(PathBuf::from("/opt/models")),
        }
    }

    #[test]
    fn test_port_precedence() {
        let mut config = InparseConfig::default();
        config.server.port = 4000;

        config.server.apply_port_override(Some("5000"));
        assert_eq!(config.server.port, 5000);

        apply_args(&mut config, args(Some(6000)));
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.models.model_dir, PathBuf::from("/opt/models"));
    }

    #[test]
    fn test_config_port_kept_without_overrides() {
        let mut config = InparseConfig::default();
        config.server.port = 4000;

        config.server.apply_port_override(None);
        apply_args(&mut config, args(None));
        assert_eq!(config.server.port, 4000);
    }
}
