//! Command line interface

use std::path::PathBuf;

use bootwire_infrastructure::ConfigLoader;
use clap::Parser;

/// Command line interface for bootwire
#[derive(Parser, Debug)]
#[command(name = "bootwire")]
#[command(about = "Boot a dependency graph from linked components and configuration")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set a configuration property (repeatable), e.g. `-D scanning=off`
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// Keep the graph alive until Ctrl-C
    #[arg(long)]
    pub wait: bool,

    /// Invocation arguments exposed to the graph
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Configuration loader honouring `--config` and every `-D`
    pub fn loader(&self) -> ConfigLoader {
        let loader = match &self.config {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        };
        loader.with_properties(self.defines.iter().cloned())
    }
}

/// Parse `KEY=VALUE`; the value may be empty or contain `=`
pub fn parse_define(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
