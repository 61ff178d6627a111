//! Layered settings: defaults < config file < `BISTRO_*` environment <
//! command-line flags.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(name = "bistro", version, about = "Terminal editor for the restaurant database")]
pub struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// SQLite database file (default: restaurant_db.sqlite).
  #[arg(long, value_name = "FILE")]
  pub db: Option<PathBuf>,

  /// Create any missing restaurant tables before starting.
  #[arg(long)]
  pub init_schema: bool,

  /// Where to write logs; the terminal belongs to the editor.
  #[arg(long, value_name = "FILE")]
  pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
  pub database:    PathBuf,
  pub log_file:    PathBuf,
  pub init_schema: bool,
}

impl Settings {
  pub fn load(args: &Args) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("database", "restaurant_db.sqlite")?
      .set_default("log_file", "bistro.log")?
      .set_default("init_schema", false)?;

    if let Some(path) = &args.config {
      builder = builder.add_source(config::File::from(path.clone()).required(true));
    }

    let settings = builder
      .add_source(config::Environment::with_prefix("BISTRO"))
      .set_override_option("database", args.db.as_ref().map(|p| p.display().to_string()))?
      .set_override_option("log_file", args.log_file.as_ref().map(|p| p.display().to_string()))?
      .set_override_option("init_schema", args.init_schema.then_some(true))?
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn defaults_apply_without_sources() {
    let settings = Settings::load(&Args::default()).unwrap();
    assert_eq!(settings.database, PathBuf::from("restaurant_db.sqlite"));
    assert_eq!(settings.log_file, PathBuf::from("bistro.log"));
    assert!(!settings.init_schema);
  }

  #[test]
  fn flags_override_config_file() {
    let path = std::env::temp_dir().join(format!("bistro-settings-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "database = \"from_file.sqlite\"\nlog_file = \"file.log\"").unwrap();

    let args = Args {
      config: Some(path.clone()),
      db: Some(PathBuf::from("from_flag.sqlite")),
      init_schema: true,
      ..Args::default()
    };
    let settings = Settings::load(&args).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.database, PathBuf::from("from_flag.sqlite"));
    assert_eq!(settings.log_file, PathBuf::from("file.log"));
    assert!(settings.init_schema);
  }

  #[test]
  fn missing_config_file_is_an_error() {
    let args = Args { config: Some(PathBuf::from("/nonexistent/bistro.toml")), ..Args::default() };
    assert!(Settings::load(&args).is_err());
  }
}
