//! Layered configuration: built-in defaults, then an optional file, then
//! `CHAPTER_*` environment variables.

use std::{collections::HashMap, path::Path};

use config::{Config, ConfigError, Environment, File};

use crate::ServerConfig;

/// Load a [`ServerConfig`] from the process environment.
///
/// `CHAPTER_ALLOWED_ORIGINS` is a comma-separated list. A missing config file
/// is not an error.
pub fn load(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
  load_with_env(path, None)
}

/// As [`load`], reading `CHAPTER_*` variables from `env` instead of the
/// process environment when it is `Some`.
pub fn load_with_env(
  path: Option<&Path>,
  env: Option<HashMap<String, String>>,
) -> Result<ServerConfig, ConfigError> {
  let mut builder = Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000)?
    .set_default("store_path", "chapter.db")?
    .set_default("allowed_origins", vec![
      "http://localhost:5173",
      "http://localhost:5000",
    ])?;

  if let Some(path) = path {
    builder = builder.add_source(File::from(path).required(false));
  }

  builder
    .add_source(
      Environment::with_prefix("CHAPTER")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("allowed_origins")
        .source(env),
    )
    .build()?
    .try_deserialize()
}
