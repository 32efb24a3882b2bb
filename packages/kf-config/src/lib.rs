mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.search.complexity_limit == 0 {
		return Err(Error::Validation {
			message: "search.complexity_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.page_size == 0 {
		return Err(Error::Validation {
			message: "search.page_size must be greater than zero.".to_string(),
		});
	}

	for word in &cfg.search.stopwords {
		if word.chars().any(char::is_whitespace) {
			return Err(Error::Validation {
				message: format!("search.stopwords entry '{word}' must be a single word."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = types::default_log_level();
	}

	cfg.search.stopwords = cfg
		.search
		.stopwords
		.iter()
		.map(|word| word.trim().to_lowercase())
		.filter(|word| !word.is_empty())
		.collect();

	cfg.search.stopwords.sort();
	cfg.search.stopwords.dedup();
}
