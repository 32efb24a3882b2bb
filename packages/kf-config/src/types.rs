use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	#[serde(default)]
	pub catalog: Catalog,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Expressions with more atoms than this are dropped instead of evaluated.
	#[serde(default = "default_complexity_limit")]
	pub complexity_limit: usize,
	#[serde(default = "default_page_size")]
	pub page_size: usize,
	/// Appended to the built-in stop-word list used when shaking out caption atoms.
	#[serde(default)]
	pub stopwords: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
	/// Photos created at or after this instant count as new. Unset means every photo is new.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub new_cutoff: Option<OffsetDateTime>,
}

pub(crate) fn default_log_level() -> String {
	"info".to_string()
}

fn default_complexity_limit() -> usize {
	60
}

fn default_page_size() -> usize {
	50
}
