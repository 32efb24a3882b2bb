use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use kf_config::Error;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_search(key: &str, value: Value) -> String {
	let mut value_root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value_root.as_table_mut().expect("Template config must be a table.");
	let search = root
		.get_mut("search")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [search].");

	search.insert(key.to_string(), value);

	toml::to_string(&value_root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("kf_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> kf_config::Result<kf_config::Config> {
	let path = write_temp_config(payload);
	let result = kf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config must be valid.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.search.complexity_limit, 60);
	assert_eq!(cfg.search.page_size, 50);
	assert!(cfg.search.stopwords.is_empty());

	let cutoff = cfg.catalog.new_cutoff.expect("Sample config sets a new cutoff.");

	assert_eq!(cutoff.year(), 1995);
}

#[test]
fn search_defaults_apply_when_keys_are_missing() {
	let cfg = load_payload("[service]\n\n[search]\n".to_string())
		.expect("Minimal config must be valid.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.search.complexity_limit, 60);
	assert_eq!(cfg.search.page_size, 50);
	assert!(cfg.catalog.new_cutoff.is_none());
}

#[test]
fn complexity_limit_must_be_positive() {
	let err = load_payload(sample_toml_with_search("complexity_limit", Value::Integer(0)))
		.expect_err("Expected complexity_limit validation error.");
	let message = err.to_string();

	assert!(
		message.contains("search.complexity_limit must be greater than zero."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn page_size_must_be_positive() {
	let err = load_payload(sample_toml_with_search("page_size", Value::Integer(0)))
		.expect_err("Expected page_size validation error.");

	assert!(err.to_string().contains("search.page_size must be greater than zero."));
}

#[test]
fn stopwords_are_normalized() {
	let words = Value::Array(vec![
		Value::String(" Photo ".to_string()),
		Value::String("photo".to_string()),
		Value::String("".to_string()),
		Value::String("Image".to_string()),
	]);
	let cfg = load_payload(sample_toml_with_search("stopwords", words))
		.expect("Stopword list must be valid.");

	assert_eq!(cfg.search.stopwords, vec!["image".to_string(), "photo".to_string()]);
}

#[test]
fn stopwords_must_be_single_words() {
	let words = Value::Array(vec![Value::String("old photo".to_string())]);
	let err = load_payload(sample_toml_with_search("stopwords", words))
		.expect_err("Expected stopword validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(err.to_string().contains("'old photo'"));
}

#[test]
fn invalid_toml_reports_parse_error() {
	let err = load_payload("[service\nlog_level = 1".to_string())
		.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("kf_config_test_does_not_exist.toml");

	let err = kf_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
