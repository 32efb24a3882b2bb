use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use kf_config::Config;
use kf_domain::{Catalog, Photo};
use kf_search::{
	Cursor, Expression, FormSettings, KeysetPaginator, Mode, QueryParser, SearchContext,
	SearchForm, collection_name, evaluate, lexer,
};

#[derive(Debug, Default, Parser)]
#[command(
	version = kf_cli::VERSION,
	rename_all = "kebab",
	styles = kf_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'p', value_name = "FILE", required_unless_present = "lex")]
	pub photos: Option<PathBuf>,
	/// Full query syntax, e.g. `tag:barn AND -year:1912-`.
	#[arg(long, short = 'q', value_name = "QUERY")]
	pub query: Option<String>,
	/// Plain words, each matched against tags, terms and places.
	#[arg(long, value_name = "WORDS")]
	pub basic: Option<String>,
	#[arg(long, value_name = "TAG")]
	pub tag: Option<String>,
	#[arg(long, value_name = "ID")]
	pub term: Option<u64>,
	#[arg(long, value_name = "YEAR", allow_negative_numbers = true)]
	pub start_year: Option<i32>,
	#[arg(long, value_name = "YEAR", allow_negative_numbers = true)]
	pub end_year: Option<i32>,
	#[arg(long, value_name = "ID")]
	pub donor: Option<u64>,
	#[arg(long, value_name = "CITY")]
	pub city: Option<String>,
	#[arg(long, value_name = "COUNTY")]
	pub county: Option<String>,
	#[arg(long, value_name = "STATE")]
	pub state: Option<String>,
	#[arg(long, value_name = "COUNTRY")]
	pub country: Option<String>,
	/// Query applied on top of every other field, e.g. `collection:<uuid>`.
	#[arg(long, value_name = "QUERY")]
	pub constraint: Option<String>,
	/// User name checked against private collections.
	#[arg(long, value_name = "NAME")]
	pub user: Option<String>,
	/// `after:<year>:<id>` or `before:<year>:<id>`, as printed in a previous report.
	#[arg(long, value_name = "CURSOR")]
	pub cursor: Option<String>,
	/// Print the tokens of `--query` instead of searching.
	#[arg(long)]
	pub lex: bool,
}
impl Args {
	fn form(&self) -> SearchForm {
		SearchForm {
			query: self.query.clone(),
			basic: self.basic.clone(),
			tag: self.tag.clone(),
			term: self.term,
			start_year: self.start_year,
			end_year: self.end_year,
			donor: self.donor,
			city: self.city.clone(),
			county: self.county.clone(),
			state: self.state.clone(),
			country: self.country.clone(),
			constraint: self.constraint.clone(),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct SearchReport {
	pub collection_name: String,
	pub mode: Mode,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub canonical_query: Option<String>,
	pub total: usize,
	pub results: Vec<ResultRow>,
	pub next: Option<String>,
	pub previous: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultRow {
	pub id: u64,
	pub accession_number: String,
	pub year: Option<i32>,
	pub caption: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub score: Option<f64>,
}
impl ResultRow {
	fn new(photo: &Photo, score: Option<f64>) -> Self {
		Self {
			id: photo.id,
			accession_number: photo.accession_number(),
			year: photo.year,
			caption: photo.caption.clone(),
			score,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct LexReport {
	pub tokens: Vec<String>,
	pub formatted: String,
	pub errors: Vec<String>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = kf_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	if args.lex {
		let report = lex(args.query.as_deref().unwrap_or_default());
		let json = serde_json::to_string_pretty(&report)?;

		println!("{json}");

		return Ok(());
	}

	let photos = args.photos.as_ref().ok_or_else(|| eyre::eyre!("--photos is required."))?;
	let catalog = Catalog::load(photos)?;
	let report = search(&config, &catalog, &args)?;
	let json = serde_json::to_string_pretty(&report)?;

	println!("{json}");

	Ok(())
}

pub fn lex(query: &str) -> LexReport {
	let lexed = lexer::lex(query);

	LexReport {
		tokens: lexed.tokens.iter().map(|token| format!("{token:?}")).collect(),
		formatted: lexer::format(&lexed.tokens),
		errors: lexed.errors,
	}
}

pub fn search(config: &Config, catalog: &Catalog, args: &Args) -> color_eyre::Result<SearchReport> {
	let parser = QueryParser::new()?;
	let settings = FormSettings::from_config(&config.search);
	let expression = compile(&args.form(), &parser, &settings)?;
	let ctx = SearchContext::new(catalog)
		.with_user(args.user.as_deref())
		.with_new_cutoff(config.catalog.new_cutoff);
	let cursor = args.cursor.as_deref().map(str::parse::<Cursor>).transpose()?;
	let evaluation = evaluate(expression.as_ref(), &ctx);
	let total = evaluation.ranked.len();
	let mut report = SearchReport {
		collection_name: collection_name(expression.as_ref()),
		mode: evaluation.mode,
		canonical_query: expression.as_ref().map(ToString::to_string),
		total,
		results: Vec::new(),
		next: None,
		previous: None,
	};

	if evaluation.mode == Mode::Search {
		if cursor.is_some() {
			tracing::warn!("Ignoring cursor for a ranked search.");
		}

		report.results = evaluation
			.ranked
			.iter()
			.take(config.search.page_size)
			.map(|ranked| ResultRow::new(ranked.photo, ranked.score))
			.collect();

		return Ok(report);
	}

	let photos = evaluation.photos();
	let page = KeysetPaginator::new(config.search.page_size).page(&photos, cursor.as_ref());

	report.results = page.photos.iter().map(|photo| ResultRow::new(photo, None)).collect();
	report.next = page.next.map(|cursor| cursor.to_string());
	report.previous = page.previous.map(|cursor| cursor.to_string());

	Ok(report)
}

fn compile(
	form: &SearchForm,
	parser: &QueryParser,
	settings: &FormSettings,
) -> color_eyre::Result<Option<Expression>> {
	match form.expression(parser, settings) {
		Ok(expression) => {
			tracing::info!(
				query = %expression,
				complexity = expression.complexity(),
				"Compiled search form."
			);

			Ok(Some(expression))
		},
		Err(err) if err.is_no_expression() => Ok(None),
		Err(err) => Err(err.into()),
	}
}
