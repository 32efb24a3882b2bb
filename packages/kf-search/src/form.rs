use serde::Deserialize;

use kf_domain::stopwords::Stopwords;

use crate::{
	Error, Result,
	expression::{Expression, Value},
	lexer,
	parser::{BasicParser, QueryParser},
};

/// Limits applied while compiling a form.
#[derive(Clone, Debug)]
pub struct FormSettings {
	pub complexity_limit: usize,
	pub stopwords: Stopwords,
}
impl FormSettings {
	pub fn from_config(search: &kf_config::Search) -> Self {
		Self {
			complexity_limit: search.complexity_limit,
			stopwords: Stopwords::new(&search.stopwords),
		}
	}
}

/// The structured search fields. Each filled-in field adds one fragment, and fragments are
/// AND-ed in field order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
	pub query: Option<String>,
	pub basic: Option<String>,
	pub tag: Option<String>,
	pub term: Option<u64>,
	pub start_year: Option<i32>,
	pub end_year: Option<i32>,
	pub donor: Option<u64>,
	pub city: Option<String>,
	pub county: Option<String>,
	pub state: Option<String>,
	pub country: Option<String>,
	/// Query that always applies on top of the fields, such as `collection:<uuid>`.
	pub constraint: Option<String>,
}
impl SearchForm {
	/// Returns [`Error::NoExpression`] when nothing in the form filters photos.
	pub fn expression(&self, parser: &QueryParser, settings: &FormSettings) -> Result<Expression> {
		let constraint = self.constraint(parser)?;
		let fields = self.fields(parser, settings).filter(|expression| {
			let complexity = expression.complexity();

			if complexity > settings.complexity_limit {
				tracing::warn!(
					complexity,
					limit = settings.complexity_limit,
					"Dropping search expression over the complexity limit."
				);

				return false;
			}

			true
		});

		match (fields, constraint) {
			(Some(fields), Some(constraint)) => Ok(Expression::and(fields, constraint)),
			(Some(expression), None) | (None, Some(expression)) => Ok(expression),
			(None, None) => Err(Error::NoExpression),
		}
	}

	fn fields(&self, parser: &QueryParser, settings: &FormSettings) -> Option<Expression> {
		let mut parts = Vec::new();

		if let Some(query) = non_empty(&self.query) {
			parts.extend(compile_query(parser, query, &settings.stopwords));
		}
		if let Some(basic) = non_empty(&self.basic) {
			parts.extend(BasicParser.parse(basic).ok());
		}
		if let Some(term) = self.term {
			parts.push(Value::TermExactly(term).into());
		}
		if let Some(tag) = non_empty(&self.tag) {
			parts.push(Value::tag_exactly(tag).into());
		}
		if let Some(start) = self.start_year {
			parts.push(Expression::year_gte(start));
		}
		if let Some(end) = self.end_year {
			parts.push(Expression::year_lte(end));
		}
		if let Some(donor) = self.donor {
			parts.push(Value::DonorExactly(donor).into());
		}

		let places = [
			(&self.city, Expression::city as fn(&str) -> Expression),
			(&self.county, Expression::county),
			(&self.state, Expression::state),
			(&self.country, Expression::country),
		];

		for (field, build) in places {
			if let Some(value) = non_empty(field) {
				parts.push(build(value));
			}
		}

		parts.into_iter().reduce(Expression::and)
	}

	fn constraint(&self, parser: &QueryParser) -> Result<Option<Expression>> {
		let Some(constraint) = non_empty(&self.constraint) else {
			return Ok(None);
		};

		parser.parse(constraint).map(Some).map_err(|err| Error::InvalidConstraint {
			constraint: constraint.to_string(),
			source: Box::new(err),
		})
	}
}

/// Strict parse first, then the lenient one. Stop-word captions are removed either way.
fn compile_query(parser: &QueryParser, query: &str, stopwords: &Stopwords) -> Option<Expression> {
	let lexed = lexer::lex(query);

	if !lexed.errors.is_empty() {
		tracing::debug!(errors = ?lexed.errors, "Query has lexical errors.");
	}

	match parser.parse_tokens(&lexed.tokens) {
		Ok(expression) => expression.shakeout(stopwords),
		Err(err) if err.is_no_expression() => None,
		Err(err) => {
			tracing::debug!(error = %err, "Falling back to lenient query parsing.");

			parser.simple_parse(&lexed.tokens).ok()?.shakeout(stopwords)
		},
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
