//! Recursive-descent parsers from lexer tokens to [`Expression`] trees.
//!
//! ```text
//! expr       := orExpr ( '|' orExpr )*
//! orExpr     := andExpr ( 'OR'? andExpr )*
//! andExpr    := simpleExpr ( 'AND' simpleExpr )*
//! simpleExpr := '-' simpleExpr | atom | '(' expr ')'
//! ```

use regex::Regex;
use uuid::Uuid;

use kf_domain::accession;

use crate::{
	Error, Result,
	expression::{Expression, Value},
	lexer::{self, Keyword, Token},
};

const YEAR_PATTERN: &str = r"^(?P<start>-?\d+)(?:(?P<plus>\+)|(?P<dash>-)(?P<end>-?\d+)?)?$";
const ACCESSION_PATTERN: &str = r"^FI\d+$";
/// Parentheses and negations that may enclose a single term.
const MAX_NESTING: usize = 256;

/// Parser for the full query language. Build it once and share it.
#[derive(Clone, Debug)]
pub struct QueryParser {
	year: Regex,
	accession: Regex,
}
impl QueryParser {
	pub fn new() -> Result<Self> {
		let compile = |pattern| Regex::new(pattern).map_err(|err| Error::Pattern { source: err });

		Ok(Self { year: compile(YEAR_PATTERN)?, accession: compile(ACCESSION_PATTERN)? })
	}

	pub fn parse(&self, query: &str) -> Result<Expression> {
		self.parse_tokens(&lexer::lex(query).tokens)
	}

	pub fn parse_tokens(&self, tokens: &[Token]) -> Result<Expression> {
		let items = self.items(tokens);

		if !items.iter().any(|(_, item)| matches!(item, Item::Atom(_))) {
			return Err(Error::NoExpression);
		}

		let mut stream = Stream { items: &items, pos: 0, depth: 0, nesting: 0 };
		let expression = stream.expr()?;

		match stream.peek() {
			None => Ok(expression),
			Some((index, Item::Close)) => Err(Error::UnexpectedParenthesis { index }),
			Some((index, _)) => Err(Error::UnexpectedToken { index }),
		}
	}

	/// Lenient fallback: ORs together every atom, negated or not, and ignores the rest.
	pub fn simple_parse(&self, tokens: &[Token]) -> Result<Expression> {
		let mut negations = 0;
		let mut found: Option<Expression> = None;

		for (_, item) in self.items(tokens) {
			match item {
				Item::Negate => {
					negations += 1;

					continue;
				},
				Item::Atom(atom) => {
					// Runs longer than the nesting cap keep their parity.
					let count = if negations > MAX_NESTING {
						MAX_NESTING - negations % 2
					} else {
						negations
					};
					let atom = negate_times(atom, count);

					found = Some(match found {
						Some(previous) => Expression::or(previous, atom),
						None => atom,
					});
				},
				_ => {},
			}

			negations = 0;
		}

		found.ok_or(Error::NoExpression)
	}

	/// Meaningful tokens paired with their index in the lexer output.
	fn items(&self, tokens: &[Token]) -> Vec<(usize, Item)> {
		tokens
			.iter()
			.enumerate()
			.filter_map(|(index, token)| {
				let item = match token {
					Token::SearchTerm(word) | Token::UnmatchedSearchTermQuote(word) =>
						Item::Atom(self.bare_word(word)?),
					Token::TypedSearchTerm { field, value } => Item::Atom(self.typed(field, value)?),
					Token::Keyword(keyword) => Item::Keyword(*keyword),
					Token::OpenParen => Item::Open,
					Token::CloseParen => Item::Close,
					Token::Negate => Item::Negate,
					Token::EmptyQuotedString | Token::MissingField => return None,
				};

				Some((index, item))
			})
			.collect()
	}

	fn typed(&self, field: &str, value: &str) -> Option<Expression> {
		if value.is_empty() {
			return None;
		}

		self.field_value(field, value)
			.map(Expression::Atom)
			.or_else(|| self.bare_word(&format!("{field}:{value}")))
	}

	fn field_value(&self, field: &str, value: &str) -> Option<Value> {
		let value = match field.to_lowercase().as_str() {
			"tag" => Value::tag(value),
			"tag_exact" => Value::tag_exactly(value),
			"term" => Value::term(value),
			"term_exact" => Value::TermExactly(value.parse().ok()?),
			"contributor" => Value::donor(value),
			"contributor_exact" => Value::DonorExactly(value.parse().ok()?),
			"photographer_exact" => Value::PhotographerExactly(value.parse().ok()?),
			"city" => Value::City(value.to_string()),
			"county" => Value::County(value.to_string()),
			"state" => Value::State(value.to_string()),
			"country" => Value::Country(value.to_string()),
			"caption" => Value::caption(value),
			"is_new" => Value::IsNew(value.to_lowercase().parse().ok()?),
			"collection" => Value::Collection(Uuid::parse_str(value).ok()?),
			"year" => self.year(value)?,
			_ => return None,
		};

		Some(value)
	}

	fn year(&self, value: &str) -> Option<Value> {
		let captures = self.year.captures(value)?;
		let start = captures.name("start")?.as_str().parse().ok()?;

		if captures.name("plus").is_some() {
			return Some(Value::YearGte(start));
		}
		if captures.name("dash").is_none() {
			return Some(Value::YearEquals(start));
		}

		match captures.name("end") {
			Some(end) => Some(Value::YearRange(start, end.as_str().parse().ok()?)),
			None => Some(Value::YearLte(start)),
		}
	}

	/// An untyped word searches every text field, and the year when it is a number.
	fn bare_word(&self, word: &str) -> Option<Expression> {
		if word.is_empty() {
			return None;
		}
		if self.accession.is_match(word)
			&& let Ok(id) = accession::accession_to_id(word)
		{
			return Some(Value::AccessionNumber(id).into());
		}

		let fields = [
			Value::donor(word),
			Value::caption(word),
			Value::State(word.to_string()),
			Value::Country(word.to_string()),
			Value::County(word.to_string()),
			Value::City(word.to_string()),
			Value::tag(word),
			Value::term(word),
		];
		let mut chain = fields.into_iter().rev().map(Expression::Atom);
		let last = chain.next()?;
		let expression = chain.fold(last, |tail, head| Expression::or(head, tail));

		match parse_number(word) {
			Some(year) => Some(Expression::or(Expression::year_equals(year), expression)),
			None => Some(expression),
		}
	}
}

/// Parser for the quick-search box: whitespace, hyphens and parentheses split words, and
/// every word must match somewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicParser;
impl BasicParser {
	pub fn parse(&self, query: &str) -> Result<Expression> {
		query
			.split(|ch: char| ch.is_whitespace() || matches!(ch, '-' | '(' | ')'))
			.filter(|word| !word.is_empty())
			.map(collection_expr)
			.reduce(Expression::and)
			.ok_or(Error::NoExpression)
	}
}

/// One word matched against the structured fields, ranked by the best of them.
pub fn collection_expr(word: &str) -> Expression {
	let expression = Expression::maximum(
		Expression::tag(word),
		Expression::maximum(
			Expression::term(word),
			Expression::maximum(
				Expression::city(word),
				Expression::maximum(
					Expression::state(word),
					Expression::maximum(
						Expression::country(word),
						Expression::county(word),
					),
				),
			),
		),
	);

	match parse_number(word) {
		Some(year) => Expression::maximum(Expression::year_equals(year), expression),
		None => expression,
	}
}

fn negate_times(expression: Expression, count: usize) -> Expression {
	(0..count).fold(expression, |inner, _| Expression::negate(inner))
}

fn parse_number(word: &str) -> Option<i32> {
	if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	word.parse().ok()
}

#[derive(Clone, Debug)]
enum Item {
	Atom(Expression),
	Keyword(Keyword),
	Open,
	Close,
	Negate,
}

struct Stream<'a> {
	items: &'a [(usize, Item)],
	pos: usize,
	/// Open parentheses.
	depth: usize,
	/// Open parentheses plus pending negations.
	nesting: usize,
}
impl<'a> Stream<'a> {
	fn peek(&self) -> Option<(usize, &'a Item)> {
		self.items.get(self.pos).map(|(index, item)| (*index, item))
	}

	fn next_is_keyword(&self, keyword: Keyword) -> bool {
		matches!(self.peek(), Some((_, Item::Keyword(next))) if *next == keyword)
	}

	fn expr(&mut self) -> Result<Expression> {
		let mut expression = self.or_expr()?;

		while self.next_is_keyword(Keyword::Maximum) {
			self.pos += 1;
			expression = Expression::maximum(expression, self.or_expr()?);
		}

		Ok(expression)
	}

	fn or_expr(&mut self) -> Result<Expression> {
		let mut expression = self.and_expr()?;

		loop {
			if self.next_is_keyword(Keyword::Or) {
				self.pos += 1;
			} else if !matches!(self.peek(), Some((_, Item::Atom(_) | Item::Open | Item::Negate))) {
				break;
			}

			expression = Expression::or(expression, self.and_expr()?);
		}

		Ok(expression)
	}

	fn and_expr(&mut self) -> Result<Expression> {
		let mut expression = self.simple_expr()?;

		while self.next_is_keyword(Keyword::And) {
			self.pos += 1;
			expression = Expression::and(expression, self.simple_expr()?);
		}

		Ok(expression)
	}

	fn simple_expr(&mut self) -> Result<Expression> {
		let Some((index, item)) = self.peek() else {
			return Err(if self.depth > 0 { Error::ExpectedParenthesis } else { Error::UnexpectedEnd });
		};

		match item {
			Item::Atom(atom) => {
				let atom = atom.clone();

				self.pos += 1;

				Ok(atom)
			},
			Item::Negate => {
				let mut negations = 0;

				while let Some((index, Item::Negate)) = self.peek() {
					if self.nesting + negations >= MAX_NESTING {
						return Err(Error::NestingTooDeep { index });
					}

					negations += 1;
					self.pos += 1;
				}

				self.nesting += negations;

				let inner = self.simple_expr()?;

				self.nesting -= negations;

				Ok(negate_times(inner, negations))
			},
			Item::Open => {
				if self.nesting >= MAX_NESTING {
					return Err(Error::NestingTooDeep { index });
				}

				self.pos += 1;
				self.depth += 1;
				self.nesting += 1;

				let inner = self.expr()?;

				match self.peek() {
					Some((_, Item::Close)) => {
						self.pos += 1;
						self.depth -= 1;
						self.nesting -= 1;

						Ok(inner)
					},
					Some((index, _)) => Err(Error::UnexpectedToken { index }),
					None => Err(Error::ExpectedParenthesis),
				}
			},
			Item::Close => Err(Error::UnexpectedParenthesis { index }),
			Item::Keyword(_) => Err(Error::UnexpectedToken { index }),
		}
	}
}
