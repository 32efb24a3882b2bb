//! Query-string lexer.
//!
//! Lexing never fails. Malformed input is turned into the closest sensible token and a
//! human-readable message is recorded alongside, with 1-indexed character positions.

use std::fmt::{Display, Formatter};

const ESCAPABLE: [char; 9] = ['\\', ' ', '\t', '\r', '\n', '"', '(', ')', ':'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
	And,
	Or,
	Maximum,
}
impl Keyword {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::And => "AND",
			Self::Or => "OR",
			Self::Maximum => "|",
		}
	}

	fn from_word(word: &str) -> Option<Self> {
		match word {
			"AND" => Some(Self::And),
			"OR" => Some(Self::Or),
			"|" => Some(Self::Maximum),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
	SearchTerm(String),
	TypedSearchTerm { field: String, value: String },
	Keyword(Keyword),
	OpenParen,
	CloseParen,
	Negate,
	UnmatchedSearchTermQuote(String),
	EmptyQuotedString,
	MissingField,
}
impl Token {
	pub fn typed(field: impl Into<String>, value: impl Into<String>) -> Self {
		Self::TypedSearchTerm { field: field.into(), value: value.into() }
	}
}
impl Display for Token {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::SearchTerm(value) if is_plain_word(value) => f.write_str(value),
			Self::SearchTerm(value) => write_quoted(f, value),
			Self::TypedSearchTerm { field, value } => {
				for ch in field.chars() {
					if ESCAPABLE.contains(&ch) {
						f.write_str("\\")?;
					}

					write!(f, "{ch}")?;
				}

				f.write_str(":")?;

				if !value.is_empty() && !value.chars().any(needs_escape) {
					f.write_str(value)
				} else {
					write_quoted(f, value)
				}
			},
			Self::Keyword(keyword) => f.write_str(keyword.as_str()),
			Self::OpenParen => f.write_str("("),
			Self::CloseParen => f.write_str(")"),
			Self::Negate => f.write_str("-"),
			Self::UnmatchedSearchTermQuote(value) => {
				f.write_str("\"")?;

				write_escaped(f, value)
			},
			Self::EmptyQuotedString => f.write_str("\"\""),
			Self::MissingField => f.write_str(":"),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lexed {
	pub tokens: Vec<Token>,
	pub errors: Vec<String>,
}

pub fn lex(input: &str) -> Lexed {
	let mut scanner = Scanner { chars: input.chars().collect(), pos: 0, lexed: Lexed::default() };

	scanner.run();

	scanner.lexed
}

/// Renders tokens back to query text that lexes to the same tokens.
pub fn format(tokens: &[Token]) -> String {
	let mut out = String::new();
	let mut glue = true;

	for token in tokens {
		if !glue {
			out.push(' ');
		}

		out.push_str(&token.to_string());

		glue = matches!(token, Token::Negate);
	}

	// A keyword only lexes as one when whitespace follows it.
	if matches!(tokens.last(), Some(Token::Keyword(_))) {
		out.push(' ');
	}

	out
}

struct Scanner {
	chars: Vec<char>,
	pos: usize,
	lexed: Lexed,
}
impl Scanner {
	fn run(&mut self) {
		while let Some(ch) = self.peek() {
			match ch {
				ch if ch.is_whitespace() => self.pos += 1,
				'(' => self.single(Token::OpenParen),
				')' => self.single(Token::CloseParen),
				'-' if self.peek_at(1).is_some_and(|next| !next.is_whitespace()) => {
					self.single(Token::Negate);
				},
				'"' => self.quoted_term(),
				':' => {
					self.error(format!(
						"Colon (:) with no field preceding it at index {}",
						self.pos + 1
					));
					self.single(Token::MissingField);
				},
				_ => self.word_or_field(),
			}
		}
	}

	fn peek(&self) -> Option<char> {
		self.peek_at(0)
	}

	fn peek_at(&self, offset: usize) -> Option<char> {
		self.chars.get(self.pos + offset).copied()
	}

	fn single(&mut self, token: Token) {
		self.pos += 1;
		self.lexed.tokens.push(token);
	}

	fn error(&mut self, message: String) {
		self.lexed.errors.push(message);
	}

	fn quoted_term(&mut self) {
		let start = self.pos;

		self.pos += 1;

		let (value, closed) = self.read_quoted();

		if !closed {
			self.error(format!("Unmatched quote at index {}", start + 1));
			self.lexed.tokens.push(Token::UnmatchedSearchTermQuote(value));
		} else if value.is_empty() {
			self.error(format!("Quoted sequence with nothing in it at index {}", start + 1));
			self.lexed.tokens.push(Token::EmptyQuotedString);
		} else {
			self.lexed.tokens.push(Token::SearchTerm(value));
		}
	}

	fn word_or_field(&mut self) {
		let (word, escaped) = self.read_bare();

		if self.peek() == Some(':') {
			self.pos += 1;

			let value = self.typed_value();

			self.lexed.tokens.push(Token::TypedSearchTerm { field: word, value });

			return;
		}

		let keyword = if escaped { None } else { Keyword::from_word(&word) };
		let separated = self.peek().is_some_and(char::is_whitespace);

		match keyword {
			Some(keyword) if separated => self.lexed.tokens.push(Token::Keyword(keyword)),
			_ => self.lexed.tokens.push(Token::SearchTerm(word)),
		}
	}

	fn typed_value(&mut self) -> String {
		match self.peek() {
			Some('"') => {
				let start = self.pos;

				self.pos += 1;

				let (value, closed) = self.read_quoted();

				if !closed {
					self.error(format!("Unmatched quote at index {}", start + 1));
				}

				value
			},
			Some(ch) if !ends_word(ch) => self.read_bare().0,
			_ => String::new(),
		}
	}

	/// Reads a bare word. The flag reports whether any escape sequence was used.
	fn read_bare(&mut self) -> (String, bool) {
		let mut text = String::new();
		let mut escaped = false;

		while let Some(ch) = self.peek() {
			if ch == '\\' {
				escaped = true;

				self.escape(&mut text);
			} else if ends_word(ch) {
				break;
			} else {
				text.push(ch);

				self.pos += 1;
			}
		}

		(text, escaped)
	}

	/// Reads up to and including the closing quote. The flag is false when input ran out first.
	fn read_quoted(&mut self) -> (String, bool) {
		let mut text = String::new();

		while let Some(ch) = self.peek() {
			match ch {
				'"' => {
					self.pos += 1;

					return (text, true);
				},
				'\\' => self.escape(&mut text),
				ch => {
					text.push(ch);

					self.pos += 1;
				},
			}
		}

		(text, false)
	}

	fn escape(&mut self, text: &mut String) {
		let at = self.pos;

		self.pos += 1;

		match self.peek() {
			Some(next) if ESCAPABLE.contains(&next) => {
				text.push(next);

				self.pos += 1;
			},
			_ => {
				self.error(format!("Backslash with nothing to escape at index {}", at + 1));
				text.push('\\');
			},
		}
	}
}

fn ends_word(ch: char) -> bool {
	ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ':')
}

fn needs_escape(ch: char) -> bool {
	ch == '\\' || ends_word(ch)
}

fn is_plain_word(value: &str) -> bool {
	!value.is_empty()
		&& !value.starts_with('-')
		&& Keyword::from_word(value).is_none()
		&& !value.chars().any(needs_escape)
}

fn write_quoted(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
	f.write_str("\"")?;
	write_escaped(f, value)?;
	f.write_str("\"")
}

fn write_escaped(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
	for ch in value.chars() {
		if matches!(ch, '\\' | '"') {
			f.write_str("\\")?;
		}

		write!(f, "{ch}")?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::lexer::{Keyword, Token, format, lex};

	fn tokens(input: &str) -> Vec<Token> {
		lex(input).tokens
	}

	#[test]
	fn keywords_need_trailing_whitespace() {
		assert_eq!(tokens("ORANGE"), vec![Token::SearchTerm("ORANGE".into())]);
		assert_eq!(tokens("OR"), vec![Token::SearchTerm("OR".into())]);
		assert_eq!(
			tokens("a OR b"),
			vec![
				Token::SearchTerm("a".into()),
				Token::Keyword(Keyword::Or),
				Token::SearchTerm("b".into()),
			]
		);
		assert_eq!(tokens("and "), vec![Token::SearchTerm("and".into())]);
		assert_eq!(tokens("AND("), vec![Token::SearchTerm("AND".into()), Token::OpenParen]);
	}

	#[test]
	fn hyphen_negates_only_when_attached() {
		assert_eq!(tokens("-dog"), vec![Token::Negate, Token::SearchTerm("dog".into())]);
		assert_eq!(tokens("- dog"), vec![
			Token::SearchTerm("-".into()),
			Token::SearchTerm("dog".into())
		]);
		assert_eq!(tokens("x-ray"), vec![Token::SearchTerm("x-ray".into())]);
	}

	#[test]
	fn typed_values_may_be_quoted_or_empty() {
		assert_eq!(tokens("city:\"Black Hawk\""), vec![Token::typed("city", "Black Hawk")]);
		assert_eq!(tokens("year:1912-"), vec![Token::typed("year", "1912-")]);
		assert_eq!(tokens("tag: dog"), vec![
			Token::typed("tag", ""),
			Token::SearchTerm("dog".into())
		]);
	}

	#[test]
	fn stray_backslash_is_kept_literally() {
		let lexed = lex("a\\b");

		assert_eq!(lexed.tokens, vec![Token::SearchTerm("a\\b".into())]);
		assert_eq!(lexed.errors, vec!["Backslash with nothing to escape at index 2".to_string()]);
	}

	#[test]
	fn format_quotes_words_that_would_lex_differently() {
		assert_eq!(format(&[Token::SearchTerm("AND".into())]), "\"AND\"");
		assert_eq!(format(&[Token::SearchTerm("-x".into())]), "\"-x\"");
		assert_eq!(format(&[Token::SearchTerm("a b".into())]), "\"a b\"");
		assert_eq!(format(&[Token::Negate, Token::OpenParen, Token::CloseParen]), "-( )");
	}
}
