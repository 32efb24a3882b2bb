pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The input held nothing to search for. Callers show the unfiltered archive.
	#[error("Query contains no search expression.")]
	NoExpression,
	#[error("Unexpected parenthesis at token {index}.")]
	UnexpectedParenthesis { index: usize },
	#[error("Expected a closing parenthesis before the end of the query.")]
	ExpectedParenthesis,
	#[error("Unexpected token at {index}.")]
	UnexpectedToken { index: usize },
	#[error("Query ended where a search term was expected.")]
	UnexpectedEnd,
	#[error("Parentheses and negations nest too deeply at token {index}.")]
	NestingTooDeep { index: usize },
	#[error("Invalid constraint '{constraint}': {source}")]
	InvalidConstraint { constraint: String, source: Box<Error> },
	#[error("Expression contains an OR and cannot be described.")]
	NotDescribable,
	#[error("Expression has no short label.")]
	NoShortLabel,
	#[error("'{value}' is not a page cursor.")]
	InvalidCursor { value: String },
	#[error("Failed to compile search pattern.")]
	Pattern { source: regex::Error },
}
impl Error {
	pub fn is_no_expression(&self) -> bool {
		matches!(self, Self::NoExpression)
	}
}
