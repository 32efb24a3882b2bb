pub mod description;
pub mod value;

pub use description::{Description, collection_name};
pub use value::{Group, Value};

use std::{
	fmt::{Display, Formatter},
	ops::{BitAnd, BitOr, Not},
};

use kf_domain::{Photo, stopwords::Stopwords};

use crate::{Error, Result, context::SearchContext};

/// A parsed search. Filtering and ranking both read the same tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
	Atom(Value),
	And(Box<Expression>, Box<Expression>),
	Or(Box<Expression>, Box<Expression>),
	Not(Box<Expression>),
	/// Union for filtering; ranks by the better of the two sides.
	Maximum(Box<Expression>, Box<Expression>),
}
impl Expression {
	pub fn and(left: Self, right: Self) -> Self {
		Self::And(Box::new(left), Box::new(right))
	}

	pub fn or(left: Self, right: Self) -> Self {
		Self::Or(Box::new(left), Box::new(right))
	}

	pub fn negate(inner: Self) -> Self {
		Self::Not(Box::new(inner))
	}

	pub fn maximum(left: Self, right: Self) -> Self {
		Self::Maximum(Box::new(left), Box::new(right))
	}

	pub fn year_equals(year: i32) -> Self {
		Self::Atom(Value::YearEquals(year))
	}

	pub fn year_gte(year: i32) -> Self {
		Self::Atom(Value::YearGte(year))
	}

	pub fn year_lte(year: i32) -> Self {
		Self::Atom(Value::YearLte(year))
	}

	pub fn tag(value: &str) -> Self {
		Self::Atom(Value::tag(value))
	}

	pub fn term(value: &str) -> Self {
		Self::Atom(Value::term(value))
	}

	pub fn donor(value: &str) -> Self {
		Self::Atom(Value::donor(value))
	}

	pub fn caption(value: &str) -> Self {
		Self::Atom(Value::caption(value))
	}

	pub fn city(value: &str) -> Self {
		Self::Atom(Value::City(value.to_string()))
	}

	pub fn county(value: &str) -> Self {
		Self::Atom(Value::County(value.to_string()))
	}

	pub fn state(value: &str) -> Self {
		Self::Atom(Value::State(value.to_string()))
	}

	pub fn country(value: &str) -> Self {
		Self::Atom(Value::Country(value.to_string()))
	}

	pub fn filter(&self, photo: &Photo, ctx: &SearchContext<'_>) -> bool {
		match self {
			Self::Atom(value) => value.matches(photo, ctx),
			Self::And(left, right) => left.filter(photo, ctx) && right.filter(photo, ctx),
			Self::Or(left, right) | Self::Maximum(left, right) =>
				left.filter(photo, ctx) || right.filter(photo, ctx),
			Self::Not(inner) => !inner.filter(photo, ctx),
		}
	}

	/// Relevance of `photo`. `negated` is true under an odd number of `Not` nodes.
	pub fn score(&self, photo: &Photo, ctx: &SearchContext<'_>, negated: bool) -> f64 {
		match self {
			Self::Atom(value) => {
				let score = value.score(photo, ctx);

				if negated { 1.0 - score } else { score }
			},
			Self::And(left, right) => {
				let (left, right) = (left.score(photo, ctx, negated), right.score(photo, ctx, negated));

				if negated { left + right } else { left * right }
			},
			Self::Or(left, right) => {
				let (left, right) = (left.score(photo, ctx, negated), right.score(photo, ctx, negated));

				if negated { left * right } else { left + right }
			},
			Self::Not(inner) => inner.score(photo, ctx, !negated),
			Self::Maximum(left, right) => {
				let (left, right) = (left.score(photo, ctx, negated), right.score(photo, ctx, negated));

				if negated { left.min(right) } else { left.max(right) }
			},
		}
	}

	/// True when results should be listed chronologically instead of ranked.
	pub fn is_collection(&self) -> bool {
		match self {
			Self::Atom(value) => value.is_collection(),
			Self::And(left, right) | Self::Maximum(left, right) =>
				left.is_collection() && right.is_collection(),
			Self::Or(..) => false,
			Self::Not(inner) => inner.is_collection(),
		}
	}

	/// Drops caption atoms made only of stop-words. `None` means nothing is left.
	pub fn shakeout(&self, stopwords: &Stopwords) -> Option<Self> {
		match self {
			Self::Atom(Value::Caption(caption)) if stopwords.only_stopwords(caption) => None,
			Self::Atom(_) => Some(self.clone()),
			Self::And(left, right) =>
				collapse(left.shakeout(stopwords), right.shakeout(stopwords), Self::and),
			Self::Or(left, right) =>
				collapse(left.shakeout(stopwords), right.shakeout(stopwords), Self::or),
			Self::Maximum(left, right) =>
				collapse(left.shakeout(stopwords), right.shakeout(stopwords), Self::maximum),
			Self::Not(inner) => inner.shakeout(stopwords).map(Self::negate),
		}
	}

	pub fn complexity(&self) -> usize {
		match self {
			Self::Atom(_) => 1,
			Self::And(left, right) | Self::Or(left, right) | Self::Maximum(left, right) =>
				left.complexity() + right.complexity(),
			Self::Not(inner) => inner.complexity(),
		}
	}

	pub fn group(&self) -> Option<Group> {
		match self {
			Self::Atom(value) => Some(value.group()),
			Self::Maximum(..) => Some(Group::Max),
			Self::Not(_) => Some(Group::Excluded),
			Self::And(..) | Self::Or(..) => None,
		}
	}

	pub fn short_label(&self) -> Result<String> {
		match self {
			Self::Atom(value) => Ok(value.short_label()),
			Self::Maximum(..) => Ok(self.leftmost_value().display_value()),
			_ => Err(Error::NoShortLabel),
		}
	}

	pub fn description(&self) -> Result<Description> {
		let mut items = Vec::new();

		self.flatten_and(&mut items)?;

		Ok(Description::new(items))
	}

	fn flatten_and(&self, items: &mut Vec<Self>) -> Result<()> {
		match self {
			Self::And(left, right) => {
				left.flatten_and(items)?;
				right.flatten_and(items)
			},
			Self::Or(..) => Err(Error::NotDescribable),
			_ => {
				items.push(self.clone());

				Ok(())
			},
		}
	}

	fn leftmost_value(&self) -> &Value {
		match self {
			Self::Atom(value) => value,
			Self::And(left, _) | Self::Or(left, _) | Self::Maximum(left, _) => left.leftmost_value(),
			Self::Not(inner) => inner.leftmost_value(),
		}
	}

	fn precedence(&self) -> u8 {
		match self {
			Self::Maximum(..) => 0,
			Self::Or(..) => 1,
			Self::And(..) => 2,
			Self::Not(_) | Self::Atom(_) => 3,
		}
	}

	fn write_operand(&self, f: &mut Formatter<'_>, min_precedence: u8) -> std::fmt::Result {
		if self.precedence() < min_precedence { write!(f, "({self})") } else { write!(f, "{self}") }
	}
}
impl Display for Expression {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Atom(value) => write!(f, "{}", value.to_token()),
			Self::And(left, right) => {
				left.write_operand(f, 2)?;
				f.write_str(" AND ")?;
				right.write_operand(f, 3)
			},
			Self::Or(left, right) => {
				left.write_operand(f, 1)?;
				f.write_str(" OR ")?;
				right.write_operand(f, 2)
			},
			Self::Maximum(left, right) => {
				left.write_operand(f, 0)?;
				f.write_str(" | ")?;
				right.write_operand(f, 1)
			},
			Self::Not(inner) => {
				f.write_str("-")?;
				inner.write_operand(f, 3)
			},
		}
	}
}
impl From<Value> for Expression {
	fn from(value: Value) -> Self {
		Self::Atom(value)
	}
}
impl BitAnd for Expression {
	type Output = Self;

	fn bitand(self, rhs: Self) -> Self {
		Self::and(self, rhs)
	}
}
impl BitOr for Expression {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		Self::or(self, rhs)
	}
}
impl Not for Expression {
	type Output = Self;

	fn not(self) -> Self {
		Self::negate(self)
	}
}

fn collapse(
	left: Option<Expression>,
	right: Option<Expression>,
	join: fn(Expression, Expression) -> Expression,
) -> Option<Expression> {
	match (left, right) {
		(Some(left), Some(right)) => Some(join(left, right)),
		(Some(side), None) | (None, Some(side)) => Some(side),
		(None, None) => None,
	}
}
