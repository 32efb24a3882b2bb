use std::fmt::{Display, Formatter};

use crate::expression::{Expression, Group, Value};

const SEARCH_RESULTS: &str = "Search Results";
const ALL_PHOTOS: &str = "All Photos";

/// The AND-ed parts of an expression, rendered as prose such as
/// `from 1912; and termed with dog and farm`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Description {
	items: Vec<Expression>,
}
impl Description {
	pub fn new(items: Vec<Expression>) -> Self {
		Self { items }
	}

	pub fn items(&self) -> &[Expression] {
		&self.items
	}

	fn clause(group: Group, items: &[&Expression]) -> Option<String> {
		if items.is_empty() {
			return None;
		}

		let values = || items.iter().filter_map(|item| atom(item));

		let clause = match group {
			Group::Year => year_clause(&values().collect::<Vec<_>>()),
			Group::Location => format!("in {}", join_values(values())),
			Group::Contributor => format!("contributed by {}", join_values(values())),
			Group::Photographer => format!("photographed by {}", join_values(values())),
			Group::Tag => format!("tagged with {}", join_values(values())),
			Group::Term => format!("termed with {}", join_values(values())),
			Group::Caption => format!("with captions containing {}", join_values(values())),
			Group::New => join_and(
				values()
					.map(|value| match value {
						Value::IsNew(false) => "not recently added".to_string(),
						_ => "recently added".to_string(),
					})
					.collect(),
			),
			Group::Collection => format!("in collection {}", join_values(values())),
			Group::Accession => format!("numbered {}", join_values(values())),
			Group::Max => format!(
				"matching {}",
				join_and(items.iter().filter_map(|item| item.short_label().ok()).collect())
			),
			Group::Excluded => format!(
				"excluding {}",
				join_and(
					items
						.iter()
						.filter_map(|item| match item {
							Expression::Not(inner) => Some(inner.to_string()),
							_ => None,
						})
						.collect()
				)
			),
		};

		Some(clause)
	}
}
impl Display for Description {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let clauses: Vec<String> = Group::ORDER
			.iter()
			.filter_map(|group| {
				let members: Vec<&Expression> =
					self.items.iter().filter(|item| item.group() == Some(*group)).collect();

				Self::clause(*group, &members)
			})
			.collect();

		f.write_str(&clauses.join("; and "))
	}
}

/// Title for a result page.
pub fn collection_name(expression: Option<&Expression>) -> String {
	let Some(expression) = expression else {
		return ALL_PHOTOS.to_string();
	};

	if !expression.is_collection() {
		return SEARCH_RESULTS.to_string();
	}

	expression
		.description()
		.map(|description| description.to_string())
		.unwrap_or_else(|_| SEARCH_RESULTS.to_string())
}

fn atom(expression: &Expression) -> Option<&Value> {
	match expression {
		Expression::Atom(value) => Some(value),
		_ => None,
	}
}

fn year_clause(values: &[&Value]) -> String {
	if let [first, second] = values {
		match (first, second) {
			(Value::YearGte(start), Value::YearLte(end))
			| (Value::YearLte(end), Value::YearGte(start)) => {
				return format!("between {start} and {end}");
			},
			_ => {},
		}
	}

	join_and(
		values
			.iter()
			.map(|value| match value {
				Value::YearGte(year) => format!("from {year} onward"),
				Value::YearLte(year) => format!("up to {year}"),
				Value::YearRange(start, end) => format!("between {start} and {end}"),
				other => format!("from {}", other.display_value()),
			})
			.collect(),
	)
}

fn join_values<'a>(values: impl Iterator<Item = &'a Value>) -> String {
	join_and(values.map(Value::display_value).collect())
}

/// `a`, `a and b`, `a, b and c`.
fn join_and(mut parts: Vec<String>) -> String {
	match parts.len() {
		0 => String::new(),
		1 => parts.remove(0),
		_ => {
			let last = parts.pop().unwrap_or_default();

			format!("{} and {last}", parts.join(", "))
		},
	}
}
