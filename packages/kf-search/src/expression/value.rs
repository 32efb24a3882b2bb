use uuid::Uuid;

use kf_domain::{Contributor, Photo, accession, text};

use crate::{context::SearchContext, lexer::Token};

/// Category an item falls into when a search is summarized for people.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
	Year,
	Location,
	Contributor,
	Photographer,
	Tag,
	Term,
	Caption,
	New,
	Collection,
	Accession,
	Max,
	Excluded,
}
impl Group {
	/// Order in which groups appear in a description.
	pub const ORDER: [Self; 12] = [
		Self::Year,
		Self::Location,
		Self::Contributor,
		Self::Photographer,
		Self::Tag,
		Self::Term,
		Self::Caption,
		Self::New,
		Self::Collection,
		Self::Accession,
		Self::Max,
		Self::Excluded,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Year => "year",
			Self::Location => "location",
			Self::Contributor => "contributor",
			Self::Photographer => "photographer",
			Self::Tag => "tag",
			Self::Term => "term",
			Self::Caption => "caption",
			Self::New => "new",
			Self::Collection => "collection",
			Self::Accession => "accession",
			Self::Max => "max",
			Self::Excluded => "excluded",
		}
	}
}

/// A single field comparison.
///
/// Tag, term, contributor and caption text is normalized when built through the constructors.
/// Place names keep their spelling and are compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
	YearEquals(i32),
	YearGte(i32),
	YearLte(i32),
	YearRange(i32, i32),
	Tag(String),
	TagExactly(String),
	Term(String),
	TermExactly(u64),
	Donor(String),
	DonorExactly(u64),
	PhotographerExactly(u64),
	City(String),
	County(String),
	State(String),
	Country(String),
	Caption(String),
	AccessionNumber(u64),
	IsNew(bool),
	Collection(Uuid),
}
impl Value {
	pub fn tag(value: &str) -> Self {
		Self::Tag(text::normalize(value))
	}

	pub fn tag_exactly(value: &str) -> Self {
		Self::TagExactly(text::normalize(value))
	}

	pub fn term(value: &str) -> Self {
		Self::Term(text::normalize(value))
	}

	pub fn donor(value: &str) -> Self {
		Self::Donor(text::normalize(value))
	}

	pub fn caption(value: &str) -> Self {
		Self::Caption(text::normalize(value))
	}

	pub fn group(&self) -> Group {
		match self {
			Self::YearEquals(_) | Self::YearGte(_) | Self::YearLte(_) | Self::YearRange(..) =>
				Group::Year,
			Self::City(_) | Self::County(_) | Self::State(_) | Self::Country(_) => Group::Location,
			Self::Donor(_) | Self::DonorExactly(_) => Group::Contributor,
			Self::PhotographerExactly(_) => Group::Photographer,
			Self::Tag(_) | Self::TagExactly(_) => Group::Tag,
			Self::Term(_) | Self::TermExactly(_) => Group::Term,
			Self::Caption(_) => Group::Caption,
			Self::IsNew(_) => Group::New,
			Self::Collection(_) => Group::Collection,
			Self::AccessionNumber(_) => Group::Accession,
		}
	}

	/// Free-text caption matches rank results; every other atom is a plain filter.
	pub fn is_collection(&self) -> bool {
		!matches!(self, Self::Caption(_))
	}

	pub fn field_label(&self) -> &'static str {
		match self {
			Self::YearEquals(_) | Self::YearGte(_) | Self::YearLte(_) | Self::YearRange(..) => "Year",
			Self::Tag(_) | Self::TagExactly(_) => "Tag",
			Self::Term(_) | Self::TermExactly(_) => "Term",
			Self::Donor(_) | Self::DonorExactly(_) => "Contributor",
			Self::PhotographerExactly(_) => "Photographer",
			Self::City(_) => "City",
			Self::County(_) => "County",
			Self::State(_) => "State",
			Self::Country(_) => "Country",
			Self::Caption(_) => "Caption",
			Self::AccessionNumber(_) => "Accession",
			Self::IsNew(_) => "New",
			Self::Collection(_) => "Collection",
		}
	}

	/// The compared value as shown to people, without the field name.
	pub fn display_value(&self) -> String {
		match self {
			Self::YearEquals(year) => year.to_string(),
			Self::YearGte(year) => format!("{year}+"),
			Self::YearLte(year) => format!("{year}-"),
			Self::YearRange(start, end) => format!("{start}-{end}"),
			Self::Tag(value)
			| Self::TagExactly(value)
			| Self::Term(value)
			| Self::Donor(value)
			| Self::City(value)
			| Self::County(value)
			| Self::State(value)
			| Self::Country(value)
			| Self::Caption(value) => value.clone(),
			Self::TermExactly(id) | Self::DonorExactly(id) | Self::PhotographerExactly(id) =>
				format!("#{id}"),
			Self::AccessionNumber(id) => accession::accession_number(*id),
			Self::IsNew(true) => "yes".to_string(),
			Self::IsNew(false) => "no".to_string(),
			Self::Collection(uuid) => uuid.to_string(),
		}
	}

	pub fn short_label(&self) -> String {
		format!("{}: {}", self.field_label(), self.display_value())
	}

	/// The query-language token that parses back to this value.
	pub fn to_token(&self) -> Token {
		match self {
			Self::YearEquals(_) | Self::YearGte(_) | Self::YearLte(_) | Self::YearRange(..) =>
				Token::typed("year", self.display_value()),
			Self::Tag(value) => Token::typed("tag", value.as_str()),
			Self::TagExactly(value) => Token::typed("tag_exact", value.as_str()),
			Self::Term(value) => Token::typed("term", value.as_str()),
			Self::TermExactly(id) => Token::typed("term_exact", id.to_string()),
			Self::Donor(value) => Token::typed("contributor", value.as_str()),
			Self::DonorExactly(id) => Token::typed("contributor_exact", id.to_string()),
			Self::PhotographerExactly(id) => Token::typed("photographer_exact", id.to_string()),
			Self::City(value) => Token::typed("city", value.as_str()),
			Self::County(value) => Token::typed("county", value.as_str()),
			Self::State(value) => Token::typed("state", value.as_str()),
			Self::Country(value) => Token::typed("country", value.as_str()),
			Self::Caption(value) => Token::typed("caption", value.as_str()),
			Self::AccessionNumber(id) => Token::SearchTerm(accession::accession_number(*id)),
			Self::IsNew(flag) => Token::typed("is_new", flag.to_string()),
			Self::Collection(uuid) => Token::typed("collection", uuid.to_string()),
		}
	}

	pub fn matches(&self, photo: &Photo, ctx: &SearchContext<'_>) -> bool {
		match self {
			Self::YearEquals(year) => photo.year == Some(*year),
			Self::YearGte(year) => photo.year.is_some_and(|value| value >= *year),
			Self::YearLte(year) => photo.year.is_some_and(|value| value <= *year),
			Self::YearRange(start, end) =>
				photo.year.is_some_and(|value| (*start..=*end).contains(&value)),
			Self::Tag(value) => photo.accepted_tags().any(|tag| text::contains(tag, value)),
			Self::TagExactly(value) => photo.accepted_tags().any(|tag| text::equals(tag, value)),
			Self::Term(value) => photo.term_names().any(|term| text::contains(term, value)),
			Self::TermExactly(id) => photo.terms.iter().any(|term| term.id == *id),
			Self::Donor(value) =>
				photo.donor.as_ref().is_some_and(|donor| name_contains(donor, value)),
			Self::DonorExactly(id) => photo.donor.as_ref().is_some_and(|donor| donor.id == *id),
			Self::PhotographerExactly(id) =>
				photo.photographer.as_ref().is_some_and(|photographer| photographer.id == *id),
			Self::City(value) => text::contains(&photo.city, value),
			Self::County(value) => text::contains(&photo.county, value),
			Self::State(value) => text::contains(&photo.state, value),
			Self::Country(value) => text::contains(&photo.country, value),
			Self::Caption(value) => text::contains(&photo.caption, value),
			Self::AccessionNumber(id) => photo.id == *id,
			Self::IsNew(flag) => {
				let is_new = ctx.new_cutoff().is_none_or(|cutoff| photo.created >= cutoff);

				is_new == *flag
			},
			Self::Collection(uuid) => ctx
				.visible_collection(*uuid)
				.is_some_and(|collection| collection.contains(photo.id)),
		}
	}

	/// Relevance in `[0, 1]`. Substring atoms over tags, terms and captions score by how much
	/// of the field the match covers; everything else is all or nothing.
	pub fn score(&self, photo: &Photo, ctx: &SearchContext<'_>) -> f64 {
		match self {
			Self::Tag(value) => {
				let joined = photo.accepted_tags().collect::<Vec<_>>().join(" ");

				text::overlap_fraction(&joined, value)
			},
			Self::Term(value) => {
				let joined = photo.term_names().collect::<Vec<_>>().join(" ");

				text::overlap_fraction(&joined, value)
			},
			Self::Caption(value) => text::overlap_fraction(&photo.caption, value),
			_ if self.matches(photo, ctx) => 1.0,
			_ => 0.0,
		}
	}
}

fn name_contains(contributor: &Contributor, value: &str) -> bool {
	text::contains(&contributor.first_name, value)
		|| text::contains(&contributor.last_name, value)
		|| text::contains(&contributor.display_name(), value)
}
