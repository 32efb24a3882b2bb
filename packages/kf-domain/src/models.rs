use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::accession;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
	pub id: u64,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
}
impl Contributor {
	pub fn display_name(&self) -> String {
		match (self.first_name.trim(), self.last_name.trim()) {
			("", last) => last.to_string(),
			(first, "") => first.to_string(),
			(first, last) => format!("{first} {last}"),
		}
	}
}

/// A curated label assigned by archivists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
	pub id: u64,
	pub term: String,
}

/// A user-submitted tag. Only accepted tags take part in search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoTag {
	pub tag: String,
	#[serde(default)]
	pub accepted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Photo {
	pub id: u64,
	#[serde(default)]
	pub year: Option<i32>,
	#[serde(default)]
	pub circa: bool,
	#[serde(default)]
	pub caption: String,
	#[serde(default)]
	pub city: String,
	#[serde(default)]
	pub county: String,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub country: String,
	#[serde(default)]
	pub donor: Option<Contributor>,
	#[serde(default)]
	pub photographer: Option<Contributor>,
	#[serde(default)]
	pub tags: Vec<PhotoTag>,
	#[serde(default)]
	pub terms: Vec<Term>,
	#[serde(with = "time::serde::rfc3339")]
	pub created: OffsetDateTime,
	#[serde(default = "default_published")]
	pub is_published: bool,
}
impl Photo {
	pub fn accession_number(&self) -> String {
		accession::accession_number(self.id)
	}

	pub fn accepted_tags(&self) -> impl Iterator<Item = &str> {
		self.tags.iter().filter(|tag| tag.accepted).map(|tag| tag.tag.as_str())
	}

	pub fn term_names(&self) -> impl Iterator<Item = &str> {
		self.terms.iter().map(|term| term.term.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
	Public,
	Unlisted,
	Private,
}

/// A user-curated list of photos, addressed in queries by its UUID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
	pub uuid: Uuid,
	pub name: String,
	pub owner: String,
	pub visibility: Visibility,
	#[serde(default)]
	pub photos: Vec<u64>,
}
impl Collection {
	/// Private collections are only visible to their owner. Anyone holding the UUID may view
	/// public and unlisted ones.
	pub fn is_visible_to(&self, user: Option<&str>) -> bool {
		match self.visibility {
			Visibility::Public | Visibility::Unlisted => true,
			Visibility::Private => user.is_some_and(|user| user == self.owner),
		}
	}

	pub fn contains(&self, photo_id: u64) -> bool {
		self.photos.contains(&photo_id)
	}
}

fn default_published() -> bool {
	true
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use crate::models::{Collection, Contributor, Visibility};

	#[test]
	fn display_name_skips_empty_parts() {
		let both = Contributor { id: 1, first_name: "Ada".into(), last_name: "Lovelace".into() };
		let last = Contributor { id: 2, first_name: " ".into(), last_name: "Smith".into() };

		assert_eq!(both.display_name(), "Ada Lovelace");
		assert_eq!(last.display_name(), "Smith");
	}

	#[test]
	fn private_collections_are_owner_only() {
		let collection = Collection {
			uuid: Uuid::new_v4(),
			name: "Barns".into(),
			owner: "ada".into(),
			visibility: Visibility::Private,
			photos: vec![1, 2],
		};

		assert!(collection.is_visible_to(Some("ada")));
		assert!(!collection.is_visible_to(Some("bob")));
		assert!(!collection.is_visible_to(None));
		assert!(collection.contains(2));
		assert!(!collection.contains(3));
	}
}
