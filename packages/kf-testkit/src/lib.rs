mod error;

pub use error::{Error, Result};

use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use kf_domain::{Catalog, Collection, Contributor, Photo, PhotoTag, Term, Visibility};

pub const DEFAULT_CREATED: OffsetDateTime = datetime!(2000-01-01 00:00:00 UTC);

/// Builds a published photo with every optional field empty.
pub struct PhotoBuilder {
	photo: Photo,
}
impl PhotoBuilder {
	pub fn new(id: u64) -> Self {
		Self {
			photo: Photo {
				id,
				year: None,
				circa: false,
				caption: String::new(),
				city: String::new(),
				county: String::new(),
				state: String::new(),
				country: String::new(),
				donor: None,
				photographer: None,
				tags: Vec::new(),
				terms: Vec::new(),
				created: DEFAULT_CREATED,
				is_published: true,
			},
		}
	}

	pub fn year(mut self, year: i32) -> Self {
		self.photo.year = Some(year);

		self
	}

	pub fn caption(mut self, caption: &str) -> Self {
		self.photo.caption = caption.to_string();

		self
	}

	pub fn place(mut self, city: &str, county: &str, state: &str, country: &str) -> Self {
		self.photo.city = city.to_string();
		self.photo.county = county.to_string();
		self.photo.state = state.to_string();
		self.photo.country = country.to_string();

		self
	}

	pub fn tag(mut self, tag: &str) -> Self {
		self.photo.tags.push(PhotoTag { tag: tag.to_string(), accepted: true });

		self
	}

	/// Adds a tag that is still awaiting review.
	pub fn pending_tag(mut self, tag: &str) -> Self {
		self.photo.tags.push(PhotoTag { tag: tag.to_string(), accepted: false });

		self
	}

	pub fn term(mut self, id: u64, term: &str) -> Self {
		self.photo.terms.push(Term { id, term: term.to_string() });

		self
	}

	pub fn donor(mut self, id: u64, first_name: &str, last_name: &str) -> Self {
		self.photo.donor = Some(contributor(id, first_name, last_name));

		self
	}

	pub fn photographer(mut self, id: u64, first_name: &str, last_name: &str) -> Self {
		self.photo.photographer = Some(contributor(id, first_name, last_name));

		self
	}

	pub fn created(mut self, created: OffsetDateTime) -> Self {
		self.photo.created = created;

		self
	}

	pub fn unpublished(mut self) -> Self {
		self.photo.is_published = false;

		self
	}

	pub fn build(self) -> Photo {
		self.photo
	}
}

pub fn photo(id: u64) -> PhotoBuilder {
	PhotoBuilder::new(id)
}

pub fn contributor(id: u64, first_name: &str, last_name: &str) -> Contributor {
	Contributor { id, first_name: first_name.to_string(), last_name: last_name.to_string() }
}

pub fn collection(owner: &str, visibility: Visibility, photos: &[u64]) -> Collection {
	Collection {
		uuid: Uuid::new_v4(),
		name: format!("{owner}'s photos"),
		owner: owner.to_string(),
		visibility,
		photos: photos.to_vec(),
	}
}

pub fn catalog(photos: Vec<Photo>) -> Result<Catalog> {
	Ok(Catalog::new(photos, Vec::new())?)
}

pub fn catalog_with_collections(
	photos: Vec<Photo>,
	collections: Vec<Collection>,
) -> Result<Catalog> {
	Ok(Catalog::new(photos, collections)?)
}

/// One dated photo per year in `years`, with ids counting up from 1.
pub fn yearly_catalog(years: std::ops::RangeInclusive<i32>) -> Result<Catalog> {
	let photos: Vec<Photo> = years
		.enumerate()
		.map(|(offset, year)| photo(offset as u64 + 1).year(year).build())
		.collect();

	if photos.is_empty() {
		return Err(Error::Message("Year range must not be empty.".to_string()));
	}

	catalog(photos)
}
