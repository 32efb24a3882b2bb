use time::OffsetDateTime;
use uuid::Uuid;

use kf_domain::{Catalog, Collection};

/// Everything an expression needs to look at besides the photo itself.
#[derive(Clone, Copy, Debug)]
pub struct SearchContext<'a> {
	catalog: &'a Catalog,
	user: Option<&'a str>,
	new_cutoff: Option<OffsetDateTime>,
}
impl<'a> SearchContext<'a> {
	pub fn new(catalog: &'a Catalog) -> Self {
		Self { catalog, user: None, new_cutoff: None }
	}

	pub fn with_user(mut self, user: Option<&'a str>) -> Self {
		self.user = user;

		self
	}

	pub fn with_new_cutoff(mut self, new_cutoff: Option<OffsetDateTime>) -> Self {
		self.new_cutoff = new_cutoff;

		self
	}

	pub fn catalog(&self) -> &'a Catalog {
		self.catalog
	}

	pub fn user(&self) -> Option<&'a str> {
		self.user
	}

	pub fn new_cutoff(&self) -> Option<OffsetDateTime> {
		self.new_cutoff
	}

	/// The collection with this UUID, if the requesting user may see it.
	pub fn visible_collection(&self, uuid: Uuid) -> Option<&'a Collection> {
		self.catalog.collection(uuid).filter(|collection| collection.is_visible_to(self.user))
	}
}
