use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Collection, Error, Photo, Result};

/// The photo archive as loaded from a JSON export.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
	#[serde(default)]
	photos: Vec<Photo>,
	#[serde(default)]
	collections: Vec<Collection>,
}
impl Catalog {
	pub fn new(photos: Vec<Photo>, collections: Vec<Collection>) -> Result<Self> {
		let catalog = Self { photos, collections };

		catalog.check_unique()?;

		Ok(catalog)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.map_err(|err| Error::ReadCatalog { path: path.to_path_buf(), source: err })?;

		Self::from_json_str(&raw)
	}

	pub fn from_json_str(raw: &str) -> Result<Self> {
		let catalog: Catalog =
			serde_json::from_str(raw).map_err(|err| Error::ParseCatalog { source: err })?;

		catalog.check_unique()?;

		Ok(catalog)
	}

	pub fn photos(&self) -> &[Photo] {
		&self.photos
	}

	pub fn collections(&self) -> &[Collection] {
		&self.collections
	}

	pub fn photo(&self, id: u64) -> Option<&Photo> {
		self.photos.iter().find(|photo| photo.id == id)
	}

	pub fn collection(&self, uuid: Uuid) -> Option<&Collection> {
		self.collections.iter().find(|collection| collection.uuid == uuid)
	}

	fn check_unique(&self) -> Result<()> {
		let mut ids = HashSet::with_capacity(self.photos.len());

		for photo in &self.photos {
			if !ids.insert(photo.id) {
				return Err(Error::DuplicatePhoto { id: photo.id });
			}
		}

		let mut uuids = HashSet::with_capacity(self.collections.len());

		for collection in &self.collections {
			if !uuids.insert(collection.uuid) {
				return Err(Error::DuplicateCollection { uuid: collection.uuid });
			}
		}

		Ok(())
	}
}
