pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read catalog file at {path:?}.")]
	ReadCatalog { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse catalog.")]
	ParseCatalog { source: serde_json::Error },
	#[error("Photo id {id} appears more than once in the catalog.")]
	DuplicatePhoto { id: u64 },
	#[error("Collection {uuid} appears more than once in the catalog.")]
	DuplicateCollection { uuid: uuid::Uuid },
	#[error("'{value}' is not an accession number.")]
	InvalidAccessionNumber { value: String },
}
