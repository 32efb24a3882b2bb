pub mod accession;
pub mod catalog;
pub mod models;
pub mod stopwords;
pub mod text;

mod error;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use models::{Collection, Contributor, Photo, PhotoTag, Term, Visibility};
