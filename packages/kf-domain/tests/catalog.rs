use std::env;

use uuid::Uuid;

use kf_domain::{Catalog, Error, Visibility};

const CATALOG_JSON: &str = r#"{
	"photos": [
		{
			"id": 56752,
			"year": 1912,
			"caption": "Threshing crew at the Hansen farm",
			"city": "Waterloo",
			"county": "Black Hawk",
			"state": "IA",
			"country": "US",
			"donor": { "id": 3, "first_name": "Ada", "last_name": "Hansen" },
			"tags": [{ "tag": "threshing", "accepted": true }, { "tag": "blurry", "accepted": false }],
			"terms": [{ "id": 12, "term": "Farm" }],
			"created": "1994-06-01T00:00:00Z"
		},
		{
			"id": 7,
			"created": "2001-01-01T00:00:00Z",
			"is_published": false
		}
	],
	"collections": [
		{
			"uuid": "6f1a2b4c-2d4e-4f8a-9b1c-0d2e3f4a5b6c",
			"name": "Harvest",
			"owner": "ada",
			"visibility": "unlisted",
			"photos": [56752]
		}
	]
}"#;

#[test]
fn catalog_parses_with_defaults() {
	let catalog = Catalog::from_json_str(CATALOG_JSON).expect("Catalog must parse.");

	assert_eq!(catalog.photos().len(), 2);

	let photo = catalog.photo(56752).expect("Photo must exist.");

	assert_eq!(photo.accession_number(), "FI0056752");
	assert_eq!(photo.accepted_tags().collect::<Vec<_>>(), vec!["threshing"]);
	assert_eq!(photo.term_names().collect::<Vec<_>>(), vec!["Farm"]);
	assert!(photo.is_published);

	let bare = catalog.photo(7).expect("Photo must exist.");

	assert!(bare.year.is_none());
	assert!(bare.caption.is_empty());
	assert!(!bare.is_published);
}

#[test]
fn collections_are_addressed_by_uuid() {
	let catalog = Catalog::from_json_str(CATALOG_JSON).expect("Catalog must parse.");
	let uuid = Uuid::parse_str("6f1a2b4c-2d4e-4f8a-9b1c-0d2e3f4a5b6c").expect("Valid uuid.");
	let collection = catalog.collection(uuid).expect("Collection must exist.");

	assert_eq!(collection.visibility, Visibility::Unlisted);
	assert!(collection.is_visible_to(None));
	assert!(collection.contains(56752));
	assert!(catalog.collection(Uuid::nil()).is_none());
}

#[test]
fn duplicate_photo_ids_are_rejected() {
	let raw = r#"{
		"photos": [
			{ "id": 1, "created": "2001-01-01T00:00:00Z" },
			{ "id": 1, "created": "2002-01-01T00:00:00Z" }
		]
	}"#;
	let err = Catalog::from_json_str(raw).expect_err("Expected duplicate error.");

	assert!(matches!(err, Error::DuplicatePhoto { id: 1 }));
}

#[test]
fn malformed_json_reports_parse_error() {
	let err = Catalog::from_json_str("{\"photos\": [").expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseCatalog { .. }));
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("kf_domain_test_missing_catalog.json");

	let err = Catalog::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadCatalog { .. }));
}
