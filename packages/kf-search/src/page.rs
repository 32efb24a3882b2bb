//! Keyset pagination over chronologically ordered photos.
//!
//! A page is addressed by the `(year, id)` key of the row just outside it, so pages stay
//! stable while photos are added elsewhere in the timeline.

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::Serialize;

use kf_domain::Photo;

use crate::{Error, Result};

const AFTER: &str = "after";
const BEFORE: &str = "before";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cursor {
	pub year: i32,
	pub id: u64,
	/// Take the rows before the key instead of after it.
	pub reverse: bool,
}
impl Cursor {
	fn key(&self) -> (i32, u64) {
		(self.year, self.id)
	}
}
impl Display for Cursor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let direction = if self.reverse { BEFORE } else { AFTER };

		write!(f, "{direction}:{}:{}", self.year, self.id)
	}
}
impl FromStr for Cursor {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		let invalid = || Error::InvalidCursor { value: value.to_string() };
		let mut parts = value.splitn(3, ':');
		let reverse = match parts.next() {
			Some(AFTER) => false,
			Some(BEFORE) => true,
			_ => return Err(invalid()),
		};
		let year = parts.next().and_then(|year| year.parse().ok()).ok_or_else(invalid)?;
		let id = parts.next().and_then(|id| id.parse().ok()).ok_or_else(invalid)?;

		Ok(Self { year, id, reverse })
	}
}

#[derive(Clone, Debug)]
pub struct Page<'a> {
	pub photos: Vec<&'a Photo>,
	pub next: Option<Cursor>,
	pub previous: Option<Cursor>,
}
impl Page<'_> {
	pub fn has_next(&self) -> bool {
		self.next.is_some()
	}

	pub fn has_previous(&self) -> bool {
		self.previous.is_some()
	}
}

#[derive(Clone, Copy, Debug)]
pub struct KeysetPaginator {
	per_page: usize,
}
impl KeysetPaginator {
	pub fn new(per_page: usize) -> Self {
		Self { per_page: per_page.max(1) }
	}

	/// `photos` must already be sorted by `(year, id)`.
	pub fn page<'a>(&self, photos: &[&'a Photo], cursor: Option<&Cursor>) -> Page<'a> {
		let (start, end) = match cursor {
			None => (0, self.per_page.min(photos.len())),
			Some(cursor) if !cursor.reverse => {
				let start = photos.partition_point(|photo| key(photo) <= cursor.key());

				(start, (start + self.per_page).min(photos.len()))
			},
			Some(cursor) => {
				let end = photos.partition_point(|photo| key(photo) < cursor.key());

				(end.saturating_sub(self.per_page), end)
			},
		};
		let window = &photos[start..end];
		let previous = window
			.first()
			.filter(|_| start > 0)
			.map(|photo| cursor_at(photo, true));
		let next = window
			.last()
			.filter(|_| end < photos.len())
			.map(|photo| cursor_at(photo, false));

		Page { photos: window.to_vec(), next, previous }
	}
}

fn key(photo: &Photo) -> (i32, u64) {
	(photo.year.unwrap_or(i32::MAX), photo.id)
}

fn cursor_at(photo: &Photo, reverse: bool) -> Cursor {
	let (year, id) = key(photo);

	Cursor { year, id, reverse }
}
