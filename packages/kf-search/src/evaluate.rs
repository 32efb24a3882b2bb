use std::cmp::Ordering;

use serde::Serialize;

use kf_domain::Photo;

use crate::{context::SearchContext, expression::Expression};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
	/// Exact filter, listed by `(year, id)`.
	Collection,
	/// Ranked by relevance, ties broken by `(year, id)`.
	Search,
	/// No filter at all.
	All,
}

#[derive(Clone, Copy, Debug)]
pub struct Ranked<'a> {
	pub photo: &'a Photo,
	/// Relevance, present in search mode only.
	pub score: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct Evaluation<'a> {
	pub mode: Mode,
	pub ranked: Vec<Ranked<'a>>,
}
impl<'a> Evaluation<'a> {
	pub fn photos(&self) -> Vec<&'a Photo> {
		self.ranked.iter().map(|ranked| ranked.photo).collect()
	}
}

/// Picks the mode from the expression and runs it. Photo ids are unique in a catalog, so
/// every result list is free of duplicates.
pub fn evaluate<'a>(expression: Option<&Expression>, ctx: &SearchContext<'a>) -> Evaluation<'a> {
	let evaluation = match expression {
		None => Evaluation { mode: Mode::All, ranked: unranked(all_photos(ctx)) },
		Some(expression) if expression.is_collection() => Evaluation {
			mode: Mode::Collection,
			ranked: unranked(as_collection(expression, ctx)),
		},
		Some(expression) =>
			Evaluation { mode: Mode::Search, ranked: as_search(expression, ctx) },
	};

	tracing::info!(
		mode = ?evaluation.mode,
		candidates = ctx.catalog().photos().len(),
		results = evaluation.ranked.len(),
		"Evaluated search expression."
	);

	evaluation
}

/// Published, dated photos in chronological order.
pub fn all_photos<'a>(ctx: &SearchContext<'a>) -> Vec<&'a Photo> {
	let mut photos: Vec<&Photo> = ctx
		.catalog()
		.photos()
		.iter()
		.filter(|photo| photo.is_published && photo.year.is_some())
		.collect();

	photos.sort_by_key(|photo| (photo.year, photo.id));

	photos
}

pub fn as_collection<'a>(expression: &Expression, ctx: &SearchContext<'a>) -> Vec<&'a Photo> {
	let mut photos = all_photos(ctx);

	photos.retain(|photo| expression.filter(photo, ctx));

	photos
}

pub fn as_search<'a>(expression: &Expression, ctx: &SearchContext<'a>) -> Vec<Ranked<'a>> {
	let mut ranked: Vec<Ranked<'a>> = ctx
		.catalog()
		.photos()
		.iter()
		.filter(|photo| photo.is_published && expression.filter(photo, ctx))
		.map(|photo| (photo, expression.score(photo, ctx, false)))
		.filter(|(_, score)| *score > 0.0)
		.map(|(photo, score)| Ranked { photo, score: Some(score) })
		.collect();

	ranked.sort_by(|a, b| {
		let (a_score, b_score) = (a.score.unwrap_or_default(), b.score.unwrap_or_default());

		match b_score.total_cmp(&a_score) {
			Ordering::Equal => chronological(a.photo, b.photo),
			other => other,
		}
	});

	tracing::debug!(matches = ranked.len(), "Scored search candidates.");

	ranked
}

/// Dated photos first, then by year and id.
fn chronological(a: &Photo, b: &Photo) -> Ordering {
	(a.year.is_none(), a.year, a.id).cmp(&(b.year.is_none(), b.year, b.id))
}

fn unranked(photos: Vec<&Photo>) -> Vec<Ranked<'_>> {
	photos.into_iter().map(|photo| Ranked { photo, score: None }).collect()
}
