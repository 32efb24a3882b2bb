use unicode_normalization::UnicodeNormalization;

/// Case-folds text for matching. NFKC first so that compatibility forms such as ligatures and
/// full-width letters compare equal to their plain spellings.
pub fn normalize(input: &str) -> String {
	input.nfkc().collect::<String>().to_lowercase()
}

pub fn contains(haystack: &str, needle: &str) -> bool {
	normalize(haystack).contains(normalize(needle).as_str())
}

pub fn equals(lhs: &str, rhs: &str) -> bool {
	normalize(lhs) == normalize(rhs)
}

/// Fraction of `field` (in characters) taken up by occurrences of `needle`.
///
/// A field that is exactly the needle scores 1.0; a long field mentioning it once scores close
/// to zero.
pub fn overlap_fraction(field: &str, needle: &str) -> f64 {
	let field = normalize(field);
	let needle = normalize(needle);
	let total = field.chars().count();

	if total == 0 || needle.is_empty() {
		return 0.0;
	}

	let stripped = field.replace(needle.as_str(), "");
	let removed = total - stripped.chars().count();

	removed as f64 / total as f64
}
