use crate::{Error, Result};

const PREFIX: &str = "FI";

/// Formats a photo id as an accession number such as `FI0056752`.
pub fn accession_number(id: u64) -> String {
	format!("{PREFIX}{id:07}")
}

/// Accepts any number of digits after the prefix, not only seven.
pub fn accession_to_id(value: &str) -> Result<u64> {
	let invalid = || Error::InvalidAccessionNumber { value: value.to_string() };
	let digits = value.strip_prefix(PREFIX).ok_or_else(invalid)?;

	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return Err(invalid());
	}

	digits.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
	use crate::accession::{accession_number, accession_to_id};

	#[test]
	fn pads_to_seven_digits() {
		assert_eq!(accession_number(56752), "FI0056752");
		assert_eq!(accession_number(123_456_789), "FI123456789");
	}

	#[test]
	fn parses_any_digit_count() {
		assert_eq!(accession_to_id("FI0056752").expect("valid accession"), 56752);
		assert_eq!(accession_to_id("FI7").expect("valid accession"), 7);
	}

	#[test]
	fn rejects_malformed_values() {
		assert!(accession_to_id("0056752").is_err());
		assert!(accession_to_id("FI").is_err());
		assert!(accession_to_id("FI12a").is_err());
		assert!(accession_to_id("FI-12").is_err());
	}
}
