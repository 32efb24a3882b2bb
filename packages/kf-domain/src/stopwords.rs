use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::text;

pub const STOPWORDS: &[&str] = &[
	"a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
	"as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
	"by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
	"further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
	"himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
	"more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
	"or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
	"some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
	"there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
	"very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
	"will", "with", "you", "your", "yours", "yourself", "yourselves",
];

/// The built-in stop-word list plus any site-specific additions.
#[derive(Clone, Debug)]
pub struct Stopwords {
	words: HashSet<String>,
}
impl Stopwords {
	pub fn new<I, S>(extra: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut words: HashSet<String> = STOPWORDS.iter().map(|word| word.to_string()).collect();

		words.extend(extra.into_iter().map(|word| text::normalize(word.as_ref())));

		Self { words }
	}

	pub fn is_stopword(&self, word: &str) -> bool {
		self.words.contains(text::normalize(word).as_str())
	}

	/// True when `phrase` has no word outside the list. A phrase with no words at all counts.
	pub fn only_stopwords(&self, phrase: &str) -> bool {
		phrase.unicode_words().all(|word| self.is_stopword(word))
	}
}
impl Default for Stopwords {
	fn default() -> Self {
		Self::new(std::iter::empty::<&str>())
	}
}

#[cfg(test)]
mod tests {
	use crate::stopwords::Stopwords;

	#[test]
	fn recognizes_builtin_words_case_insensitively() {
		let stopwords = Stopwords::default();

		assert!(stopwords.is_stopword("The"));
		assert!(!stopwords.is_stopword("barn"));
	}

	#[test]
	fn phrases_need_a_content_word() {
		let stopwords = Stopwords::default();

		assert!(stopwords.only_stopwords("of the"));
		assert!(stopwords.only_stopwords("--"));
		assert!(!stopwords.only_stopwords("the barn"));
	}

	#[test]
	fn extra_words_extend_the_list() {
		let stopwords = Stopwords::new(["Photo"]);

		assert!(stopwords.only_stopwords("a photo"));
	}
}
