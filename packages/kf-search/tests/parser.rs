use kf_search::{BasicParser, Error, Expression, QueryParser, Value, lexer, parser};

fn parser() -> QueryParser {
	QueryParser::new().expect("Query patterns must compile.")
}

fn parse(query: &str) -> Expression {
	parser().parse(query).unwrap_or_else(|err| panic!("Failed to parse {query:?}: {err}"))
}

fn caption(value: &str) -> Expression {
	Expression::caption(value)
}

fn untyped(word: &str) -> Expression {
	Expression::donor(word)
		| (Expression::caption(word)
			| (Expression::state(word)
				| (Expression::country(word)
					| (Expression::county(word)
						| (Expression::city(word) | (Expression::tag(word) | Expression::term(word)))))))
}

#[test]
fn typed_terms_parse_to_atoms() {
	assert_eq!(parse("year:1912"), Expression::year_equals(1912));
	assert_eq!(parse("caption:dog"), caption("dog"));
	assert_eq!(parse("Caption:Dog"), caption("dog"));
	assert_eq!(parse("term_exact:12"), Expression::from(Value::TermExactly(12)));
	assert_eq!(parse("contributor_exact:3"), Expression::from(Value::DonorExactly(3)));
	assert_eq!(parse("photographer_exact:4"), Expression::from(Value::PhotographerExactly(4)));
	assert_eq!(parse("is_new:true"), Expression::from(Value::IsNew(true)));
	assert_eq!(parse("city:\"Black Hawk\""), Expression::city("Black Hawk"));
}

#[test]
fn untyped_words_search_every_field() {
	assert_eq!(parse("dog"), untyped("dog"));
	assert_eq!(parse("1912"), Expression::year_equals(1912) | untyped("1912"));
}

#[test]
fn bad_typed_values_become_words() {
	assert_eq!(parse("term_exact:farm"), untyped("term_exact:farm"));
	assert_eq!(parse("year:soon"), untyped("year:soon"));
}

#[test]
fn negation_binds_tightest() {
	assert_eq!(parse("-caption:dog"), !caption("dog"));
	assert_eq!(parse("caption:dog AND caption:cat"), caption("dog") & caption("cat"));
	assert_eq!(parse("caption:dog OR caption:cat"), caption("dog") | caption("cat"));
}

#[test]
fn and_binds_tighter_than_or() {
	assert_eq!(
		parse("caption:bird AND caption:dog OR caption:cat AND caption:banana"),
		(caption("bird") & caption("dog")) | (caption("cat") & caption("banana"))
	);
	assert_eq!(
		parse("-caption:bird AND caption:dog OR caption:cat AND caption:banana"),
		(!caption("bird") & caption("dog")) | (caption("cat") & caption("banana"))
	);
}

#[test]
fn maximum_binds_loosest() {
	assert_eq!(
		parse("caption:bird OR caption:dog | caption:cat OR caption:banana"),
		Expression::maximum(
			caption("bird") | caption("dog"),
			caption("cat") | caption("banana")
		)
	);
}

#[test]
fn adjacent_atoms_are_ored() {
	assert_eq!(
		parse("((caption:bird OR caption:dog) AND (caption:cat caption:banana))"),
		(caption("bird") | caption("dog")) & (caption("cat") | caption("banana"))
	);
}

#[test]
fn parentheses_group() {
	assert_eq!(parse("(caption:bird)"), caption("bird"));
	assert_eq!(parse("((caption:bird))"), caption("bird"));
	assert_eq!(
		parse("caption:bird AND (caption:dog OR caption:cat) AND caption:banana"),
		(caption("bird") & (caption("dog") | caption("cat"))) & caption("banana")
	);
	assert_eq!(
		parse("caption:bird AND -(caption:dog OR caption:cat) AND caption:banana"),
		(caption("bird") & !(caption("dog") | caption("cat"))) & caption("banana")
	);
}

#[test]
fn negated_parentheses() {
	let expected = !(caption("bird") | caption("dog")) & (!caption("cat") | caption("banana"));

	assert_eq!(parse("-(caption:bird OR caption:dog) AND (-caption:cat OR caption:banana)"), expected);
	assert_eq!(
		parse(" -( caption:bird OR caption:dog  )AND (-caption:cat OR caption:banana) "),
		expected
	);
	assert_eq!(
		parse("-(caption:bird OR caption:dog) AND(-caption:cat OR caption:banana)"),
		(!(caption("bird") | caption("dog")) | untyped("AND"))
			| (!caption("cat") | caption("banana"))
	);
}

#[test]
fn unmatched_parentheses_are_reported() {
	let parser = parser();
	let err = parser
		.parse("caption:bird OR caption:dog) AND (-caption:cat OR caption:banana)")
		.expect_err("Expected an unmatched parenthesis.");

	assert!(matches!(err, Error::UnexpectedParenthesis { index: 3 }), "Unexpected error: {err:?}");

	let err = parser
		.parse("(caption:bird OR caption:dog) AND (-caption:cat OR caption:banana")
		.expect_err("Expected a missing parenthesis.");

	assert!(matches!(err, Error::ExpectedParenthesis));

	let err = parser
		.parse("() AND (-caption:cat OR caption:banana")
		.expect_err("Expected an unmatched parenthesis.");

	assert!(matches!(err, Error::UnexpectedParenthesis { index: 1 }));
}

#[test]
fn misplaced_keywords_and_dangling_operators_fail() {
	let parser = parser();

	assert!(matches!(parser.parse("AND dog"), Err(Error::UnexpectedToken { index: 0 })));
	assert!(matches!(parser.parse("dog AND "), Err(Error::UnexpectedEnd)));
}

#[test]
fn empty_input_is_no_expression() {
	let parser = parser();

	for query in ["", "   ", "()", "\"\"", ":", "tag:"] {
		let err = parser.parse(query).expect_err("Expected no expression.");

		assert!(err.is_no_expression(), "{query:?} gave {err:?}");
	}
}

#[test]
fn skipped_tokens_keep_their_positions() {
	let err = parser().parse("\"\" dog)").expect_err("Expected an unmatched parenthesis.");

	assert!(matches!(err, Error::UnexpectedParenthesis { index: 2 }));
}

#[test]
fn simple_parse_ors_whatever_it_recognizes() {
	let parser = parser();
	let tokens = lexer::lex("caption:dog) AND -caption:cat (").tokens;

	assert!(parser.parse_tokens(&tokens).is_err());
	assert_eq!(
		parser.simple_parse(&tokens).expect("Atoms are present."),
		caption("dog") | !caption("cat")
	);
	assert!(parser.simple_parse(&lexer::lex(") (").tokens).expect_err("No atoms.").is_no_expression());
}

#[test]
fn display_round_trips_through_the_parser() {
	let queries = [
		"dog",
		"1912",
		"FI0056752",
		"year:1910-1920 AND -tag:\"black hawk\"",
		"caption:bird OR caption:dog | caption:cat OR caption:banana",
		"caption:bird AND (caption:dog OR caption:cat) AND caption:banana",
		"-(caption:bird OR caption:dog) AND (-caption:cat OR caption:banana)",
		"a | (b | c)",
		"--city:Ames",
		"collection:6f1a2b4c-2d4e-4f8a-9b1c-0d2e3f4a5b6c is_new:false",
	];

	for query in queries {
		let expression = parse(query);

		assert_eq!(parse(&expression.to_string()), expression, "round trip of {query:?}");
	}
}

#[test]
fn basic_parser_builds_collection_expressions() {
	let dog = BasicParser.parse("dog").expect("parse");

	assert!(dog.is_collection());
	assert_eq!(dog, parser::collection_expr("dog"));
	assert_eq!(
		BasicParser.parse("dog waterloo").expect("parse"),
		parser::collection_expr("dog") & parser::collection_expr("waterloo")
	);
	assert!(matches!(
		BasicParser.parse("1912").expect("parse"),
		Expression::Maximum(year, _) if *year == Expression::year_equals(1912)
	));
	assert!(BasicParser.parse(" - ( ) ").expect_err("Nothing to parse.").is_no_expression());
}

fn negations(mut expression: &Expression) -> usize {
	let mut count = 0;

	while let Expression::Not(inner) = expression {
		count += 1;
		expression = inner;
	}

	count
}

#[test]
fn deep_nesting_is_rejected_instead_of_recursing() {
	let parser = parser();
	let negated = format!("{}caption:dog", "-".repeat(100_000));
	let opened = format!("{}caption:dog", "(".repeat(100_000));

	assert!(matches!(parser.parse(&negated), Err(Error::NestingTooDeep { index: 256 })));
	assert!(matches!(parser.parse(&opened), Err(Error::NestingTooDeep { index: 256 })));

	let shallow = parser.parse(&format!("{}caption:dog", "-".repeat(200))).expect("Under the cap.");

	assert_eq!(negations(&shallow), 200);
	assert_eq!(
		parser.parse(&format!("{}caption:dog{}", "(".repeat(200), ")".repeat(200))).expect("Under the cap."),
		caption("dog")
	);
}

#[test]
fn simple_parse_wraps_once_per_hyphen() {
	let parser = parser();
	let tokens = lexer::lex("--caption:dog ) -caption:cat").tokens;

	assert_eq!(
		parser.simple_parse(&tokens).expect("Atoms are present."),
		!!caption("dog") | !caption("cat")
	);

	let long = lexer::lex(&format!("{}caption:dog", "-".repeat(100_001))).tokens;
	let parsed = parser.simple_parse(&long).expect("Atoms are present.");

	assert_eq!(negations(&parsed), 255);
}
