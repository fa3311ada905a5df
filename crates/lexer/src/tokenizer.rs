/// Opening and closing quotation marks recognised at the start of a token.
pub const QUOTES: &[(char, char)] = &[
	('"', '"'),
	('‘', '’'),
	('‚', '‛'),
	('“', '”'),
	('„', '‟'),
	('⹂', '⹂'),
	('「', '」'),
	('『', '』'),
	('〝', '〞'),
	('﹁', '﹂'),
	('﹃', '﹄'),
	('＂', '＂'),
	('｢', '｣'),
	('«', '»'),
	('‹', '›'),
	('《', '》'),
	('〈', '〉'),
];

/// Returns the closing partner of `open` if it starts a quoted token.
#[inline]
pub fn closing_quote(open: char) -> Option<char> {
	QUOTES
		.iter()
		.find(|(start, _)| *start == open)
		.map(|(_, end)| *end)
}

/// Split `input` into argument tokens.
///
/// Tokens are separated by runs of whitespace. A token whose first character
/// is an opening quote extends to the matching closing quote and is returned
/// without the quotes. There is no escaping: an opening quote without a
/// partner later in the input is an ordinary character, and the rest of the
/// input is split on whitespace as usual.
pub fn tokenize(input: &str) -> Vec<&str> {
	let mut tokens = Vec::new();
	let mut rest = input;

	loop {
		rest = rest.trim_start();
		let Some(first) = rest.chars().next() else {
			break;
		};

		if let Some(close) = closing_quote(first) {
			let body = &rest[first.len_utf8()..];
			if let Some(end) = body.find(close) {
				tokens.push(&body[..end]);
				rest = &body[end + close.len_utf8()..];
				continue;
			}
		}

		let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
		tokens.push(&rest[..end]);
		rest = &rest[end..];
	}

	tokens
}
