/// Cursor over a token sequence.
///
/// Besides plain iteration the binder needs to rewind after a failed greedy
/// conversion and to swallow everything that is left, so the cursor can be
/// moved back explicitly.
#[derive(Debug, Clone)]
pub struct TokenStream<'a, T = String> {
	tokens: &'a [T],
	index: usize,
}

impl<'a, T: AsRef<str>> TokenStream<'a, T> {
	pub fn new(tokens: &'a [T]) -> Self {
		Self { tokens, index: 0 }
	}

	/// Move the cursor back by `count` tokens.
	///
	/// # Panics
	///
	/// Panics if that would move the cursor before the first token.
	pub fn back(&mut self, count: usize) {
		assert!(
			count <= self.index,
			"cannot rewind {} tokens from position {}",
			count,
			self.index
		);
		self.index -= count;
	}

	/// Returns every token from the one most recently yielded by `next`
	/// through the end, and moves the cursor to the end.
	pub fn consume_rest(&mut self) -> &'a [T] {
		let start = self.index.saturating_sub(1);
		self.index = self.tokens.len();
		&self.tokens[start..]
	}

	/// Like [`TokenStream::consume_rest`], joined with single spaces.
	pub fn consume_rest_joined(&mut self) -> String {
		self.consume_rest()
			.iter()
			.map(AsRef::as_ref)
			.collect::<Vec<_>>()
			.join(" ")
	}

	pub fn reset(&mut self) {
		self.index = 0;
	}

	pub fn is_finished(&self) -> bool {
		self.index >= self.tokens.len()
	}

	pub fn position(&self) -> usize {
		self.index
	}

	/// Number of tokens not yet yielded.
	pub fn remaining(&self) -> usize {
		self.tokens.len() - self.index
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

impl<'a, T: AsRef<str>> Iterator for TokenStream<'a, T> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		let token = self.tokens.get(self.index)?;
		self.index += 1;
		Some(token.as_ref())
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.remaining();
		(remaining, Some(remaining))
	}
}
