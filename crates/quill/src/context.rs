use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::BoxError;
use crate::Command;

/// The host side of an invocation: who sent the text and how to answer.
///
/// quill never looks any further into it; the session is carried in the
/// [`Context`] so converters, checks and handlers can reach the transport.
#[async_trait]
pub trait Session: Send + Sync {
	/// Identity of the invoking actor.
	fn author(&self) -> &str;

	/// Send a reply back to wherever the text came from.
	async fn reply(&self, content: &str) -> Result<(), BoxError>;
}

/// Per-invocation state handed to converters, checks and handlers.
#[derive(Clone)]
pub struct Context {
	session: Arc<dyn Session>,
	prefix: String,
	invoked_name: String,
	content: String,
	args: Vec<String>,
	command: Option<Arc<Command>>,
}

impl Context {
	pub fn new(session: Arc<dyn Session>) -> Self {
		Self {
			session,
			prefix: String::new(),
			invoked_name: String::new(),
			content: String::new(),
			args: Vec::new(),
			command: None,
		}
	}

	pub(crate) fn invocation(
		session: Arc<dyn Session>,
		prefix: &str,
		invoked_name: String,
		content: &str,
		command: Arc<Command>,
	) -> Self {
		Self {
			session,
			prefix: prefix.to_string(),
			invoked_name,
			content: content.to_string(),
			args: lexer::tokenize(content)
				.into_iter()
				.map(str::to_string)
				.collect(),
			command: Some(command),
		}
	}

	pub fn session(&self) -> &Arc<dyn Session> {
		&self.session
	}

	pub fn author(&self) -> &str {
		self.session.author()
	}

	pub async fn reply(&self, content: &str) -> Result<(), BoxError> {
		self.session.reply(content).await
	}

	/// The prefix the text started with, empty when none is configured.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// The command words as typed, joined with single spaces.
	pub fn invoked_name(&self) -> &str {
		&self.invoked_name
	}

	/// Raw text after the command words, trimmed.
	pub fn content_parameters(&self) -> &str {
		&self.content
	}

	/// Tokens of [`Context::content_parameters`].
	pub fn args(&self) -> &[String] {
		&self.args
	}

	pub fn command(&self) -> Option<&Arc<Command>> {
		self.command.as_ref()
	}
}

impl fmt::Debug for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Context")
			.field("author", &self.session.author())
			.field("prefix", &self.prefix)
			.field("invoked_name", &self.invoked_name)
			.field("args", &self.args)
			.field("command", &self.command.as_ref().map(|c| c.qualified_name()))
			.finish()
	}
}
