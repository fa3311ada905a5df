//! Error types for registration and dispatch.

use thiserror::Error;

use crate::Context;

/// Boxed error returned by handlers, converters and sessions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The input could not be bound to a command's parameters.
///
/// Raised when a conversion fails for a parameter that has no default, when
/// a required argument is missing, or when extra arguments are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BadArgument {
	message: String,
}

impl BadArgument {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	/// Wrap an arbitrary conversion error, keeping a `BadArgument` as is.
	pub(crate) fn from_conversion(err: BoxError) -> Self {
		match err.downcast::<BadArgument>() {
			Ok(bad) => *bad,
			Err(other) => Self::new(other.to_string()),
		}
	}
}

/// A check rejected the invocation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CheckFailure {
	context: Box<Context>,
	message: String,
	check: Option<usize>,
}

impl CheckFailure {
	pub const DEFAULT_MESSAGE: &'static str = "A check has failed.";

	pub fn new(context: &Context, message: impl Into<String>) -> Self {
		Self {
			context: Box::new(context.clone()),
			message: message.into(),
			check: None,
		}
	}

	/// Record the position of the rejecting check.
	pub(crate) fn at_check(mut self, index: usize) -> Self {
		self.check = Some(index);
		self
	}

	pub fn context(&self) -> &Context {
		&self.context
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	/// Position of the rejecting check in evaluation order, outermost group
	/// first. `None` when the failure was raised outside the check pipeline.
	pub fn check(&self) -> Option<usize> {
		self.check
	}
}

/// Setup-time failure. Never produced while dispatching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
	#[error("duplicate command: multiple commands share the name/alias `{0}`")]
	Duplicate(String),
	#[error("command `{0}` has no handler")]
	MissingHandler(String),
	#[error("annotation for `{0}` has more than 2 arguments, which is unsupported")]
	AnnotationArity(String),
	#[error("variable arguments cannot have default values or be optional (`{0}`)")]
	OptionalVariadic(String),
	#[error("`{param}` consumes the remaining input and must be the last parameter, but `{next}` follows")]
	NotLast { param: String, next: String },
	#[error("Greedy[{ty}] is invalid (`{param}`)")]
	InvalidGreedy { param: String, ty: String },
	#[error("Greedy[...] cannot be a variable or consume-rest argument (`{0}`)")]
	GreedyMode(String),
	#[error("default of greedy parameter `{0}` must be a list")]
	GreedyDefault(String),
	#[error("no converter registered for type `{ty}` (`{param}`)")]
	UnknownType { param: String, ty: String },
	#[error("type `{ty}` cannot be converted directly (`{param}`)")]
	Unsupported { param: String, ty: String },
}

/// Everything a dispatch can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
	#[error(transparent)]
	BadArgument(#[from] BadArgument),
	#[error(transparent)]
	CheckFailure(#[from] CheckFailure),
	#[error("command raised an error: {0}")]
	Failed(#[source] BoxError),
}

impl CommandError {
	/// Classify an error returned by a handler.
	pub(crate) fn from_handler(err: BoxError) -> Self {
		let err = match err.downcast::<BadArgument>() {
			Ok(bad) => return Self::BadArgument(*bad),
			Err(err) => err,
		};
		match err.downcast::<CheckFailure>() {
			Ok(failure) => Self::CheckFailure(*failure),
			Err(err) => Self::Failed(err),
		}
	}
}
