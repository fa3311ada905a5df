//! Commands, their builder, and the tree they form.

mod signature;
mod table;

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::Weak;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use arc_swap::ArcSwap;
use tracing::debug;
pub use table::CommandTable;

use crate::CommandError;
use crate::Context;
use crate::Converter;
use crate::ConverterRegistry;
use crate::ErrorHandler;
use crate::Handler;
use crate::ParamSpec;
use crate::Parameter;
use crate::RegistrationError;
use crate::binder::bind;
use crate::check::Check;
use crate::check::collect_checks;
use crate::check::run_checks;
use crate::converter::ConverterMap;
use crate::param::build_params;

/// A registered command, possibly a group with children of its own.
pub struct Command {
	name: String,
	aliases: Vec<String>,
	params: Vec<Parameter>,
	handler: Arc<dyn Handler>,
	parent: OnceLock<Weak<Command>>,
	pub(crate) children: CommandTable,
	checks: ArcSwap<Vec<Arc<dyn Check>>>,
	enabled: AtomicBool,
	ignore_extra: bool,
	hidden: bool,
	help: Option<String>,
	brief: Option<String>,
	usage: Option<String>,
	error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl Command {
	pub fn builder(name: impl Into<String>) -> CommandBuilder {
		CommandBuilder::new(name)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn aliases(&self) -> &[String] {
		&self.aliases
	}

	/// The primary name followed by every alias.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
	}

	pub fn params(&self) -> &[Parameter] {
		&self.params
	}

	pub fn ignore_extra(&self) -> bool {
		self.ignore_extra
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::Acquire)
	}

	/// A disabled command is skipped by dispatch as if it were not
	/// registered.
	pub fn set_enabled(&self, enabled: bool) {
		self.enabled.store(enabled, Ordering::Release);
	}

	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	pub fn checks(&self) -> Arc<Vec<Arc<dyn Check>>> {
		self.checks.load_full()
	}

	/// Append a check; it applies from the next dispatch on.
	pub fn add_check(&self, check: impl Check + 'static) {
		let check: Arc<dyn Check> = Arc::new(check);
		self.checks.rcu(|checks| {
			let mut checks = Vec::clone(checks);
			checks.push(Arc::clone(&check));
			checks
		});
	}

	pub fn clear_checks(&self) {
		self.checks.store(Arc::new(Vec::new()));
	}

	/// The group this command is attached to.
	pub fn parent(&self) -> Option<Arc<Command>> {
		self.parent.get().and_then(Weak::upgrade)
	}

	/// Names from the outermost group down to this command.
	pub fn qualified_name(&self) -> String {
		let mut names = vec![self.name.clone()];
		let mut current = self.parent();
		while let Some(parent) = current {
			names.push(parent.name.clone());
			current = parent.parent();
		}
		names.reverse();
		names.join(" ")
	}

	pub fn is_group(&self) -> bool {
		!self.children.is_empty()
	}

	/// Attach `command` as a child of this one.
	pub fn add_command(self: &Arc<Self>, command: Command) -> Result<Arc<Command>, RegistrationError> {
		// A freshly built command has no parent yet.
		let _ = command.parent.set(Arc::downgrade(self));
		let command = Arc::new(command);
		self.children.insert(&command)?;
		debug!(
			parent = self.name.as_str(),
			command = command.name.as_str(),
			"attached subcommand"
		);
		Ok(command)
	}

	/// See [`CommandTable::remove`].
	pub fn remove_command(&self, name: &str) -> Option<Arc<Command>> {
		self.children.remove(name)
	}

	/// Look up a descendant by a space separated path relative to this
	/// command.
	pub fn get_command(&self, qualified: &str) -> Option<Arc<Command>> {
		self.children.resolve(qualified)
	}

	/// Direct children, each once.
	pub fn all_commands(&self) -> Vec<Arc<Command>> {
		self.children.unique()
	}

	pub fn signature(&self) -> String {
		signature::render(&self.params)
	}

	pub fn help(&self) -> Option<&str> {
		self.help.as_deref()
	}

	/// The explicit brief, or the first line of the help text.
	pub fn brief(&self) -> Option<&str> {
		self.brief
			.as_deref()
			.or_else(|| self.help.as_deref().and_then(|help| help.lines().next()))
	}

	/// The explicit usage, or the signature.
	pub fn usage(&self) -> String {
		self.usage.clone().unwrap_or_else(|| self.signature())
	}

	/// This command's error handler, or the nearest ancestor's.
	pub(crate) fn scoped_error_handler(&self) -> Option<Arc<dyn ErrorHandler>> {
		if let Some(handler) = &self.error_handler {
			return Some(Arc::clone(handler));
		}
		let mut current = self.parent();
		while let Some(parent) = current {
			if let Some(handler) = &parent.error_handler {
				return Some(Arc::clone(handler));
			}
			current = parent.parent();
		}
		None
	}

	/// Run checks, bind the arguments and call the handler.
	pub(crate) async fn invoke(&self, ctx: &Context) -> Result<(), CommandError> {
		run_checks(&collect_checks(self), ctx).await?;

		let args = bind(&self.params, ctx, ctx.args(), self.ignore_extra, &self.name).await?;
		debug!(command = self.name.as_str(), args = args.len(), "arguments bound");

		self.handler
			.call(ctx.clone(), args)
			.await
			.map_err(CommandError::from_handler)
	}
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("name", &self.name)
			.field("aliases", &self.aliases)
			.field("params", &self.params)
			.field("enabled", &self.is_enabled())
			.field("children", &self.children.len())
			.finish_non_exhaustive()
	}
}

/// Declarative description of a command, turned into a [`Command`] once
/// its parameter types are resolved.
pub struct CommandBuilder {
	name: String,
	aliases: Vec<String>,
	params: Vec<ParamSpec>,
	handler: Option<Arc<dyn Handler>>,
	checks: Vec<Arc<dyn Check>>,
	converters: ConverterMap,
	pub(crate) ignore_extra: Option<bool>,
	enabled: bool,
	hidden: bool,
	help: Option<String>,
	brief: Option<String>,
	usage: Option<String>,
	error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl CommandBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			aliases: Vec::new(),
			params: Vec::new(),
			handler: None,
			checks: Vec::new(),
			converters: ConverterMap::new(),
			ignore_extra: None,
			enabled: true,
			hidden: false,
			help: None,
			brief: None,
			usage: None,
			error_handler: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	pub fn aliases<I, S>(mut self, aliases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.aliases.extend(aliases.into_iter().map(Into::into));
		self
	}

	pub fn param(mut self, param: ParamSpec) -> Self {
		self.params.push(param);
		self
	}

	pub fn params(mut self, params: impl IntoIterator<Item = ParamSpec>) -> Self {
		self.params.extend(params);
		self
	}

	pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
		self.handler = Some(Arc::new(handler));
		self
	}

	pub fn check(mut self, check: impl Check + 'static) -> Self {
		self.checks.push(Arc::new(check));
		self
	}

	/// A converter for `key` used by this command only, taking priority
	/// over the dispatcher's.
	pub fn converter(mut self, key: impl Into<String>, converter: impl Converter + 'static) -> Self {
		self.converters.insert(key.into(), Arc::new(converter));
		self
	}

	/// Reject leftover tokens instead of ignoring them. Defaults to the
	/// dispatcher's configuration.
	pub fn ignore_extra(mut self, ignore_extra: bool) -> Self {
		self.ignore_extra = Some(ignore_extra);
		self
	}

	pub fn enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}

	pub fn hidden(mut self, hidden: bool) -> Self {
		self.hidden = hidden;
		self
	}

	pub fn help(mut self, help: impl Into<String>) -> Self {
		self.help = Some(help.into());
		self
	}

	pub fn brief(mut self, brief: impl Into<String>) -> Self {
		self.brief = Some(brief.into());
		self
	}

	pub fn usage(mut self, usage: impl Into<String>) -> Self {
		self.usage = Some(usage.into());
		self
	}

	pub fn on_error(mut self, handler: impl ErrorHandler + 'static) -> Self {
		self.error_handler = Some(Arc::new(handler));
		self
	}

	/// Resolve parameter types against `registry` overlaid with this
	/// builder's own converters.
	pub fn build(self, registry: &ConverterRegistry) -> Result<Command, RegistrationError> {
		let handler = self
			.handler
			.ok_or_else(|| RegistrationError::MissingHandler(self.name.clone()))?;
		let params = build_params(self.params, &registry.merged(&self.converters))?;
		debug!(
			command = self.name.as_str(),
			params = params.len(),
			"built command"
		);

		Ok(Command {
			name: self.name,
			aliases: self.aliases,
			params,
			handler,
			parent: OnceLock::new(),
			children: CommandTable::new(),
			checks: ArcSwap::from_pointee(self.checks),
			enabled: AtomicBool::new(self.enabled),
			ignore_extra: self.ignore_extra.unwrap_or(true),
			hidden: self.hidden,
			help: self.help,
			brief: self.brief,
			usage: self.usage,
			error_handler: self.error_handler,
		})
	}
}

impl fmt::Debug for CommandBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandBuilder")
			.field("name", &self.name)
			.field("aliases", &self.aliases)
			.field("params", &self.params)
			.finish_non_exhaustive()
	}
}
