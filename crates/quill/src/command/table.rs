use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use tracing::debug;

use super::Command;
use crate::RegistrationError;

/// Children of a group, or the root commands of a dispatcher, keyed by
/// every name and alias.
#[derive(Default)]
pub struct CommandTable {
	inner: RwLock<HashMap<String, Arc<Command>>>,
}

impl CommandTable {
	pub fn new() -> Self {
		Self::default()
	}

	fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Command>>> {
		self.inner.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Command>>> {
		self.inner.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// Insert `command` under its name and every alias.
	///
	/// Nothing is inserted if any of those keys is already taken or repeats
	/// another of the command's own names.
	pub fn insert(&self, command: &Arc<Command>) -> Result<(), RegistrationError> {
		let mut map = self.write();
		let mut seen = HashSet::new();
		for key in command.names() {
			if !seen.insert(key) || map.contains_key(key) {
				return Err(RegistrationError::Duplicate(key.to_string()));
			}
		}
		for key in seen {
			map.insert(key.to_string(), Arc::clone(command));
		}
		Ok(())
	}

	/// Remove by primary name (the command and all its aliases) or by alias
	/// (that alias only).
	pub fn remove(&self, name: &str) -> Option<Arc<Command>> {
		let mut map = self.write();
		let command = map.remove(name)?;
		if command.name() == name {
			map.retain(|_, other| !Arc::ptr_eq(other, &command));
			debug!(command = name, "removed command and its aliases");
		} else {
			debug!(alias = name, command = command.name(), "removed alias");
		}
		Some(command)
	}

	pub fn get(&self, name: &str) -> Option<Arc<Command>> {
		self.read().get(name).cloned()
	}

	/// Exact lookup, falling back to an ASCII case-insensitive scan.
	///
	/// When several names differ only by case the lowest one wins.
	pub fn find(&self, name: &str, case_insensitive: bool) -> Option<Arc<Command>> {
		let map = self.read();
		if let Some(command) = map.get(name) {
			return Some(Arc::clone(command));
		}
		if !case_insensitive {
			return None;
		}
		map.iter()
			.filter(|(key, _)| key.eq_ignore_ascii_case(name))
			.min_by(|(a, _), (b, _)| a.cmp(b))
			.map(|(_, command)| Arc::clone(command))
	}

	/// Walk a space separated path such as `"config set"`.
	pub fn resolve(&self, qualified: &str) -> Option<Arc<Command>> {
		let mut segments = qualified.split_whitespace();
		let mut command = self.get(segments.next()?)?;
		for segment in segments {
			if command.children.is_empty() {
				return None;
			}
			command = command.children.get(segment)?;
		}
		Some(command)
	}

	/// Every distinct command once, ordered by name.
	pub fn unique(&self) -> Vec<Arc<Command>> {
		let mut commands: Vec<Arc<Command>> = Vec::new();
		for command in self.read().values() {
			if !commands.iter().any(|c| Arc::ptr_eq(c, command)) {
				commands.push(Arc::clone(command));
			}
		}
		commands.sort_by(|a, b| a.name().cmp(b.name()));
		commands
	}

	/// Number of keys, aliases included.
	pub fn len(&self) -> usize {
		self.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.read().contains_key(name)
	}

	pub fn clear(&self) {
		self.write().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Args;
	use crate::BoxError;
	use crate::Command;
	use crate::Context;
	use crate::ConverterRegistry;

	async fn noop(_ctx: Context, _args: Args) -> Result<(), BoxError> {
		Ok(())
	}

	fn command(name: &str, aliases: &[&str]) -> Arc<Command> {
		let command = Command::builder(name)
			.aliases(aliases.iter().copied())
			.handler(noop)
			.build(&ConverterRegistry::new())
			.unwrap();
		Arc::new(command)
	}

	#[test]
	fn test_aliases_resolve_to_same_command() {
		let table = CommandTable::new();
		let ping = command("ping", &["p", "pong"]);
		table.insert(&ping).unwrap();

		assert_eq!(table.len(), 3);
		for key in ["ping", "p", "pong"] {
			assert!(Arc::ptr_eq(&table.get(key).unwrap(), &ping));
		}
		assert_eq!(table.unique().len(), 1);
	}

	#[test]
	fn test_collision_leaves_table_unchanged() {
		let table = CommandTable::new();
		table.insert(&command("ping", &["p"])).unwrap();

		let err = table.insert(&command("pull", &["p"])).unwrap_err();
		assert_eq!(err, RegistrationError::Duplicate("p".to_string()));
		assert_eq!(table.len(), 2);
		assert!(!table.contains("pull"));
	}

	#[test]
	fn test_own_alias_repeating_name_is_rejected() {
		let table = CommandTable::new();
		let err = table.insert(&command("ping", &["ping"])).unwrap_err();
		assert_eq!(err, RegistrationError::Duplicate("ping".to_string()));
		assert!(table.is_empty());
	}

	#[test]
	fn test_remove_by_name_and_alias() {
		let table = CommandTable::new();
		table.insert(&command("ping", &["p", "pong"])).unwrap();

		assert!(table.remove("p").is_some());
		assert!(!table.contains("p"));
		assert!(table.contains("pong"));

		assert!(table.remove("ping").is_some());
		assert!(table.is_empty());
		assert!(table.remove("ping").is_none());
	}

	#[test]
	fn test_find_case_insensitive() {
		let table = CommandTable::new();
		table.insert(&command("Ping", &[])).unwrap();

		assert!(table.find("ping", false).is_none());
		assert!(table.find("ping", true).is_some());
		assert!(table.find("PING", true).is_some());
	}

	#[test]
	fn test_find_case_insensitive_picks_lowest_name() {
		let table = CommandTable::new();
		for name in ["pinG", "Ping", "PING", "PiNg"] {
			table.insert(&command(name, &[])).unwrap();
		}

		for _ in 0..8 {
			let found = table.find("ping", true).unwrap();
			assert_eq!(found.name(), "PING");
		}
		assert_eq!(table.find("Ping", true).unwrap().name(), "Ping");
	}
}
