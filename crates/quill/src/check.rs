//! Gates evaluated before a command's arguments are bound.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::CheckFailure;
use crate::Command;
use crate::Context;

/// An async predicate over the invocation.
///
/// Returning `Ok(false)` rejects with [`CheckFailure::DEFAULT_MESSAGE`];
/// returning an error rejects with that error's message.
#[async_trait]
pub trait Check: Send + Sync {
	async fn check(&self, ctx: &Context) -> Result<bool, CheckFailure>;
}

#[async_trait]
impl<F, Fut> Check for F
where
	F: Fn(Context) -> Fut + Send + Sync,
	Fut: Future<Output = Result<bool, CheckFailure>> + Send,
{
	async fn check(&self, ctx: &Context) -> Result<bool, CheckFailure> {
		(self)(ctx.clone()).await
	}
}

/// Checks in evaluation order: outermost group first, the command last.
pub(crate) fn collect_checks(command: &Command) -> Vec<Arc<dyn Check>> {
	let mut chain = vec![command.checks()];
	let mut current = command.parent();
	while let Some(parent) = current {
		chain.push(parent.checks());
		current = parent.parent();
	}
	chain.into_iter().rev().flat_map(|checks| checks.to_vec()).collect()
}

/// Run `checks` in order, stopping at the first rejection.
pub(crate) async fn run_checks(checks: &[Arc<dyn Check>], ctx: &Context) -> Result<(), CheckFailure> {
	for (index, check) in checks.iter().enumerate() {
		let passed = check
			.check(ctx)
			.await
			.map_err(|failure| failure.at_check(index))?;
		if !passed {
			debug!("check #{index} rejected the invocation");
			return Err(CheckFailure::new(ctx, CheckFailure::DEFAULT_MESSAGE).at_check(index));
		}
	}
	Ok(())
}
