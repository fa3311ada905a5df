use std::future::Future;

use async_trait::async_trait;

use crate::Args;
use crate::BoxError;
use crate::CommandError;
use crate::Context;

/// The body of a command.
///
/// Any `async fn(Context, Args) -> Result<(), BoxError>` is a handler.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn call(&self, ctx: Context, args: Args) -> Result<(), BoxError>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
	F: Fn(Context, Args) -> Fut + Send + Sync,
	Fut: Future<Output = Result<(), BoxError>> + Send,
{
	async fn call(&self, ctx: Context, args: Args) -> Result<(), BoxError> {
		(self)(ctx, args).await
	}
}

/// Receives dispatch errors for a command, a group or a whole dispatcher.
///
/// Only the most specific handler runs. The error is still returned to the
/// caller of [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
#[async_trait]
pub trait ErrorHandler: Send + Sync {
	async fn on_error(&self, ctx: &Context, err: &CommandError);
}
