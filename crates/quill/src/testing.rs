use async_trait::async_trait;

use crate::BoxError;
use crate::Session;

/// A session that drops every reply.
pub(crate) struct NullSession;

#[async_trait]
impl Session for NullSession {
	fn author(&self) -> &str {
		"tester"
	}

	async fn reply(&self, _content: &str) -> Result<(), BoxError> {
		Ok(())
	}
}
