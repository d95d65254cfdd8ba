mod process;

pub use process::ProcessNotifier;

use crate::error::ReminderResult;
use async_trait::async_trait;

/// Something that can put a reminder in front of the user
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a reminder for `title`, returning once it has been dismissed
    async fn notify(&self, title: &str) -> ReminderResult<()>;
}
