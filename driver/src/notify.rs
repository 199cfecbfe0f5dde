use kernel::interface::notify::Notifier;
use kernel::prelude::entity::{BookId, MemberId};
use kernel::KernelError;

/// Notification sink that records the alert in the log stream. Stands in
/// for a mail/push collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait::async_trait]
impl Notifier for TracingNotifier {
    async fn reservation_ready(
        &self,
        member_id: &MemberId,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        tracing::info!(?member_id, ?book_id, "reserved book is ready for pickup");
        Ok(())
    }
}
