use crate::entity::{BookId, MemberId};
use crate::KernelError;

/// Outward notification collaborator. Called outside of any transaction.
#[async_trait::async_trait]
pub trait Notifier: 'static + Sync + Send {
    async fn reservation_ready(
        &self,
        member_id: &MemberId,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnNotifier: 'static + Sync + Send {
    type Notifier: Notifier;
    fn notifier(&self) -> &Self::Notifier;
}
