use crate::database::Transaction;
use crate::entity::Member;
use crate::KernelError;

#[async_trait::async_trait]
pub trait MemberModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        member: &Member,
    ) -> error_stack::Result<(), KernelError>;

    async fn update(
        &self,
        con: &mut Connection,
        member: &Member,
    ) -> error_stack::Result<(), KernelError>;
}
