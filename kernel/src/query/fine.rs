use crate::database::Transaction;
use crate::entity::{Fine, FineId, MemberId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait FineQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &FineId,
    ) -> error_stack::Result<Option<Fine>, KernelError>;

    async fn find_by_member_id(
        &self,
        con: &mut Connection,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Fine>, KernelError>;
}

pub trait DependOnFineQuery<Connection: Transaction>: Sync + Send + 'static {
    type FineQuery: FineQuery<Connection>;
    fn fine_query(&self) -> &Self::FineQuery;
}
