use crate::database::Transaction;
use crate::entity::{Member, MemberId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MemberQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError>;
}

pub trait DependOnMemberQuery<Connection: Transaction>: Sync + Send + 'static {
    type MemberQuery: MemberQuery<Connection>;
    fn member_query(&self) -> &Self::MemberQuery;
}
