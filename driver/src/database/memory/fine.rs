use kernel::interface::query::FineQuery;
use kernel::interface::update::FineModifier;
use kernel::prelude::entity::{Fine, FineId, MemberId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryFineRepository;

#[async_trait::async_trait]
impl FineQuery<InMemoryTransaction> for InMemoryFineRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &FineId,
    ) -> error_stack::Result<Option<Fine>, KernelError> {
        Ok(con.state().fines.get(id).cloned())
    }

    async fn find_by_member_id(
        &self,
        con: &mut InMemoryTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Fine>, KernelError> {
        let mut fines: Vec<Fine> = con
            .state()
            .fines
            .values()
            .filter(|fine| fine.member_id() == member_id)
            .cloned()
            .collect();
        fines.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(fines)
    }
}

#[async_trait::async_trait]
impl FineModifier<InMemoryTransaction> for InMemoryFineRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        fine: &Fine,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .fines
            .insert(fine.id().clone(), fine.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        fine: &Fine,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .fines
            .insert(fine.id().clone(), fine.clone());
        Ok(())
    }
}
