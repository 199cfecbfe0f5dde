use crate::database::Transaction;
use crate::entity::Fine;
use crate::KernelError;

#[async_trait::async_trait]
pub trait FineModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        fine: &Fine,
    ) -> error_stack::Result<(), KernelError>;

    async fn update(
        &self,
        con: &mut Connection,
        fine: &Fine,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnFineModifier<Connection: Transaction>: 'static + Sync + Send {
    type FineModifier: FineModifier<Connection>;
    fn fine_modifier(&self) -> &Self::FineModifier;
}
