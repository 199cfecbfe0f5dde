use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{Member, MemberId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryMemberRepository;

#[async_trait::async_trait]
impl MemberQuery<InMemoryTransaction> for InMemoryMemberRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        Ok(con.state().members.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl MemberModifier<InMemoryTransaction> for InMemoryMemberRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .members
            .insert(member.id().clone(), member.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .members
            .insert(member.id().clone(), member.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::MemberQuery;
    use kernel::interface::update::MemberModifier;
    use kernel::prelude::entity::{Member, MemberId, MemberName, MemberStatus};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemoryMemberRepository};

    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;

        let member_id = MemberId::new(Uuid::new_v4());
        let member = Member::new(
            member_id.clone(),
            MemberName::new("Ada"),
            MemberStatus::Active,
        );
        InMemoryMemberRepository.create(&mut con, &member).await?;

        let found = InMemoryMemberRepository.find_by_id(&mut con, &member_id).await?;
        assert_eq!(found, Some(member.clone()));

        let suspended = Member::new(
            member_id.clone(),
            MemberName::new("Ada"),
            MemberStatus::Suspended,
        );
        InMemoryMemberRepository.update(&mut con, &suspended).await?;

        let found = InMemoryMemberRepository
            .find_by_id(&mut con, &member_id)
            .await?
            .unwrap();
        assert!(!found.is_active());
        Ok(())
    }
}
