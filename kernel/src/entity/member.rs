mod id;
mod name;
mod status;

pub use self::{id::*, name::*, status::*};
use destructure::Destructure;

#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Member {
    id: MemberId,
    name: MemberName,
    status: MemberStatus,
}

impl Member {
    pub fn new(id: MemberId, name: MemberName, status: MemberStatus) -> Self {
        Self { id, name, status }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &MemberName {
        &self.name
    }

    pub fn status(&self) -> &MemberStatus {
        &self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
