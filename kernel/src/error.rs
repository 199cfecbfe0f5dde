use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    NotFound,
    OutOfStock,
    AlreadyBorrowed,
    AlreadyReserved,
    MemberHasOverdue,
    MemberNotEligible,
    Consistency,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::OutOfStock => write!(f, "No available copy"),
            KernelError::AlreadyBorrowed => write!(f, "Member already borrows this book"),
            KernelError::AlreadyReserved => write!(f, "Member already reserves this book"),
            KernelError::MemberHasOverdue => write!(f, "Member holds an overdue loan"),
            KernelError::MemberNotEligible => write!(f, "Member is not eligible"),
            KernelError::Consistency => write!(f, "Inventory consistency violated"),
        }
    }
}

impl Context for KernelError {}
