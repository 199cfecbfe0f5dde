mod author;
mod category;
mod copies;
mod id;
mod isbn;
mod status;
mod title;

pub use self::{author::*, category::*, copies::*, id::*, isbn::*, status::*, title::*};
use destructure::Destructure;
use error_stack::Report;

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Isbn,
    category: BookCategory,
    total_copies: CopyCount,
    available_copies: CopyCount,
    status: BookStatus,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: Isbn,
        category: BookCategory,
        total_copies: CopyCount,
        available_copies: CopyCount,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            category,
            total_copies,
            available_copies,
            status,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn author(&self) -> &BookAuthor {
        &self.author
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn category(&self) -> &BookCategory {
        &self.category
    }

    pub fn total_copies(&self) -> CopyCount {
        self.total_copies
    }

    pub fn available_copies(&self) -> CopyCount {
        self.available_copies
    }

    pub fn status(&self) -> &BookStatus {
        &self.status
    }

    /// Hands one copy out. The caller must refresh the status afterwards.
    pub fn take_copy(&mut self) -> error_stack::Result<(), KernelError> {
        let available = self.available_copies.get();
        if available == 0 {
            return Err(Report::new(KernelError::OutOfStock)
                .attach_printable(format!("book {:?} has no available copy", self.id)));
        }
        self.available_copies = CopyCount::new(available - 1);
        Ok(())
    }

    /// Accepts one copy back. Exceeding the registered total means the
    /// stored records disagree with reality and must not be papered over.
    pub fn return_copy(&mut self) -> error_stack::Result<(), KernelError> {
        let available = self.available_copies.get();
        if available >= self.total_copies.get() {
            return Err(Report::new(KernelError::Consistency).attach_printable(format!(
                "book {:?} already has all {} copies on the shelf",
                self.id,
                self.total_copies.get()
            )));
        }
        self.available_copies = CopyCount::new(available + 1);
        Ok(())
    }

    /// Available while a copy is on the shelf; otherwise reserved when a
    /// waitlist exists, borrowed when it does not.
    pub fn refresh_status(&mut self, has_waitlist: bool) {
        self.status = if self.available_copies.get() > 0 {
            BookStatus::Available
        } else if has_waitlist {
            BookStatus::Reserved
        } else {
            BookStatus::Borrowed
        };
    }
}
