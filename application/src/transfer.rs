mod book;
mod fine;
mod loan;
mod reservation;

pub use self::{book::*, fine::*, loan::*, reservation::*};
