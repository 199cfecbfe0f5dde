mod book;
mod fine;
mod loan;
mod member;
mod reservation;

pub use self::{book::*, fine::*, loan::*, member::*, reservation::*};
