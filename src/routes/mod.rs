pub mod authentication;
pub mod books;
pub mod checkout;
pub mod genres;
pub mod health_check;
pub mod orders;
pub mod users;

pub use health_check::*;
