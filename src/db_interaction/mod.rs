mod books;
mod genres;
mod orders;
mod users;

pub use books::*;
pub use genres::*;
pub use orders::*;
pub use users::*;
