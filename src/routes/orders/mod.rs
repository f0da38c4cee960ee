mod delete;
mod get;
mod update;

pub use delete::*;
pub use get::*;
pub use update::*;
