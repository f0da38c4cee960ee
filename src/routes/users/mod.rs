mod get;
mod update_role;

pub use get::*;
pub use update_role::*;
