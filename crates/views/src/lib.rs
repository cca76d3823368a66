mod context;
mod error;
mod profile;
mod records;
mod store;
mod subtitle;

pub use crate::context::*;
pub use crate::error::*;
pub use crate::profile::*;
pub use crate::records::*;
pub use crate::store::*;
pub use crate::subtitle::*;
