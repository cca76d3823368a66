mod config;
mod diagnostics;
mod document;
mod error;
mod render;
mod routes;
mod utils;
mod value;
mod view;

pub use crate::config::*;
pub use crate::diagnostics::*;
pub use crate::document::*;
pub use crate::error::*;
pub use crate::render::*;
pub use crate::routes::*;
pub use crate::utils::*;
pub use crate::value::*;
pub use crate::view::*;
