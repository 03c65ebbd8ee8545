//! Helper functions for page rendering
//!
//! These functions back the templates and provide route activation,
//! URL generation, date display and small HTML builders.

mod date;
mod html;
mod pager;
mod url;

pub use date::*;
pub use html::*;
pub use pager::*;
pub use url::*;
