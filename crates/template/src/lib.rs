//! Kontura Template Format
//!
//! Reads and writes page layouts as XML templates. Loading builds a
//! fresh page and fails loudly on any malformed input, so a broken file
//! never partially applies to an existing layout.

mod error;
mod factory;
mod reader;
mod writer;

pub use error::{TemplateError, TemplateResult};
pub use factory::element_name;
pub use reader::{load_template, parse_template};
pub use writer::{save_template, write_template};
