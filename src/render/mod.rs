//! Rendering module for turning extraction results into text and JSON.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{page_delimiter, report, to_text, RULE_WIDTH};
