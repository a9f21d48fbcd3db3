pub mod string_util;

pub use string_util::{StripCodeBlock, extract_json_object};
