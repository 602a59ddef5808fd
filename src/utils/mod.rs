pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{is_same_origin, is_valid_url, normalize_page_url, resolve_url};
