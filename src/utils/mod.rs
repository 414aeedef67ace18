pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{build_search_url, normalize_base_url};
