//! Path variable rules shared by the routes taking a function name.

use once_cell::sync::Lazy;
use regex::Regex;

static PATH_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z_0-9]+$").expect("valid regex"));

/// Reports whether `name` may appear as `{name}` in a function route.
pub fn is_valid_path_name(name: &str) -> bool {
    PATH_NAME.is_match(name)
}
