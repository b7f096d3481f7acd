//! XML utilities for navigating the archive's DOM.

mod utils;

pub use utils::{child_text, find_child, get_tag_name};
