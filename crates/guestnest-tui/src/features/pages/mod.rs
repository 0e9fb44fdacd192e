//! Page feature: route bodies and their scroll state.

mod render;
mod state;

pub use render::{content_rows, find_stay, lists_stays, page_lines, render_page, stay_at};
pub use state::{PageState, ROW_PX};
