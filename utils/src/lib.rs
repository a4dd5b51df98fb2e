mod file;
mod logging;
mod nested;
mod render;
mod template_diff;

pub use file::{read_document, read_template_file};
pub use logging::setup_logging;
pub use nested::{find_child_references, ChildReference};
pub use render::{
    parse_diff_count, render_report, RenderOptions, DIFF_COUNT_PREFIX, NO_DIFFERENCES,
};
pub use template_diff::diff_templates;
