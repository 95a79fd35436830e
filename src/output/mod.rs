pub mod formatter;
pub mod report;

pub use formatter::{
    format_footer, format_header, format_report, format_result_line, format_results, format_summary,
    should_use_colors,
};
pub use report::{render_json, write_report, JsonReport};
