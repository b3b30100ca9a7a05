pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_question_list, format_result, format_score_line,
    format_tsv, should_use_colors,
};
