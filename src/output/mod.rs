pub mod chunking;
pub mod formatter;
pub mod records;
pub mod storage;

pub use chunking::{build_posts, render_post, split_into_posts, DEFAULT_MAX_POST_LEN};
pub use formatter::{
    abbreviate_name, format_driver_table, format_heading, format_team_table, should_use_colors,
};
pub use records::RaceResults;
pub use storage::write_json_record;
