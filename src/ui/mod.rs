pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, file_heading, header, info, muted, section, success, summary_row, warn};
pub use table::{languages_table, records_table, review_table};
pub use theme::{theme, Theme};
