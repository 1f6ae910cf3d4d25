mod formatters;
mod permalink;

pub use formatters::{
    format_instructions, format_items, format_oneline, format_pass, format_report, PrintFormat,
    ReportOptions, GROUP_SIZE,
};
pub use permalink::{Permalink, PermalinkError};
