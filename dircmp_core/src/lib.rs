pub mod hasher;
pub mod matcher;
pub mod reporter;
pub mod scanner;

pub use hasher::fingerprint;
pub use matcher::classify;
pub use reporter::{
    build_json_report, write_json_report, JsonReport, ReportEntry, TextReporter,
    DEFAULT_TERM_WIDTH,
};
pub use scanner::scan;
