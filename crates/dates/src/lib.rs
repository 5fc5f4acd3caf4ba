#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/annualize-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod parser;
pub use parser::HintedParser;

mod column;
pub use column::{collect_dates, parse_date_column, sort_by_date, try_parse_dates};

mod format;
pub use format::{format_date_column, format_date_values};

mod error;
pub use error::DatesError;
