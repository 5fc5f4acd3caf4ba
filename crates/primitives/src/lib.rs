#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/annualize-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod columns;
pub use columns::KeyColumns;

mod hints;
pub use hints::ParseHints;

mod layout;
pub use layout::{DateLayout, LayoutParseError};

mod offset;
pub use offset::{DayMonthOffset, date_from_epoch_days, epoch_days};

mod stats;
pub use stats::ResampleStats;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
