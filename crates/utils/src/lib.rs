#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/annualize-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod columns;
pub use columns::require_columns;

mod blank;
pub use blank::normalize_blank;

mod partition;
pub use partition::{Partition, partition_rows};

mod append;
pub use append::append_rows;

mod error;
pub use error::UtilsError;
