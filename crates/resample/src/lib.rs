#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/annualize-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod expander;
pub use expander::{ExpanderConfig, YearlyExpander};

mod lifecycle;
pub use lifecycle::{Fitted, Transformed, YearlyResampler};

mod prepare;
pub use prepare::{Prepared, prepare};

mod options;
pub use options::TransformOptions;

mod error;
pub use error::PipelineError;

/// Re-export commonly used types.
pub mod prelude {
    pub use annualize_primitives::{DateLayout, KeyColumns, ParseHints, ResampleStats};
    pub use annualize_traits::{DateParser, Resampler};

    pub use super::{PipelineError, TransformOptions, YearlyExpander, YearlyResampler};
}
