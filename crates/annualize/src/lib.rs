//! # annualize
//!
//! Grouped annual resampling of date columns.
//!
//! This crate provides a unified interface to the annualize crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Trait abstractions
//! - `dates`: Date parsing and rendering
//! - `resample`: Yearly expansion and the fit/transform lifecycle
//! - `utils`: Frame utilities
//!
//! ## Example
//!
//! ```rust,ignore
//! use annualize::resample::{TransformOptions, YearlyResampler};
//!
//! let run = YearlyResampler::fit_transform(
//!     &table,
//!     "date",
//!     "id",
//!     &TransformOptions::new().with_day_first(true).with_output_format("%d/%m/%Y"),
//! )?;
//! let everything = run.append_excluded()?;
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/annualize-rs/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use annualize_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use annualize_traits as traits;
#[cfg(feature = "dates")]
#[doc(inline)]
pub use annualize_dates as dates;
#[cfg(feature = "resample")]
#[doc(inline)]
pub use annualize_resample as resample;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use annualize_utils as utils;
