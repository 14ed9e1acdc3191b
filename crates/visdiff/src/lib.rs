//! Visual regression comparison engine.
//!
//! Compares a candidate screenshot against a reference image, honoring a
//! persisted per-pixel mask of regions to ignore. Differences are detected by
//! one of three [`Algorithm`]s and either reported (a marked copy of the
//! candidate, optionally a difference image) or, in training mode, learned
//! into the mask so later runs ignore them.
//!
//! ```no_run
//! use visdiff::{ComparisonConfig, ImageComparison, MaskFile, codec};
//!
//! # fn main() -> visdiff::Result<()> {
//! let engine = ImageComparison::new(ComparisonConfig::default())?;
//! let reference = codec::load("reference.png")?;
//! let candidate = codec::load("candidate.png")?;
//! let mask = MaskFile::new("mask.png");
//! let equal = engine.compare(&reference, &candidate, &mask, "marked.png".as_ref(), None)?;
//! # let _ = equal;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod compare;
pub mod error;

pub use codec::MaskFile;
pub use compare::diff::{ComparisonOutcome, ImageComparison};
pub use compare::mask::Mask;
pub use compare::settings::{Algorithm, ComparisonConfig, TransparencyMode};
pub use error::{ConfigError, Error, Result};
