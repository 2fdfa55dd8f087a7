//! Text helpers used by answer fields and headings
//!
//! * [`capitalize`]: locale-aware capitalization of the first cased character.
//! * [`readability`]: grade-level scoring and badge classification.

pub mod capitalize;
pub mod readability;

pub use capitalize::{capitalize, capitalize_in};
pub use readability::{assess, assess_default, Readability, ReadabilityBucket, ReadabilityLabel};
