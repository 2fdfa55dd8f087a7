//! Locale-aware text and time utilities behind the Namesake name-change guide.
//!
//! * [`relative`]: "2 hours ago" style relative timestamps.
//! * [`text`]: first-letter capitalization and readability grading.
//! * [`poll`]: wait for a condition on a fixed cadence.
//!
//! The binary wraps these in a CLI and an interactive terminal preview.

pub mod app;
pub mod config;
pub mod locale;
pub mod poll;
pub mod relative;
pub mod text;
pub mod theme;
pub mod ui;

pub use locale::LocaleTag;
pub use poll::{wait_for, PollError, Poller};
pub use relative::{format_relative, time_ago, RelativeTimeUnit};
pub use text::{assess, capitalize, Readability, ReadabilityBucket, ReadabilityLabel};
