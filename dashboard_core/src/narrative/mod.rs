//! Deterministic Turkish commentary built from the same numbers the
//! dashboard shows.
//!
//! Both synthesizers are pure: the same input always yields the same bytes.

pub mod market;
pub mod news;

pub use market::{Bias, Direction, market_commentary};
pub use news::{Tone, news_summary};
