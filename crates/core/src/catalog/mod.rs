//! Read-only practice-content catalogs: fixed selection pools loaded at
//! compile time, never mutated.

mod drills;
mod quotes;

pub use drills::{DRILL_SENTENCES, DrillCategory, DrillCategoryInfo, DrillSentence, drills_in};
pub use quotes::{Difficulty, QUOTES, Quote, QuoteCategory, quotes_in};
