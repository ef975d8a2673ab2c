//! Tagged regex patterns
//!
//! Policy authors embed regular expressions between the policy's tag
//! characters. `PatternCompiler` turns those sources into `Regex`es and
//! `PatternCache` keeps the most recently used ones around.

mod cache;
mod compiler;

pub use cache::{CacheStats, PatternCache};
pub use compiler::PatternCompiler;
