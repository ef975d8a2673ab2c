//! Compiler for tagged policy patterns
//!
//! A tagged pattern mixes literal text with regex segments enclosed in the
//! policy's tag characters:
//! - `<[0-9]+>` - a pure regex
//! - `books:<\d+>` - literal prefix followed by a regex
//! - `{\d{2}}` - with `{` / `}` tags, nested tags belong to the regex
//!
//! Literal text is escaped, every segment becomes a group and the whole
//! expression is anchored at both ends.

use regex::Regex;

use crate::error::{AbacError, Result};

/// Turns tagged pattern sources into regular expressions
pub struct PatternCompiler;

impl PatternCompiler {
    /// Compile a tagged pattern
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the tags are unbalanced or a segment is not
    /// valid regex syntax.
    ///
    /// # Examples
    /// ```
    /// use abac_rs::PatternCompiler;
    ///
    /// let re = PatternCompiler::compile("<Dog[se]?>", '<', '>').unwrap();
    /// assert!(re.is_match("Doge"));
    /// assert!(!re.is_match("Dogger"));
    /// ```
    pub fn compile(pattern: &str, start_tag: char, end_tag: char) -> Result<Regex> {
        let source = Self::translate(pattern, start_tag, end_tag)?;
        Regex::new(&source).map_err(|e| AbacError::invalid_pattern(pattern, e.to_string()))
    }

    /// Build the anchored regex source for a tagged pattern
    fn translate(pattern: &str, start_tag: char, end_tag: char) -> Result<String> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');

        let mut depth = 0usize;
        let mut literal_start = 0;
        let mut segment_start = 0;

        for (idx, c) in pattern.char_indices() {
            // With identical tags the character closes at depth 1 and opens otherwise
            let closes = c == end_tag && depth > 0 && (c != start_tag || depth == 1);

            if closes {
                depth -= 1;
                if depth == 0 {
                    source.push('(');
                    source.push_str(&pattern[segment_start..idx]);
                    source.push(')');
                    literal_start = idx + c.len_utf8();
                }
            } else if c == start_tag {
                if depth == 0 {
                    source.push_str(&regex::escape(&pattern[literal_start..idx]));
                    segment_start = idx + c.len_utf8();
                }
                depth += 1;
            } else if c == end_tag {
                return Err(AbacError::invalid_pattern(
                    pattern,
                    format!("unexpected {end_tag:?} at byte {idx} without matching {start_tag:?}"),
                ));
            }
        }

        if depth != 0 {
            return Err(AbacError::invalid_pattern(
                pattern,
                format!("unclosed {start_tag:?}, expected {end_tag:?}"),
            ));
        }

        source.push_str(&regex::escape(&pattern[literal_start..]));
        source.push('$');
        Ok(source)
    }
}
