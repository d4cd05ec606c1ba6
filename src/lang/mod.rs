//! Static language tables: filler words, direction names and the default
//! alias data. A [`Language`] is handed to each session at construction so two
//! sessions never share mutable tables.

mod aliases;
mod directions;
mod junk;

pub use directions::Directions;

use crate::engine::AliasData;

#[derive(Debug, Clone)]
pub struct Language {
    pub junk: Vec<String>,
    pub directions: Directions,
    pub aliases: AliasData,
}

impl Language {
    pub fn english() -> Self {
        Language {
            junk: junk::JUNK_WORDS.iter().map(|w| w.to_string()).collect(),
            directions: Directions::english(),
            aliases: aliases::DEFAULT_ALIASES
                .iter()
                .map(|(root, words)| {
                    (
                        root.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}
