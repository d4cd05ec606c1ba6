use std::collections::HashSet;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::engine::aliases::AliasTable;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("Invalid Regex");
}

/// Turns raw player text into the canonical command form every resolver
/// compares against. Action phrases go through the same pipeline.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    junk: HashSet<String>,
    aliases: AliasTable,
}

impl Normalizer {
    /// An alias whose root contains a junk word or another alias would be
    /// rewritten again on a second pass, so it is dropped here with a warning.
    pub fn new<I, S>(junk: I, mut aliases: AliasTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let junk: HashSet<String> = junk
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let keys = aliases.clone();
        aliases.retain(|alias, root| {
            let unstable = NON_WORD
                .split(root)
                .filter(|t| !t.is_empty())
                .find(|t| junk.contains(*t) || keys.contains_alias(t));
            match unstable {
                Some(token) => {
                    warn!(
                        "dropping alias '{}' for '{}': '{}' would be rewritten again",
                        alias, root, token
                    );
                    false
                }
                None => true,
            }
        });

        Normalizer { junk, aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn is_junk(&self, token: &str) -> bool {
        self.junk.contains(token)
    }

    pub fn normalize(&self, raw: &str) -> String {
        let input = raw.trim().to_lowercase();
        let input = collapse(&input);
        let input = self.remove_junk(&input);
        let input = collapse(&input);
        let input = self.resolve_aliases(&input);
        collapse(&input)
    }

    fn remove_junk(&self, input: &str) -> String {
        input
            .split(' ')
            .filter(|word| !self.junk.contains(*word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn resolve_aliases(&self, input: &str) -> String {
        input
            .split(' ')
            .map(|word| self.aliases.resolve(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Every run of non-word characters becomes one space; the ends are trimmed so
/// the result is a plain space-separated token list.
fn collapse(input: &str) -> String {
    NON_WORD.replace_all(input, " ").trim().to_string()
}
