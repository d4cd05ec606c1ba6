use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

lazy_static! {
    static ref SINGLE_WORD: Regex = Regex::new(r"^\w+$").expect("Invalid Regex");
}

/// Alias source data as written by authors: `root -> aliases`.
pub type AliasData = Vec<(String, Vec<String>)>;

/// Flat `alias -> root` substitution table. Lookups are single tokens; there is
/// no chaining, so a root is never looked up again.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    roots: HashMap<String, String>,
}

impl AliasTable {
    /// Defaults first, then world data, so world aliases win on conflicts.
    pub fn build(defaults: &AliasData, world: &AliasData) -> Self {
        let mut table = AliasTable::default();
        table.merge(defaults);
        table.merge(world);
        table
    }

    pub fn merge(&mut self, data: &AliasData) {
        for (root, aliases) in data {
            let root = root.trim().to_lowercase();
            for alias in aliases {
                let alias = alias.trim().to_lowercase();
                if !is_single_token(&alias) {
                    warn!("skipping alias '{}' for '{}': not a single word", alias, root);
                    continue;
                }
                if let Some(prev) = self.roots.insert(alias.clone(), root.clone()) {
                    if prev != root {
                        debug!("alias '{}' rebound from '{}' to '{}'", alias, prev, root);
                    }
                }
            }
        }
    }

    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.roots.get(token).map(|r| r.as_str()).unwrap_or(token)
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.roots.get(alias).map(|r| r.as_str())
    }

    /// Keep only the `alias -> root` pairs `keep` accepts.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.roots.retain(|alias, root| keep(alias, root));
    }

    pub fn contains_alias(&self, token: &str) -> bool {
        self.roots.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Same notion of a word as the normalizer's tokenizer.
fn is_single_token(s: &str) -> bool {
    SINGLE_WORD.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &[&str])]) -> AliasData {
        pairs
            .iter()
            .map(|(r, a)| (r.to_string(), a.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn inverts_root_to_alias_mapping() {
        let table = AliasTable::build(&data(&[("take", &["get", "grab"])]), &Vec::new());
        assert_eq!(table.get("get"), Some("take"));
        assert_eq!(table.get("grab"), Some("take"));
        assert_eq!(table.get("take"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn world_data_overrides_defaults() {
        let defaults = data(&[("take", &["get"])]);
        let world = data(&[("fetch", &["get"])]);
        let table = AliasTable::build(&defaults, &world);
        assert_eq!(table.get("get"), Some("fetch"));
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let table = AliasTable::build(&data(&[("take", &["get"])]), &Vec::new());
        assert_eq!(table.resolve("lamp"), "lamp");
        assert_eq!(table.resolve("get"), "take");
    }

    #[test]
    fn aliases_are_lowercased_and_multiword_entries_skipped() {
        let table = AliasTable::build(&data(&[("Look", &["L", "peer at"])]), &Vec::new());
        assert_eq!(table.get("l"), Some("look"));
        assert_eq!(table.get("peer at"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn word_characters_follow_the_tokenizer() {
        // combining acute accent and connector punctuation are word characters
        let table = AliasTable::build(
            &data(&[("cafe", &["cafe\u{301}", "snake\u{203f}case", "a-b", ""])]),
            &Vec::new(),
        );
        assert!(table.contains_alias("cafe\u{301}"));
        assert!(table.contains_alias("snake\u{203f}case"));
        assert!(!table.contains_alias("a-b"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn retain_drops_rejected_pairs() {
        let mut table = AliasTable::build(&data(&[("take", &["get", "grab"])]), &Vec::new());
        assert!(!table.is_empty());
        table.retain(|alias, _| alias != "grab");
        assert_eq!(table.get("grab"), None);
        assert_eq!(table.get("get"), Some("take"));

        table.retain(|_, _| false);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_root_is_allowed() {
        let table = AliasTable::build(&data(&[("", &["go"])]), &Vec::new());
        assert_eq!(table.get("go"), Some(""));
    }
}
