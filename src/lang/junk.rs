/// Filler tokens dropped from player input before matching.
pub const JUNK_WORDS: &[&str] = &["the", "a", "an", "at", "to", "some", "please"];
