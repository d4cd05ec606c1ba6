use serde::Serialize;

/// One piece of player-visible text, tagged with how a front end should style
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text")]
pub enum OutputBlock {
    Title(String),
    Text(String),
    Exits(String),
}

/// Narration sink for a single command. The engine only ever appends.
#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Title(s));
        }
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn set_exits(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // only one Exits block per command, always after the text it belongs to
        self.blocks.retain(|b| !matches!(b, OutputBlock::Exits(_)));
        self.blocks.push(OutputBlock::Exits(s));
    }

    /// Plain text of every block, in order. Handy for logs and tests.
    pub fn lines(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .map(|b| match b {
                OutputBlock::Title(s) | OutputBlock::Text(s) | OutputBlock::Exits(s) => s.as_str(),
            })
            .collect()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lines().iter().any(|l| *l == text)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_ignored() {
        let mut out = Output::new();
        out.say("   ");
        out.title("");
        assert!(out.is_empty());
    }

    #[test]
    fn exits_block_is_replaced_not_duplicated() {
        let mut out = Output::new();
        out.set_exits("Exits: n");
        out.say("Something happens.");
        out.set_exits("Exits: s");
        assert_eq!(
            out.blocks,
            vec![
                OutputBlock::Text("Something happens.".to_string()),
                OutputBlock::Exits("Exits: s".to_string()),
            ]
        );
    }
}
