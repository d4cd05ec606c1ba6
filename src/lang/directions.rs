use std::collections::HashMap;

/// Short direction token -> full name ("n" -> "north").
#[derive(Debug, Clone, Default)]
pub struct Directions {
    names: HashMap<String, String>,
}

impl Directions {
    pub fn english() -> Self {
        let pairs = [
            ("n", "north"),
            ("s", "south"),
            ("e", "east"),
            ("w", "west"),
            ("ne", "northeast"),
            ("nw", "northwest"),
            ("se", "southeast"),
            ("sw", "southwest"),
            ("u", "up"),
            ("d", "down"),
        ];

        Directions {
            names: pairs
                .iter()
                .map(|(short, full)| (short.to_string(), full.to_string()))
                .collect(),
        }
    }

    pub fn insert(&mut self, short: impl Into<String>, full: impl Into<String>) {
        self.names.insert(short.into(), full.into());
    }

    pub fn full_name(&self, short: &str) -> Option<&str> {
        self.names.get(short).map(|s| s.as_str())
    }
}
