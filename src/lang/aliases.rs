/// Default `root -> aliases` data. An empty root deletes the alias token, so
/// "go north" and "walk north" both reach the resolver as "north".
///
/// Roots here must not appear as aliases or junk words, otherwise a second
/// normalization pass would rewrite them again.
pub const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    ("", &["go", "walk", "run"]),
    ("take", &["get", "grab"]),
    ("drop", &["discard", "toss"]),
    ("inventory", &["inv"]),
    ("look", &["l"]),
    ("examine", &["x", "inspect"]),
];
