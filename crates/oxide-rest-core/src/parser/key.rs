//! Key grammar: `[NUM:][!][|]NAME[[SUBFIELD]]...`

use std::sync::LazyLock;

use regex::Regex;

use crate::clause::Separator;

static KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+):)?([:!|]*)([0-9A-Za-z<=>_-]+)((?:\[[^\[\]]*\])*)$")
        .expect("Invalid key grammar regex")
});

static SUBFIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*)\]").expect("Invalid subfield regex")
});

/// The structured form of one query-string key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyToken {
    /// Explicit ordering number, if the key carried one.
    pub number: Option<u64>,
    /// `:` was present: `name` is an instruction and the field is bracketed.
    pub named: bool,
    /// `!` was present.
    pub negative: bool,
    /// `|` selects OR, otherwise AND.
    pub separator: Separator,
    /// Instruction name (named) or field name (plain).
    pub name: String,
    /// Bracketed subfields in order; `[]` yields an empty string.
    pub subfields: Vec<String>,
}

impl KeyToken {
    /// Tokenizes a decoded key. Returns `None` if it does not match the grammar.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let caps = KEY.captures(key)?;
        // An ordering number that does not fit counts as absent.
        let number = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let flags = caps.get(2).map_or("", |m| m.as_str());
        let brackets = caps.get(4).map_or("", |m| m.as_str());

        Some(Self {
            number,
            named: caps.get(1).is_some() || flags.contains(':'),
            negative: flags.contains('!'),
            separator: if flags.contains('|') {
                Separator::Or
            } else {
                Separator::And
            },
            name: caps[3].to_string(),
            subfields: SUBFIELD
                .captures_iter(brackets)
                .map(|c| c[1].to_string())
                .collect(),
        })
    }

    /// Returns the first subfield if it is non-empty.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.subfields
            .first()
            .map(String::as_str)
            .filter(|f| !f.is_empty())
    }
}
