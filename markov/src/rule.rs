//! Rewrite rules on text.

use alloc::string::String;
use core::fmt::{self, Display};

/// Separator between pattern and replacement.
pub const ARROW: &str = "->";

/// Suffix marking a terminal rule.
pub const FINAL: &str = "[FINAL]";

const BLANK: &[char] = &[' ', '\t', '\r', '\n'];

/// Rewrite rule `pattern -> replacement`.
///
/// Applying a rule replaces the leftmost occurrence of its pattern by its replacement.
/// If the rule is terminal, its application ends the computation.
///
/// Two rules are considered equal if
/// their patterns and replacements are equal,
/// regardless of whether they are terminal:
///
/// ~~~
/// # use markov::Rule;
/// assert_eq!(Rule::new("a", "b"), Rule::terminal("a", "b"));
/// ~~~
///
/// The pattern should not be empty.
/// An empty pattern, as produced by [`Rule::default`] or by parsing `" -> x"`,
/// matches at the start of every tape, so its replacement is prepended
/// whenever the rule is tried; if it is not terminal, execution never halts.
#[derive(Clone, Debug, Default, Eq)]
pub struct Rule {
    pattern: String,
    replacement: String,
    terminal: bool,
}

impl Rule {
    /// Construct a non-terminal rule.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            terminal: false,
        }
    }

    /// Construct a terminal rule.
    pub fn terminal(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            terminal: true,
            ..Self::new(pattern, replacement)
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into()
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.replacement = replacement.into()
    }

    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal
    }

    /// Parse a rule from its textual representation.
    ///
    /// The line is split at the first arrow.
    /// The right-hand side may end with `[FINAL]`, making the rule terminal.
    /// Surrounding whitespace of both sides is dropped.
    ///
    /// ~~~
    /// # use markov::Rule;
    /// let rule = Rule::parse("\t|+ ->  +| ").unwrap();
    /// assert_eq!((rule.pattern(), rule.replacement()), ("|+", "+|"));
    /// assert!(!rule.is_terminal());
    ///
    /// let rule = Rule::parse("+ -> [FINAL]").unwrap();
    /// assert_eq!((rule.pattern(), rule.replacement()), ("+", ""));
    /// assert!(rule.is_terminal());
    ///
    /// assert_eq!(Rule::parse("no arrow here"), None);
    /// ~~~
    pub fn parse(line: &str) -> Option<Self> {
        let (lhs, rhs) = line.split_once(ARROW)?;
        let rhs = rhs.trim_matches(BLANK);
        let (rhs, terminal) = match rhs.strip_suffix(FINAL) {
            Some(rhs) => (rhs, true),
            None => (rhs, false),
        };
        Some(Self {
            pattern: lhs.trim_matches(BLANK).into(),
            replacement: rhs.trim_matches(BLANK).into(),
            terminal,
        })
    }

    /// Overwrite the rule with the one parsed from the given line.
    ///
    /// If the line contains no arrow, the rule remains untouched and
    /// `false` is returned.
    pub fn read(&mut self, line: &str) -> bool {
        match Self::parse(line) {
            Some(rule) => {
                *self = rule;
                true
            }
            None => false,
        }
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.replacement == other.replacement
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.pattern, ARROW, self.replacement)?;
        if self.terminal {
            write!(f, " {}", FINAL)?;
        }
        Ok(())
    }
}

#[test]
fn display() {
    use alloc::string::ToString;
    assert_eq!(Rule::new("|+", "+|").to_string(), "|+ -> +|");
    assert_eq!(Rule::terminal("+", "").to_string(), "+ ->  [FINAL]");
    assert_eq!(Rule::new("a", "").to_string(), "a -> ");
}

#[test]
fn parse_display() {
    use alloc::string::ToString;
    for rule in [Rule::new("ab", "ba"), Rule::terminal("x", "yz"), Rule::terminal("+", "")] {
        let parsed = Rule::parse(&rule.to_string()).unwrap();
        assert_eq!(parsed, rule);
        assert_eq!(parsed.is_terminal(), rule.is_terminal());
    }
}

#[test]
fn parse_first_arrow() {
    let rule = Rule::parse("a -> b -> c").unwrap();
    assert_eq!(rule.pattern(), "a");
    assert_eq!(rule.replacement(), "b -> c");
}

#[test]
fn parse_final_with_spacing() {
    let rule = Rule::parse("a->b[FINAL]\r").unwrap();
    assert_eq!((rule.pattern(), rule.replacement()), ("a", "b"));
    assert!(rule.is_terminal());

    // marker only counts at the end
    let rule = Rule::parse("a -> [FINAL] b").unwrap();
    assert_eq!(rule.replacement(), "[FINAL] b");
    assert!(!rule.is_terminal());
}

#[test]
fn read_malformed() {
    let mut rule = Rule::terminal("initial", "initial");
    assert!(!rule.read("invalid format without arrow"));
    assert_eq!(rule.pattern(), "initial");
    assert_eq!(rule.replacement(), "initial");
    assert!(rule.is_terminal());

    assert!(rule.read("a -> b"));
    assert_eq!((rule.pattern(), rule.replacement()), ("a", "b"));
    assert!(!rule.is_terminal());
}

#[test]
fn equality_ignores_terminal() {
    assert_eq!(Rule::new("a", "b"), Rule::terminal("a", "b"));
    assert_ne!(Rule::new("a", "b"), Rule::new("a", "c"));
    assert_ne!(Rule::new("a", "b"), Rule::new("b", "b"));
}

#[test]
fn parse_empty_pattern() {
    let rule = Rule::parse(" -> x").unwrap();
    assert_eq!((rule.pattern(), rule.replacement()), ("", "x"));
    assert_eq!(Rule::default().pattern(), "");
}
