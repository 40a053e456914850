//! Ordered sequences of rewrite rules.

use crate::{Error, Rule};
use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::iter::FromIterator;

/// Ordered sequence of rewrite rules without duplicates.
///
/// The order of rules determines their priority:
/// when executing, the first rule whose pattern occurs in the tape is applied.
///
/// ~~~
/// # use markov::{Program, Rule};
/// let mut prog = Program::new();
/// assert!(prog.add_rule(Rule::new("a", "b")));
/// // rules are compared without regard to being terminal
/// assert!(!prog.add_rule(Rule::terminal("a", "b")));
/// assert_eq!(prog.len(), 1);
/// ~~~
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    rules: Vec<Rule>,
}

impl Program {
    /// Construct an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule unless an equal rule is already present.
    ///
    /// Return true if the rule was appended.
    pub fn add_rule(&mut self, rule: Rule) -> bool {
        if self.rules.contains(&rule) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Remove the rule at the given index, if there is any.
    pub fn remove(&mut self, index: usize) -> Option<Rule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Remove the first rule with the given pattern and replacement.
    ///
    /// Return true if a rule was removed.
    pub fn remove_rule(&mut self, pattern: &str, replacement: &str) -> bool {
        let pos = self
            .rules
            .iter()
            .position(|r| r.pattern() == pattern && r.replacement() == replacement);
        pos.map(|i| self.rules.remove(i)).is_some()
    }

    /// Return the rule at the given index.
    ///
    /// ~~~
    /// # use markov::{Error, Program, Rule};
    /// let prog: Program = [Rule::new("a", "b")].into_iter().collect();
    /// assert_eq!(prog.get(0)?.pattern(), "a");
    /// assert_eq!(prog.get(5), Err(Error::OutOfRange { index: 5, len: 1 }));
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn get(&self, index: usize) -> Result<&Rule, Error> {
        let len = self.rules.len();
        self.rules.get(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Replace the rule at the given index.
    ///
    /// This does not check whether the new rule duplicates another one.
    /// Return true if the index was valid.
    pub fn modify(
        &mut self,
        index: usize,
        pattern: &str,
        replacement: &str,
        terminal: bool,
    ) -> bool {
        match self.rules.get_mut(index) {
            Some(rule) => {
                *rule = Rule::new(pattern, replacement);
                rule.set_terminal(terminal);
                true
            }
            None => false,
        }
    }

    /// Return the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Return true if the program contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Remove all rules.
    pub fn clear(&mut self) {
        self.rules.clear()
    }

    /// Iterate through the rules in order of priority.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Find the first rule whose pattern occurs in the tape,
    /// together with the byte offset of the leftmost occurrence.
    pub fn find(&self, tape: &str) -> Option<(usize, &Rule)> {
        self.rules
            .iter()
            .find_map(|rule| Some((tape.find(rule.pattern())?, rule)))
    }

    /// Replace all rules by those read from lines.
    ///
    /// Reading stops after the first empty line, such that
    /// the remaining lines can be consumed by the caller.
    /// Lines without arrow are skipped.
    pub fn read_lines<S: AsRef<str>>(&mut self, lines: &mut impl Iterator<Item = S>) {
        self.clear();
        for line in lines {
            let line = line.as_ref().trim_end_matches('\r');
            if line.is_empty() {
                break;
            }
            match Rule::parse(line) {
                Some(rule) => {
                    self.add_rule(rule);
                }
                None => warn!("skipping rule without arrow: {}", line),
            }
        }
        debug!("read {} rules", self.len())
    }

    /// Parse a program from text with one rule per line.
    ///
    /// ~~~
    /// # use markov::Program;
    /// let prog = Program::parse("|+ -> +|\n+ ->  [FINAL]\n");
    /// assert_eq!(prog.len(), 2);
    /// assert_eq!(prog.to_string(), "|+ -> +|\n+ ->  [FINAL]\n");
    /// ~~~
    pub fn parse(text: &str) -> Self {
        let mut prog = Self::new();
        prog.read_lines(&mut text.lines());
        prog
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.rules.iter().try_for_each(|rule| writeln!(f, "{}", rule))
    }
}

impl Extend<Rule> for Program {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        iter.into_iter().for_each(|rule| {
            self.add_rule(rule);
        })
    }
}

impl FromIterator<Rule> for Program {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut prog = Self::new();
        prog.extend(iter);
        prog
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Rule;
    type IntoIter = core::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
fn unary_addition() -> Program {
    [Rule::new("|+", "+|"), Rule::terminal("+", "")]
        .into_iter()
        .collect()
}

#[test]
fn add_duplicate() {
    let mut prog = Program::new();
    assert!(prog.add_rule(Rule::new("a", "b")));
    assert!(!prog.add_rule(Rule::new("a", "b")));
    assert_eq!(prog.len(), 1);
    assert!(prog.add_rule(Rule::new("a", "c")));
    assert_eq!(prog.len(), 2);
}

#[test]
fn remove_index() {
    let mut prog: Program = [Rule::new("a", "b")].into_iter().collect();
    assert_eq!(prog.remove(5), None);
    assert_eq!(prog.len(), 1);
    assert_eq!(prog.remove(0), Some(Rule::new("a", "b")));
    assert!(prog.is_empty());
}

#[test]
fn remove_pair() {
    let mut prog = unary_addition();
    assert!(!prog.remove_rule("|+", ""));
    assert!(prog.remove_rule("|+", "+|"));
    assert_eq!(prog.len(), 1);
    assert_eq!(prog.get(0).unwrap().pattern(), "+");
}

#[test]
fn get_out_of_range() {
    let prog: Program = [Rule::new("a", "b")].into_iter().collect();
    assert!(prog.get(0).is_ok());
    assert_eq!(prog.get(1), Err(Error::OutOfRange { index: 1, len: 1 }));
    assert_eq!(prog.get(5), Err(Error::OutOfRange { index: 5, len: 1 }));
}

#[test]
fn modify_bypasses_dedup() {
    let mut prog = unary_addition();
    assert!(prog.modify(1, "|+", "+|", true));
    assert_eq!(prog.len(), 2);
    assert!(prog.get(1).unwrap().is_terminal());
    assert!(!prog.modify(2, "x", "y", false));
    assert_eq!(prog.len(), 2);
}

#[test]
fn find_priority() {
    let prog = unary_addition();
    let (pos, rule) = prog.find("||+|").unwrap();
    assert_eq!((pos, rule.pattern()), (1, "|+"));
    let (pos, rule) = prog.find("+||").unwrap();
    assert_eq!((pos, rule.pattern()), (0, "+"));
    assert!(prog.find("|||").is_none());
}

#[test]
fn read_lines_stops_at_blank() {
    let text = "a -> b\nb -> c [FINAL]\n\nc -> d\n";
    let mut lines = text.lines();
    let mut prog = unary_addition();
    prog.read_lines(&mut lines);
    assert_eq!(prog.len(), 2);
    assert_eq!(prog.get(0).unwrap(), &Rule::new("a", "b"));
    assert!(prog.get(1).unwrap().is_terminal());
    assert_eq!(lines.next(), Some("c -> d"));
}

#[test]
fn read_lines_dedup_and_malformed() {
    let prog = Program::parse("a -> b\nnonsense\na -> b [FINAL]\r\nb -> a\r\n");
    assert_eq!(prog.len(), 2);
    assert!(!prog.get(0).unwrap().is_terminal());
    assert_eq!(prog.get(1).unwrap(), &Rule::new("b", "a"));
}

#[test]
fn display_parse() {
    use alloc::string::ToString;
    let prog = unary_addition();
    assert_eq!(Program::parse(&prog.to_string()), prog);
    assert_eq!(Program::new().to_string(), "");
}
