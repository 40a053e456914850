//! Execution of programs on a tape.

use crate::Program;
use alloc::string::String;
use core::fmt::{self, Display};
use core::ops::ControlFlow;

/// Reason for a machine to stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// A terminal rule was applied.
    FinalRule,
    /// No rule pattern occurs in the tape.
    NoMatch,
}

/// Execution state of a machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted(Halt),
}

/// A program together with the tape it rewrites.
///
/// ~~~
/// # use markov::{Halt, Machine, Program};
/// let prog = Program::parse("|+ -> +|\n+ -> [FINAL]");
/// let mut m = Machine::with(prog, "||+|||");
/// assert_eq!(m.run_with(false, |_| ()), Halt::FinalRule);
/// assert_eq!(m.tape(), "|||||");
/// assert_eq!(m.steps(), 3);
/// assert_eq!(m.to_string(), "Step: 3, Tape: |||||");
/// ~~~
#[derive(Clone, Debug)]
pub struct Machine {
    program: Program,
    tape: String,
    step: usize,
    state: State,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            program: Program::new(),
            tape: String::new(),
            step: 0,
            state: State::Running,
        }
    }
}

impl Machine {
    /// Construct a machine with empty program and empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a machine with given program and tape.
    pub fn with(program: Program, tape: impl Into<String>) -> Self {
        let mut m = Self::new();
        m.load_program(program);
        m.load_tape(tape);
        m
    }

    /// Replace the program.
    ///
    /// A halted machine resumes running, because the new rules might match.
    pub fn load_program(&mut self, program: Program) {
        self.program = program;
        self.state = State::Running;
    }

    /// Replace the tape and reset the step counter.
    ///
    /// Tapes may contain line breaks, but such tapes cannot be saved.
    pub fn load_tape(&mut self, tape: impl Into<String>) {
        self.tape = tape.into();
        self.step = 0;
        self.state = State::Running;
        debug!("load tape: {}", self.tape)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Mutable access to the program.
    ///
    /// A machine halted for lack of a matching rule
    /// tries the changed rules on its next step.
    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn tape(&self) -> &str {
        &self.tape
    }

    /// Return the number of rule applications since the tape was loaded.
    pub fn steps(&self) -> usize {
        self.step
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Return true if the machine halted.
    pub fn is_halted(&self) -> bool {
        matches!(self.state, State::Halted(_))
    }

    /// Apply the first rule that matches the tape.
    ///
    /// Only the leftmost occurrence of the rule pattern is replaced.
    /// Return `Break` if the machine halted, either because
    /// the applied rule was terminal or because no rule matched.
    /// In the latter case, as well as when a terminal rule was applied before,
    /// neither tape nor step counter change.
    ///
    /// ~~~
    /// # use markov::{Halt, Machine, Program};
    /// # use core::ops::ControlFlow;
    /// let prog = Program::parse("|+ -> +|\n+ -> [FINAL]");
    /// let mut m = Machine::with(prog, "||+||");
    /// assert_eq!(m.step(), ControlFlow::Continue(()));
    /// assert_eq!((m.tape(), m.steps()), ("|+|||", 1));
    ///
    /// m.load_tape("||");
    /// assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    /// assert_eq!((m.tape(), m.steps()), ("||", 0));
    /// ~~~
    pub fn step(&mut self) -> ControlFlow<Halt> {
        if let State::Halted(Halt::FinalRule) = self.state {
            return ControlFlow::Break(Halt::FinalRule);
        }

        let (pos, rule) = match self.program.find(&self.tape) {
            Some(found) => found,
            None => {
                debug!("no rule matches after {} steps", self.step);
                self.state = State::Halted(Halt::NoMatch);
                return ControlFlow::Break(Halt::NoMatch);
            }
        };

        trace!("apply {} at {}", rule, pos);
        let end = pos + rule.pattern().len();
        self.tape.replace_range(pos..end, rule.replacement());
        self.step += 1;

        if rule.is_terminal() {
            debug!("terminal rule applied after {} steps", self.step);
            self.state = State::Halted(Halt::FinalRule);
            ControlFlow::Break(Halt::FinalRule)
        } else {
            self.state = State::Running;
            ControlFlow::Continue(())
        }
    }

    /// Step until the machine halts.
    ///
    /// If `each_step` is true, `emit` is called after every step
    /// (including the final one), otherwise only once after halting.
    ///
    /// There is no bound on the number of steps, so
    /// this does not return for programs that rewrite forever.
    /// See [`Machine::run_for`] for a bounded alternative.
    pub fn run_with<F: FnMut(&Self)>(&mut self, each_step: bool, mut emit: F) -> Halt {
        loop {
            let flow = self.step();
            if each_step {
                emit(self)
            }
            if let ControlFlow::Break(halt) = flow {
                if !each_step {
                    emit(self)
                }
                return halt;
            }
        }
    }

    /// Step until the machine halts, printing its state to standard output.
    ///
    /// If `emit_log` is true, the state is printed after every step,
    /// otherwise only once after halting.
    #[cfg(feature = "std")]
    pub fn run(&mut self, emit_log: bool) -> Halt {
        self.run_with(emit_log, |m| std::println!("{}", m))
    }

    /// Step until the machine halts or `max_steps` steps were performed.
    ///
    /// Return `None` if the machine is still running afterwards.
    ///
    /// ~~~
    /// # use markov::{Halt, Machine, Program};
    /// let mut m = Machine::with(Program::parse("a -> aa"), "a");
    /// assert_eq!(m.run_for(10), None);
    /// assert_eq!((m.tape().len(), m.steps()), (11, 10));
    /// ~~~
    pub fn run_for(&mut self, max_steps: usize) -> Option<Halt> {
        for _ in 0..max_steps {
            if let ControlFlow::Break(halt) = self.step() {
                return Some(halt);
            }
        }
        match self.state {
            State::Halted(halt) => Some(halt),
            State::Running => None,
        }
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Step: {}, Tape: {}", self.step, self.tape)
    }
}

#[cfg(test)]
fn unary_addition() -> Program {
    Program::parse("|+ -> +|\n+ -> [FINAL]")
}

#[test]
fn empty() {
    use alloc::string::ToString;
    let mut m = Machine::new();
    assert_eq!(m.to_string(), "Step: 0, Tape: ");
    assert_eq!(m.state(), State::Running);
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    assert_eq!(m.state(), State::Halted(Halt::NoMatch));
}

#[test]
fn run_addition() {
    let mut m = Machine::with(unary_addition(), "||+|||");
    assert_eq!(m.run_with(false, |_| ()), Halt::FinalRule);
    assert_eq!(m.tape(), "|||||");
    assert_eq!(m.steps(), 3);
    assert!(m.is_halted());
}

#[test]
fn leftmost_only() {
    let mut m = Machine::with(Program::parse("ab -> x"), "abab");
    assert_eq!(m.step(), ControlFlow::Continue(()));
    assert_eq!(m.tape(), "xab");
    assert_eq!(m.step(), ControlFlow::Continue(()));
    assert_eq!(m.tape(), "xx");
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    assert_eq!((m.tape(), m.steps()), ("xx", 2));
}

#[test]
fn halted_is_final() {
    let mut m = Machine::with(Program::parse("a -> b [FINAL]"), "aa");
    assert_eq!(m.step(), ControlFlow::Break(Halt::FinalRule));
    assert_eq!(m.step(), ControlFlow::Break(Halt::FinalRule));
    assert_eq!((m.tape(), m.steps()), ("ba", 1));

    m.load_tape("aa");
    assert_eq!(m.state(), State::Running);
    assert_eq!(m.step(), ControlFlow::Break(Halt::FinalRule));
    assert_eq!((m.tape(), m.steps()), ("ba", 1));
}

#[test]
fn load_program_resumes() {
    let mut m = Machine::with(Program::parse("x -> y"), "ab");
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    m.load_program(Program::parse("a -> c"));
    assert_eq!(m.steps(), 0);
    assert_eq!(m.step(), ControlFlow::Continue(()));
    assert_eq!(m.tape(), "cb");
}

#[test]
fn edited_program_resumes() {
    use crate::Rule;
    let mut m = Machine::with(Program::parse("x -> y"), "ab");
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    m.program_mut().add_rule(Rule::new("a", "c"));
    assert_eq!(m.step(), ControlFlow::Continue(()));
    assert_eq!(m.state(), State::Running);
    assert_eq!((m.tape(), m.steps()), ("cb", 1));

    // a terminal halt stays even if the rules change
    m.program_mut().add_rule(Rule::terminal("c", "d"));
    assert_eq!(m.step(), ControlFlow::Break(Halt::FinalRule));
    m.program_mut().add_rule(Rule::new("b", "e"));
    assert_eq!(m.step(), ControlFlow::Break(Halt::FinalRule));
    assert_eq!((m.tape(), m.steps()), ("db", 2));
}

#[test]
fn empty_pattern_prepends() {
    use crate::Rule;
    let prog: Program = [Rule::new("", "x")].into_iter().collect();
    let mut m = Machine::with(prog, "ab");
    assert_eq!(m.run_for(3), None);
    assert_eq!(m.tape(), "xxxab");
}

#[test]
fn emit_each_step() {
    use alloc::{string::ToString, vec::Vec};
    let mut m = Machine::with(unary_addition(), "||+|");
    let mut log = Vec::new();
    m.run_with(true, |m| log.push(m.to_string()));
    assert_eq!(
        log,
        [
            "Step: 1, Tape: |+||",
            "Step: 2, Tape: +|||",
            "Step: 3, Tape: |||"
        ]
    );

    let mut log = Vec::new();
    m.load_tape("|+|");
    m.run_with(false, |m| log.push(m.to_string()));
    assert_eq!(log, ["Step: 2, Tape: ||"]);
}

#[test]
fn emit_once_on_no_match() {
    let mut m = Machine::with(unary_addition(), "|||");
    let mut count = 0;
    assert_eq!(m.run_with(true, |_| count += 1), Halt::NoMatch);
    assert_eq!(count, 1);
}

#[test]
fn bounded() {
    let mut m = Machine::with(unary_addition(), "||+|||");
    assert_eq!(m.run_for(2), None);
    assert_eq!(m.steps(), 2);
    assert_eq!(m.run_for(2), Some(Halt::FinalRule));
    assert_eq!(m.steps(), 3);
    assert_eq!(m.run_for(0), Some(Halt::FinalRule));
}

#[test]
fn multibyte() {
    let mut m = Machine::with(Program::parse("ä -> ss\nß -> ä"), "ßß");
    assert_eq!(m.run_for(10), Some(Halt::NoMatch));
    assert_eq!(m.tape(), "ssss");
    assert_eq!(m.steps(), 4);
}
