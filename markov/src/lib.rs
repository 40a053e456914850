#![no_std]
#![forbid(unsafe_code)]

//! Interpreter for Markov algorithms on text.
//!
//! A Markov algorithm (also known as normal algorithm) is
//! an ordered list of rewrite rules `pattern -> replacement`.
//! Executing it on a text, called the *tape*, repeatedly
//! takes the first rule whose pattern occurs in the tape and
//! replaces the leftmost occurrence of the pattern by the replacement.
//! Execution halts once a *terminal* rule was applied or
//! no rule pattern occurs in the tape anymore.
//! Patterns are matched literally; there are no wildcards.
//!
//! # Usage
//!
//! The following example adds two numbers in unary notation.
//! Rules are given in their textual form,
//! where terminal rules are marked with `[FINAL]`.
//!
//! ~~~
//! # use markov::{Halt, Machine, Program};
//! let prog = Program::parse("|+ -> +|\n+ -> [FINAL]\n");
//! let mut machine = Machine::with(prog, "||+|||");
//!
//! // apply a single rule
//! assert!(machine.step().is_continue());
//! assert_eq!(machine.tape(), "|+||||");
//!
//! // apply rules until a terminal rule fires
//! let halt = machine.run_with(false, |_| ());
//! assert_eq!(halt, Halt::FinalRule);
//! assert_eq!(machine.tape(), "|||||");
//! assert_eq!(machine.steps(), 3);
//! ~~~
//!
//! # Organisation
//!
//! * A [`Rule`] consists of pattern, replacement, and a flag whether it is terminal.
//! * A [`Program`] is an ordered sequence of rules without duplicates.
//! * A [`Machine`] runs a program on a tape, counting the steps.
//!
//! Programs and machines can be written to and read from text.
//! With the (default) `std` feature, machines can also be saved to and
//! loaded from files.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
#[macro_use]
extern crate log;

pub mod error;
#[cfg(feature = "std")]
mod file;
mod machine;
mod program;
mod rule;

pub use error::Error;
pub use machine::{Halt, Machine, State};
pub use program::Program;
pub use rule::Rule;
