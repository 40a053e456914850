use core::ops::ControlFlow;
use markov::{Error, Halt, Machine, Program, Rule, State};
use std::path::PathBuf;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unary_addition() -> Program {
    [Rule::new("|+", "+|"), Rule::terminal("+", "")]
        .into_iter()
        .collect()
}

fn temp_path(name: &str) -> PathBuf {
    let file = format!("markov-{}-{}.txt", std::process::id(), name);
    std::env::temp_dir().join(file)
}

#[test]
fn equality_ignores_terminal() {
    let r1 = Rule::new("a", "b");
    let mut r2 = Rule::new("a", "b");
    r2.set_terminal(true);
    assert_eq!(r1, r2);
    assert_ne!(r1.is_terminal(), r2.is_terminal());
}

#[test]
fn add_rule_idempotent() {
    let mut prog = Program::new();
    prog.add_rule(Rule::new("a", "b"));
    prog.add_rule(Rule::new("a", "b"));
    assert_eq!(prog.len(), 1);
}

#[test]
fn no_match_leaves_machine() {
    init();
    let mut m = Machine::with(unary_addition(), "|||");
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    assert_eq!(m.tape(), "|||");
    assert_eq!(m.steps(), 0);
    assert_eq!(m.state(), State::Halted(Halt::NoMatch));
}

#[test]
fn run_to_final_rule() {
    init();
    let mut m = Machine::new();
    m.load_program(unary_addition());
    m.load_tape("||+|||");
    assert_eq!(m.run(false), Halt::FinalRule);
    assert_eq!(m.tape(), "|||||");
    assert_eq!(m.steps(), 3);
}

#[test]
fn run_logged() {
    init();
    let mut m = Machine::with(unary_addition(), "|+|");
    assert_eq!(m.run(true), Halt::FinalRule);
    assert_eq!(m.to_string(), "Step: 2, Tape: ||");
}

#[test]
fn single_step() {
    let mut m = Machine::with(unary_addition(), "||+||");
    assert_eq!(m.step(), ControlFlow::Continue(()));
    assert_eq!(m.tape(), "|+|||");
    assert_eq!(m.steps(), 1);
    assert_eq!(m.state(), State::Running);
}

#[test]
fn rule_priority_over_position() {
    // the first rule wins even if a later rule matches further left
    let prog = Program::parse("b -> x\na -> y");
    let mut m = Machine::with(prog, "ab");
    assert!(m.step().is_continue());
    assert_eq!(m.tape(), "ax");
}

#[test]
fn binary_to_unary() {
    init();
    let prog = Program::parse(
        "|0 -> 0||\n\
         1 -> 0|\n\
         0 -> \n",
    );
    let mut m = Machine::with(prog, "101");
    assert_eq!(m.run_for(1000), Some(Halt::NoMatch));
    assert_eq!(m.tape(), "|||||");
}

#[test]
fn remove_out_of_range() {
    let mut prog = Program::new();
    prog.add_rule(Rule::new("a", "b"));
    assert_eq!(prog.remove(5), None);
    assert_eq!(prog.len(), 1);
}

#[test]
fn get_out_of_range() {
    let mut prog = Program::new();
    prog.add_rule(Rule::new("a", "b"));
    let err = prog.get(5).unwrap_err();
    assert_eq!(err, Error::OutOfRange { index: 5, len: 1 });
    assert_eq!(err.to_string(), "rule index 5 out of range for 1 rules");
}

#[test]
fn parse_malformed_keeps_rule() {
    let mut rule = Rule::terminal("initial", "initial");
    rule.read("invalid format without arrow");
    assert_eq!(rule.pattern(), "initial");
    assert_eq!(rule.replacement(), "initial");
    assert!(rule.is_terminal());
}

#[test]
fn file_round_trip() {
    init();
    let path = temp_path("round-trip");
    let mut m = Machine::with(unary_addition(), "||+|||");
    m.run_for(2);
    assert_eq!(m.steps(), 2);
    assert!(m.save_to_file(&path));

    let mut loaded = Machine::new();
    assert!(loaded.load_from_file(&path));
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.program(), m.program());
    let terminal = |m: &Machine| m.program().iter().map(Rule::is_terminal).collect::<Vec<_>>();
    assert_eq!(terminal(&loaded), terminal(&m));
    assert_eq!(loaded.tape(), m.tape());
    assert_eq!(loaded.steps(), 0);
}

#[test]
fn file_load_replaces_program() {
    init();
    let path = temp_path("replace");
    std::fs::write(&path, "a -> b [FINAL]\n\n\naaa\n").unwrap();

    let mut m = Machine::with(unary_addition(), "||+|");
    m.run_for(1);
    assert!(m.load_from_file(&path));
    std::fs::remove_file(&path).unwrap();

    assert_eq!(m.program().len(), 1);
    assert_eq!((m.tape(), m.steps()), ("aaa", 0));
    assert_eq!(m.run(false), Halt::FinalRule);
    assert_eq!(m.tape(), "baa");
}

#[test]
fn file_load_failure_keeps_state() {
    init();
    let path = temp_path("missing");
    let mut m = Machine::with(unary_addition(), "||+|");
    m.run_for(1);
    assert!(!m.load_from_file(&path));
    assert_eq!(m.program(), &unary_addition());
    assert_eq!((m.tape(), m.steps()), ("|+||", 1));
}

#[test]
fn edited_rules_resume_after_no_match() {
    init();
    let mut m = Machine::with(Program::parse("x -> y"), "ab");
    assert_eq!(m.step(), ControlFlow::Break(Halt::NoMatch));
    m.program_mut().add_rule(Rule::new("a", "c"));
    assert_eq!(m.step(), ControlFlow::Continue(()));
    assert_eq!(m.tape(), "cb");
}

#[test]
fn file_save_rejects_multiline_tape() {
    init();
    let path = temp_path("multiline");
    let m = Machine::with(unary_addition(), "a\nb");
    assert!(!m.save_to_file(&path));
    assert!(!path.exists());
}
