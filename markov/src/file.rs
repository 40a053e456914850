//! Saving and loading machines.
//!
//! A saved machine consists of its program (one rule per line),
//! an empty line, and a line containing the tape.
//! Tapes containing line breaks can therefore not be saved.

use crate::{Machine, Program};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::string::String;
use std::vec::Vec;

impl Machine {
    fn check_tape(&self) -> io::Result<()> {
        if self.tape().contains(&['\n', '\r'][..]) {
            let msg = "tape contains a line break";
            return Err(io::Error::new(io::ErrorKind::InvalidInput, msg));
        }
        Ok(())
    }

    /// Write program and tape.
    ///
    /// Fail with [`io::ErrorKind::InvalidInput`] without writing anything
    /// if the tape contains a line break.
    pub fn save(&self, mut w: impl Write) -> io::Result<()> {
        self.check_tape()?;
        write!(w, "{}", self.program())?;
        writeln!(w)?;
        write!(w, "{}", self.tape())
    }

    /// Read program and tape as written by [`Machine::save`].
    ///
    /// The program is read up to the first empty line,
    /// the tape is the first non-empty line after that.
    /// If there is no such line, the tape is kept.
    /// The whole input is read before modifying the machine,
    /// so the machine is unchanged if reading fails.
    ///
    /// ~~~
    /// # use markov::Machine;
    /// let mut m = Machine::new();
    /// m.load("|+ -> +|\n+ -> [FINAL]\n\n\n||+|".as_bytes())?;
    /// assert_eq!(m.program().len(), 2);
    /// assert_eq!(m.tape(), "||+|");
    /// # Ok::<_, std::io::Error>(())
    /// ~~~
    pub fn load(&mut self, r: impl BufRead) -> io::Result<()> {
        let lines: Vec<String> = r.lines().collect::<io::Result<_>>()?;
        let mut lines = lines.iter();

        let mut program = Program::new();
        program.read_lines(&mut lines);
        let tape = lines.find(|line| !line.is_empty());

        self.load_program(program);
        match tape {
            Some(tape) => self.load_tape(tape.as_str()),
            None => debug!("no tape found, keeping previous tape"),
        }
        Ok(())
    }

    /// Save the machine to a file, returning true on success.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let result = self.check_tape().and_then(|()| File::create(path));
        let result = result.and_then(|file| {
            let mut w = BufWriter::new(file);
            self.save(&mut w)?;
            w.flush()
        });
        result
            .map_err(|e| warn!("could not save to {}: {}", path.display(), e))
            .is_ok()
    }

    /// Load the machine from a file, returning true on success.
    ///
    /// If the file cannot be read, the machine is unchanged.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let result = File::open(path).and_then(|file| self.load(BufReader::new(file)));
        result
            .map_err(|e| warn!("could not load from {}: {}", path.display(), e))
            .is_ok()
    }
}

#[test]
fn save_layout() {
    let m = Machine::with(Program::parse("|+ -> +|\n+ -> [FINAL]"), "||+|");
    let mut out = Vec::new();
    m.save(&mut out).unwrap();
    assert_eq!(out, b"|+ -> +|\n+ ->  [FINAL]\n\n||+|");
}

#[test]
fn save_load() {
    let mut m = Machine::with(Program::parse("a -> b\nb -> c [FINAL]"), "aab");
    m.run_for(1);
    let mut out = Vec::new();
    m.save(&mut out).unwrap();

    let mut loaded = Machine::new();
    loaded.load(out.as_slice()).unwrap();
    assert_eq!(loaded.program(), m.program());
    assert_eq!(loaded.tape(), m.tape());
    assert_eq!(loaded.steps(), 0);
}

#[test]
fn load_without_tape() {
    let mut m = Machine::with(Program::new(), "old");
    m.run_for(1);
    m.load("a -> b\n".as_bytes()).unwrap();
    assert_eq!(m.program().len(), 1);
    assert_eq!(m.tape(), "old");
}

#[test]
fn load_invalid_utf8() {
    let mut m = Machine::with(Program::parse("a -> b"), "a");
    assert!(m.load(&b"x -> y\n\n\xff\xfe"[..]).is_err());
    assert_eq!(m.program(), &Program::parse("a -> b"));
    assert_eq!(m.tape(), "a");
}

#[test]
fn save_multiline_tape() {
    let m = Machine::with(Program::parse("a -> b"), "a\nb");
    let mut out = Vec::new();
    let err = m.save(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(out.is_empty());

    let file = std::format!("markov-{}-multiline.txt", std::process::id());
    let path = std::env::temp_dir().join(file);
    assert!(!m.save_to_file(&path));
    assert!(!path.exists());
}

#[test]
fn missing_file() {
    let mut m = Machine::with(Program::parse("a -> b"), "ab");
    m.run_for(1);
    assert!(!m.load_from_file("/nonexistent/markov/machine.txt"));
    assert_eq!((m.tape(), m.steps()), ("bb", 1));
    assert_eq!(m.program().len(), 1);
    assert!(!m.save_to_file("/nonexistent/markov/machine.txt"));
}
