use criterion::{criterion_group, criterion_main, Criterion};
use markov::{Machine, Program};

fn run(prog: &Program, tape: &str) -> usize {
    let mut m = Machine::with(prog.clone(), tape);
    m.run_with(false, |_| ());
    m.steps()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let addition = Program::parse("|+ -> +|\n+ -> [FINAL]\n");
    let binary = Program::parse("|0 -> 0||\n1 -> 0|\n0 -> \n");

    let lhs = "|".repeat(500);
    let sum = format!("{}+{}", lhs, lhs);
    let bits = "1".repeat(12);

    c.bench_function("unary addition", |b| b.iter(|| run(&addition, &sum)));
    c.bench_function("binary to unary", |b| b.iter(|| run(&binary, &bits)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
