use criterion::{Criterion, black_box, criterion_group, criterion_main};
use postfix_engine::OperatorRegistry;
use postfix_engine::PostfixEngine;
use postfix_engine::parser::Tokenizer;

fn benchmark_tokenizer(c: &mut Criterion) {
    let registry = OperatorRegistry::with_builtins();
    let expression = "(_12_+_34_)_*_Q(_5_x_5_)_-_-7";

    c.bench_function("tokenizer", |b| {
        b.iter(|| {
            let mut tokenizer = Tokenizer::new(black_box(expression), &registry, '_');
            black_box(tokenizer.tokenize_all())
        })
    });
}

fn benchmark_conversion(c: &mut Criterion) {
    let engine = PostfixEngine::new();
    let expression = "( 12 + 34 ) * Q( 5 x 5 ) - -7";

    c.bench_function("convert_infix", |b| {
        b.iter(|| black_box(engine.convert_infix_expression(black_box(expression))))
    });
}

fn benchmark_evaluation(c: &mut Criterion) {
    let engine = PostfixEngine::new();
    let postfix = "12 34 + 5 5 x Q * -7 -";

    c.bench_function("evaluate_postfix", |b| {
        b.iter(|| black_box(engine.evaluate(black_box(postfix))))
    });
}

fn benchmark_multiple_expressions(c: &mut Criterion) {
    let engine = PostfixEngine::new();
    let expressions = vec![
        "3 + 4",
        "( 3 + 4 ) * 2",
        "Q 144 + ( C 27 )",
        "2 ^ 10 > 3",
        "( ( 1 + 2 ) * ( 3 + 4 ) ) % 5",
        "100 / ( 7 - 2 ) x 3",
    ];

    for (i, expression) in expressions.into_iter().enumerate() {
        c.bench_function(&format!("expr_{}_evaluate_infix", i), |b| {
            b.iter(|| black_box(engine.evaluate_infix(black_box(expression))))
        });
    }
}

criterion_group!(
    benches,
    benchmark_tokenizer,
    benchmark_conversion,
    benchmark_evaluation,
    benchmark_multiple_expressions
);
criterion_main!(benches);
