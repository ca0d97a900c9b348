use charjs_parser::parser::Parser;
use charjs_source::Source;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

fn expr(source: &str) {
    let source = Source::new(source);
    let _ast = Parser::new(&source)
        .and_then(|mut parser| parser.parse_expr())
        .unwrap();
}

fn program(source: &str) {
    let _ast = charjs_parser::parse(&Source::new(source)).unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| expr(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "1".to_string();
    for _i in 0..200 {
        source.push_str(" == 2 < 3 + 5 * 5 ** 2 ?? a?.b");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| expr(&source)));
}

fn many_statements(c: &mut Criterion) {
    let mut group = c.benchmark_group("many-statements");

    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!(
            "var v{i} = {{ name: `item ${{{i}}}`, values: [{i}, {i} + 1] }};\nconsole.log(v{i}.name)\n"
        ));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many-statements", |b| b.iter(|| program(&source)));
}

criterion_group!(benches, long_expr, stress_precedence, many_statements);
criterion_main!(benches);
