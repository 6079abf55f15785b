use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sprig_parser::{parse, parse_with_options, to_simplified_parse_trees, tokenize, ParseOptions, SimplifyOptions};

const SMALL: &str = r#"
; greeting
(define (greet name)
  (print "hello, " name))
"#;

fn medium_source() -> String {
    let block = r#"
#| helpers #| nested note |# |#
(define (fold f acc xs)
  (if (null? xs)
      acc
      (fold f (f acc (car xs)) (cdr xs))))

(let ([total 0] {label 'sum'})
  ; accumulate
  (fold + total [1 2 3 4 5 6 7 8 9 10]))
"#;
    block.repeat(50)
}

fn tokenize_small(c: &mut Criterion) {
    c.bench_function("tokenize_small", |b| b.iter(|| tokenize(black_box(SMALL))));
}

fn parse_small(c: &mut Criterion) {
    c.bench_function("parse_small", |b| b.iter(|| parse(black_box(SMALL))));
}

fn parse_medium(c: &mut Criterion) {
    let source = medium_source();
    c.bench_function("parse_medium", |b| b.iter(|| parse(black_box(&source))));
}

fn parse_medium_structure_only(c: &mut Criterion) {
    let source = medium_source();
    let options = ParseOptions {
        include_comments: false,
        include_whitespace: false,
        include_list_delimiters: false,
    };
    c.bench_function("parse_medium_structure_only", |b| {
        b.iter(|| parse_with_options(black_box(&source), options))
    });
}

fn simplify_medium(c: &mut Criterion) {
    let source = medium_source();
    let trees = parse(&source).unwrap();
    c.bench_function("simplify_medium", |b| {
        b.iter(|| to_simplified_parse_trees(black_box(&source), &trees, SimplifyOptions::default()))
    });
}

criterion_group!(
    benches,
    tokenize_small,
    parse_small,
    parse_medium,
    parse_medium_structure_only,
    simplify_medium
);
criterion_main!(benches);
