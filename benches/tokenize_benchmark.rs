//! Benchmark for tokenizing statements and quoting values.
//!
//! Measures the performance of:
//! 1. Tokenizing statements of growing size, eagerly and lazily
//! 2. Escaping and unescaping values with many embedded quotes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sqlite_tokens_rs::{Tokenizer, escape_literal, quote_literal, tokenize, unescape};
use std::hint::black_box;

/// Build an INSERT statement with `rows` value tuples.
fn insert_statement(rows: usize) -> String {
    let mut sql = String::from("INSERT INTO \"order items\" (id, name, note) VALUES ");
    for i in 0..rows {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&format!(
            "({i}, {}, {})",
            quote_literal(&format!("item {i}")),
            quote_literal("it's a \"quoted\" note, (really)")
        ));
    }
    sql
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for rows in [1, 100, 10_000] {
        let sql = insert_statement(rows);
        group.throughput(Throughput::Bytes(sql.len() as u64));

        group.bench_with_input(BenchmarkId::new("collect", rows), &sql, |b, sql| {
            b.iter(|| black_box(tokenize(black_box(sql))));
        });

        group.bench_with_input(BenchmarkId::new("count", rows), &sql, |b, sql| {
            b.iter(|| black_box(Tokenizer::new(black_box(sql)).count()));
        });
    }

    group.finish();
}

fn benchmark_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("escaping");

    let raw = "O'Brien said 'hello' ".repeat(64);
    let quoted = quote_literal(&raw);

    group.bench_function("escape_literal", |b| {
        b.iter(|| black_box(escape_literal(black_box(&raw))));
    });

    group.bench_function("unescape", |b| {
        b.iter(|| black_box(unescape(black_box(&quoted))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_tokenize, benchmark_escaping);
criterion_main!(benches);
