//! Performance benchmarks for the tokenizer

use std::hint::black_box;

use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use lexer::TokenStream;

fn bench_tokenize_plain(c: &mut Criterion) {
	let mut group = c.benchmark_group("tokenize_plain");
	let input = "ban user123 7d spamming links in every channel";

	group.throughput(Throughput::Bytes(input.len() as u64));
	group.bench_function("plain", |b| b.iter(|| lexer::tokenize(black_box(input))));
	group.finish();
}

fn bench_tokenize_quoted(c: &mut Criterion) {
	let mut group = c.benchmark_group("tokenize_quoted");
	let input = r#"tag create "release notes" «texte cité» 「引用」 trailing"#;

	group.throughput(Throughput::Bytes(input.len() as u64));
	group.bench_function("quoted", |b| b.iter(|| lexer::tokenize(black_box(input))));
	group.finish();
}

fn bench_tokenize_unterminated(c: &mut Criterion) {
	let mut group = c.benchmark_group("tokenize_unterminated");
	let input = r#"say "this quote never closes and keeps going for a while"#;

	group.throughput(Throughput::Bytes(input.len() as u64));
	group.bench_function("unterminated", |b| {
		b.iter(|| lexer::tokenize(black_box(input)))
	});
	group.finish();
}

fn bench_stream_consume(c: &mut Criterion) {
	let input = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16";
	let tokens = lexer::tokenize(input);

	c.bench_function("stream_consume_rest", |b| {
		b.iter(|| {
			let mut stream = TokenStream::new(black_box(&tokens));
			stream.next();
			stream.consume_rest_joined()
		})
	});
}

criterion_group!(
	benches,
	bench_tokenize_plain,
	bench_tokenize_quoted,
	bench_tokenize_unterminated,
	bench_stream_consume
);
criterion_main!(benches);
