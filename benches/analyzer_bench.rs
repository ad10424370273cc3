use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use letter_bias::syntax::{default_parser, SyntaxParser};
use letter_bias::{Analyzer, AnalyzerConfig, Document};

const LETTER: &str = "Dear Hiring Committee,

I am delighted to recommend Dr. Maria Lopez for the position. Maria is brilliant. Her research is groundbreaking and her methods are innovative. She is hard-working, diligent and always punctual.

She published \"Protein Folding at Scale\" and \"Signals in Noise\" in leading journals. Her students are productive and her lab is remarkably successful.

Sincerely,
Prof. Alan Reed
";

fn long_letter() -> String {
    LETTER.repeat(50)
}

fn bench_segmentation(c: &mut Criterion) {
    let text = long_letter();
    let mut group = c.benchmark_group("segmentation");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("sentences_and_words", |b| {
        b.iter(|| {
            // fresh document each time so memoized segmentation is not reused
            let document = Document::new(black_box(text.as_str())).unwrap();
            black_box((document.sentences().len(), document.words().len()))
        })
    });

    group.bench_function("rule_based_parse", |b| {
        let parser = default_parser().unwrap();
        b.iter(|| black_box(parser.parse(black_box(&text)).unwrap().len()))
    });

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = Analyzer::default_detectors(&AnalyzerConfig::default()).unwrap();
    let mut group = c.benchmark_group("analysis");

    for (name, text) in [("single_letter", LETTER.to_string()), ("long_letter", long_letter())] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{name}_sequential"), |b| {
            b.iter(|| {
                let document = Document::new(text.as_str()).unwrap();
                black_box(analyzer.analyze(&document).bias_score())
            })
        });
        group.bench_function(format!("{name}_parallel"), |b| {
            b.iter(|| {
                let document = Document::new(text.as_str()).unwrap();
                black_box(analyzer.analyze_parallel(&document).bias_score())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_analysis);
criterion_main!(benches);
