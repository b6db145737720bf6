use criterion::{criterion_group, criterion_main, Criterion};

use chunkfmt::language::LangFlags;
use chunkfmt::options::Options;

const SMALL_FUNCTION: &str = r#"
int clamp(int value, int lo, int hi) {
    if (value < lo) {
        return lo;
    } else if (value > hi) {
        return hi;
    }
    return value;
}
"#;

fn repeated_source(unit: &str, times: usize) -> String {
    unit.repeat(times)
}

fn single_function(c: &mut Criterion) {
    c.bench_function("format small function", |b| {
        b.iter(|| {
            chunkfmt::format_source(SMALL_FUNCTION, LangFlags::C, Options::new(LangFlags::C))
        })
    });
}

fn long_document(c: &mut Criterion) {
    let content = repeated_source(SMALL_FUNCTION, 200);
    c.bench_function("format long document", |b| {
        b.iter(|| chunkfmt::format_source(&content, LangFlags::C, Options::new(LangFlags::C)))
    });
}

fn width_constrained(c: &mut Criterion) {
    let content = repeated_source(SMALL_FUNCTION, 50);
    let mut options = Options::new(LangFlags::C);
    options.set(
        "code_width",
        chunkfmt::options::OptionValue::Unsigned(40),
    );
    c.bench_function("format with width splitting", |b| {
        b.iter(|| chunkfmt::format_source(&content, LangFlags::C, options.clone()))
    });
}

criterion_group!(benches, single_function, long_document, width_constrained);
criterion_main!(benches);
