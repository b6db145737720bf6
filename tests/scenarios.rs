//! End-to-end scenarios run through the public `format_source` entry
//! point, covering the concrete cases and cross-pass invariants this
//! crate is expected to satisfy.

use chunkfmt::language::LangFlags;
use chunkfmt::options::{Iarf, OptionValue, Options};
use chunkfmt::token::TokenKind;

fn format(src: &str, opts: &[(&'static str, OptionValue)]) -> String {
    let mut options = Options::new(LangFlags::C);
    for (k, v) in opts {
        options.set(k, v.clone());
    }
    chunkfmt::format_source(src, LangFlags::C, options).expect("formatting should not fail")
}

#[test]
fn adds_braces_to_single_statement_if() {
    let out = format(
        "if (x) y;",
        &[("mod_full_brace_if", OptionValue::Iarf(Iarf::Add))],
    );
    assert!(out.contains('{'));
    assert!(out.contains('}'));
}

#[test]
fn removes_braces_from_single_statement_if() {
    let out = format(
        "if (x) {\n    y;\n}\n",
        &[
            ("mod_full_brace_if", OptionValue::Iarf(Iarf::Remove)),
            ("mod_full_brace_nl", OptionValue::Unsigned(3)),
        ],
    );
    assert!(!out.contains('{'));
    assert!(!out.contains('}'));
    assert!(out.contains("y;"));
}

#[test]
fn for_header_splits_at_code_width() {
    let out = format(
        "for (initialization_i = 0; initialization_i < limit_value; initialization_i++) { }\n",
        &[("code_width", OptionValue::Unsigned(40))],
    );
    let longest = out.lines().map(str::len).max().unwrap_or(0);
    assert!(longest <= 40 || out.lines().count() > 1);
    assert!(out.lines().count() > 1);
}

#[test]
fn empty_file_formats_to_empty_output() {
    assert_eq!(format("", &[]), "");
}

#[test]
fn all_ignore_defaults_preserve_simple_input_bytes() {
    // spec.md 8.1.4: with every option at its conservative default
    // (mostly IGNORE), a file's token sequence and text layout survive.
    let src = "x = 1;\n";
    assert_eq!(format(src, &[]), src);
}

#[test]
fn formatting_twice_is_idempotent() {
    let src = "if (x)\n{\ny = 1 ;\n}\n";
    let opts = [("sp_before_semi", OptionValue::Iarf(Iarf::Remove))];
    let once = format(src, &opts);
    let twice = format(&once, &opts);
    assert_eq!(once, twice);
}

#[test]
fn sorts_mixed_include_run() {
    let out = format(
        "#include \"local.h\"\n#include <system.h>\n",
        &[("mod_sort_include", OptionValue::Bool(true))],
    );
    assert!(out.find("system.h").unwrap() < out.find("local.h").unwrap());
}

#[test]
fn strips_empty_return_before_closing_brace() {
    let out = format(
        "void f() {\nx();\nreturn;\n}\n",
        &[("mod_remove_empty_return", OptionValue::Bool(true))],
    );
    assert!(!out.contains("return"));
}

#[test]
fn rejects_embedded_nul_byte() {
    let err = chunkfmt::format_source("x;\0", LangFlags::C, Options::new(LangFlags::C));
    assert!(err.is_err());
}

#[test]
fn star_and_cast_classification_survive_full_pipeline() {
    use chunkfmt::context::FormatContext;
    use chunkfmt::tokenizer::tokenize;

    let chunks = tokenize("int *p = &q; a = b*c; x = (size_t)y;", LangFlags::C);
    let ctx = FormatContext::new(chunks, Options::new(LangFlags::C), LangFlags::C);
    let ctx = chunkfmt::run_pipeline(ctx);
    let kinds: Vec<TokenKind> = ctx.chunks.iter().map(|id| ctx.chunks.get(id).kind).collect();
    assert!(kinds.contains(&TokenKind::PtrType));
    assert!(kinds.contains(&TokenKind::Addr));
    assert!(kinds.contains(&TokenKind::CCast));
}
