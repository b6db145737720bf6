//! Chunk-pipeline core for a C-family source beautifier (spec.md §1-§2):
//! tokenize a source file into a doubly-linked chunk graph, refine it
//! through the cascading pass order below, then render it back to text.
//!
//! ```text
//! tokenize -> tokenize_cleanup -> brace_cleanup -> combine -> pawn ->
//! braces -> newlines -> blank_lines -> semicolons -> parens -> returns ->
//! sorting -> space -> indent -> align -> width -> output
//! ```
//!
//! This crate owns the pipeline and its option vocabulary; file discovery,
//! CLI argument parsing, and config-file formats are out of scope
//! (spec.md §1's Non-goals) and left to a caller.

pub mod char_table;
pub mod chunk;
pub mod chunk_list;
pub mod chunk_stack;
pub mod context;
pub mod error;
pub mod language;
pub mod options;
pub mod output;
pub mod passes;
pub mod token;
pub mod tokenizer;

use chunk_list::ChunkList;
use context::{FormatContext, Stage};
use error::{FormatError, FormatResult};
use language::LangFlags;
use options::Options;

/// Runs the full cascade over already-tokenized chunks and returns the
/// finished `FormatContext` (callers inspecting `error_count` or `changes`
/// after the fact don't need to re-render to get at them).
pub fn run_pipeline(mut ctx: FormatContext) -> FormatContext {
    let stages: &[(Stage, fn(&mut FormatContext))] = &[
        (Stage::TokenizeCleanup, passes::tokenize_cleanup::run),
        (Stage::BraceCleanup, passes::brace_cleanup::run),
        (Stage::Combine, passes::combine::run),
        (Stage::Pawn, passes::pawn::run),
        (Stage::Braces, passes::braces::run),
        (Stage::Newlines, passes::newlines::run),
        (Stage::BlankLines, passes::blank_lines::run),
        (Stage::Semicolons, passes::semicolons::run),
        (Stage::Parens, passes::parens::run),
        (Stage::Returns, passes::returns::run),
        (Stage::Sorting, passes::sorting::run),
        (Stage::Space, passes::space::run),
        (Stage::Indent, passes::indent::run),
        (Stage::Align, passes::align::run),
        (Stage::Width, passes::width::run),
    ];
    for (stage, pass) in stages {
        ctx.enter_stage(*stage);
        pass(&mut ctx);
    }
    ctx.enter_stage(Stage::Output);
    ctx
}

/// Tokenizes, strips a leading BOM, and detects the line-ending style, so
/// `format_source` can re-emit both verbatim (spec.md's "do no harm" on
/// encoding, a Non-goal to normalize).
fn prepare(text: &str, lang: LangFlags) -> FormatResult<(ChunkList, bool, bool)> {
    if let Some(offset) = text.as_bytes().iter().position(|&b| b == 0) {
        return Err(FormatError::EncodingCorruption { offset });
    }
    let had_bom = text.starts_with('\u{feff}');
    let body = if had_bom { &text[3..] } else { text };
    let crlf = body.contains("\r\n");
    let chunks = tokenizer::tokenize(body, lang);
    Ok((chunks, had_bom, crlf))
}

/// Runs the complete pipeline over `text` and returns the reformatted
/// source. This is the crate's primary entry point (spec.md §1).
pub fn format_source(text: &str, lang: LangFlags, options: Options) -> FormatResult<String> {
    let (chunks, had_bom, crlf) = prepare(text, lang)?;
    let mut ctx = FormatContext::new(chunks, options, lang);
    ctx.had_bom = had_bom;
    ctx.crlf = crlf;
    let ctx = run_pipeline(ctx);
    Ok(output::render(&ctx))
}
