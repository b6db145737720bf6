//! The explicit run context threaded through every pass (spec.md §9's
//! redesign note: no process-global mutable state). Each pass takes
//! `&mut FormatContext` and mutates `chunks` in place.

use crate::chunk_list::ChunkList;
use crate::language::LangFlags;
use crate::options::Options;

/// Which pass is currently running, for log spans and for passes (like
/// `width`) that behave differently depending on what already ran.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Tokenize,
    TokenizeCleanup,
    BraceCleanup,
    Combine,
    Pawn,
    Braces,
    Newlines,
    BlankLines,
    Semicolons,
    Parens,
    Returns,
    Sorting,
    Space,
    Indent,
    Align,
    Width,
    Output,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Tokenize => "tokenize",
            Stage::TokenizeCleanup => "tokenize_cleanup",
            Stage::BraceCleanup => "brace_cleanup",
            Stage::Combine => "combine",
            Stage::Pawn => "pawn",
            Stage::Braces => "braces",
            Stage::Newlines => "newlines",
            Stage::BlankLines => "blank_lines",
            Stage::Semicolons => "semicolons",
            Stage::Parens => "parens",
            Stage::Returns => "returns",
            Stage::Sorting => "sorting",
            Stage::Space => "space",
            Stage::Indent => "indent",
            Stage::Align => "align",
            Stage::Width => "width",
            Stage::Output => "output",
        }
    }
}

/// Carries the chunk graph, options, and run-scoped counters through the
/// pipeline. Replaces the source tool's `cpd` global.
pub struct FormatContext {
    pub chunks: ChunkList,
    pub options: Options,
    pub lang: LangFlags,
    pub stage: Stage,
    /// Input began with a UTF-8 BOM; `passes::output` must re-emit it.
    pub had_bom: bool,
    /// Input used CRLF line endings; re-emitted verbatim per spec.md §4's
    /// "Output" contract (line-ending normalization is a Non-goal).
    pub crlf: bool,
    /// Non-fatal classification misses, per spec.md §6.2/§7's "do no harm"
    /// policy: a pass that can't confidently classify a construct counts it
    /// here and leaves the chunk's best-guess kind alone, rather than
    /// failing the whole run.
    pub error_count: u32,
    /// Number of chunks any pass has mutated (kind, str, or flags) since the
    /// context was created. `passes::width`'s bounded split<->indent loop
    /// compares this before/after each round instead of carrying its own
    /// "did anything change" flag, so it stops as soon as a round produces
    /// no further splits.
    pub changes: u64,
}

impl FormatContext {
    pub fn new(chunks: ChunkList, options: Options, lang: LangFlags) -> Self {
        FormatContext {
            chunks,
            options,
            lang,
            stage: Stage::Tokenize,
            had_bom: false,
            crlf: false,
            error_count: 0,
            changes: 0,
        }
    }

    pub fn enter_stage(&mut self, stage: Stage) {
        #[cfg(feature = "debug-tracing")]
        tracing::debug!(from = self.stage.name(), to = stage.name(), "entering stage");
        self.stage = stage;
    }

    pub fn mark_changed(&mut self) {
        self.changes += 1;
        #[cfg(feature = "debug-tracing")]
        tracing::trace!(stage = self.stage.name(), total = self.changes, "chunk mutated");
    }

    pub fn report_classification_miss(&mut self, detail: &str) {
        self.error_count += 1;
        tracing::warn!(stage = self.stage.name(), detail, "classification miss");
    }
}
