//! Alignment-run detection and column equalization (spec.md §4.11). Finds
//! runs of consecutive statement-starts at the same `level` whose alignable
//! anchor falls within `align_*_span` lines of each other, then pushes every
//! member's anchor (and everything after it on the same line) out to the
//! run's widest anchor column. Each alignment class (`var_def`, `assign`,
//! `right_cmt`) is independent, grounded on spec.md's "multiple alignment
//! classes run independently" note.

use crate::chunk::ChunkId;
use crate::chunk_list::ChunkList;
use crate::chunk_stack::ChunkStack;
use crate::context::FormatContext;
use crate::options::Options;
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    let options = ctx.options.clone();
    align_var_defs(&mut ctx.chunks, &options);
    align_trailing_assigns(&mut ctx.chunks, &options);
    align_trailing_comments(&mut ctx.chunks, &options);
}

/// Shifts every chunk from `from` (inclusive) to the end of its source line
/// right by `delta` columns. Used once an anchor's own column has been
/// pushed out, to keep the rest of that line consistent.
fn shift_rest_of_line(list: &mut ChunkList, from: ChunkId, delta: u32) {
    if delta == 0 {
        return;
    }
    let mut cur = Some(from);
    while let Some(id) = cur {
        if list.get(id).kind == TokenKind::Newline {
            break;
        }
        list.get_mut(id).column += delta;
        cur = list.next(id);
    }
}

struct Candidate {
    anchor: ChunkId,
    line: u32,
}

/// Groups candidates into maximal runs of consecutive lines within `span`
/// of each other, using a [`ChunkStack`] to accumulate each in-progress
/// run: `push_back` as a candidate extends the current run, `reset` once a
/// gap closes it off, so an eventual run is read back out with a single
/// `iter()` rather than hand-rolled `Vec` bookkeeping.
fn collect_runs(candidates: &[Candidate], span: u32) -> Vec<Vec<ChunkId>> {
    let mut runs: Vec<Vec<ChunkId>> = Vec::new();
    let mut current = ChunkStack::new();
    let mut last_line: Option<u32> = None;
    for c in candidates {
        if let Some(last) = last_line {
            if c.line.saturating_sub(last) > span.max(1) {
                if current.len() > 1 {
                    runs.push(current.iter().map(|e| e.chunk).collect());
                }
                current.reset();
            }
        }
        current.push_back(c.anchor);
        last_line = Some(c.line);
    }
    if current.len() > 1 {
        runs.push(current.iter().map(|e| e.chunk).collect());
    }
    runs
}

fn apply_run(list: &mut ChunkList, run: &[ChunkId]) {
    let target = run.iter().map(|&id| list.get(id).column).max().unwrap_or(0);
    for &id in run {
        let delta = target - list.get(id).column;
        if delta == 0 {
            continue;
        }
        list.get_mut(id).column = target;
        if let Some(next) = list.next(id) {
            shift_rest_of_line(list, next, delta);
        }
    }
}

/// `align_var_def_span`/`align_var_def_gap`: aligns the variable name (the
/// first `Word` carrying `VAR_DEF`) across consecutive declaration lines at
/// the same brace level.
fn align_var_defs(list: &mut ChunkList, options: &Options) {
    let span = options.get_unsigned("align_var_def_span") as u32;
    if span == 0 {
        return;
    }
    let candidates: Vec<Candidate> = list
        .iter()
        .filter(|&id| {
            list.get(id).flags.contains(PcfFlags::VAR_DEF) && list.get(id).kind == TokenKind::Word
        })
        .map(|id| Candidate {
            anchor: id,
            line: list.get(id).orig_line,
        })
        .collect();
    for run in collect_runs(&candidates, span) {
        apply_run(list, &run);
    }
}

/// `align_assign_span`: aligns the `=` across consecutive assignment
/// statements.
fn align_trailing_assigns(list: &mut ChunkList, options: &Options) {
    let span = options.get_unsigned("align_assign_span") as u32;
    if span == 0 {
        return;
    }
    let candidates: Vec<Candidate> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Assign)
        .map(|id| Candidate {
            anchor: id,
            line: list.get(id).orig_line,
        })
        .collect();
    for run in collect_runs(&candidates, span) {
        apply_run(list, &run);
    }
}

/// `align_right_cmt_span`: aligns trailing `//`/`/* */` comments that share
/// a line with code.
fn align_trailing_comments(list: &mut ChunkList, options: &Options) {
    let span = options.get_unsigned("align_right_cmt_span") as u32;
    if span == 0 {
        return;
    }
    let candidates: Vec<Candidate> = list
        .iter()
        .filter(|&id| {
            list.get(id).kind.is_comment()
                && list
                    .prev(id)
                    .map(|p| list.get(p).kind != TokenKind::Newline)
                    .unwrap_or(false)
        })
        .map(|id| Candidate {
            anchor: id,
            line: list.get(id).orig_line,
        })
        .collect();
    for run in collect_runs(&candidates, span) {
        // Comments never have anything after them on the line worth
        // shifting; just equalize their own column.
        let target = run.iter().map(|&id| list.get(id).column).max().unwrap_or(0);
        for &id in &run {
            list.get_mut(id).column = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::OptionValue;
    use crate::tokenizer::tokenize;

    fn run_on(src: &str, opt: &'static str, span: u64) -> FormatContext {
        let lang = LangFlags::C;
        let chunks = tokenize(src, lang);
        let mut options = Options::new(lang);
        options.set(opt, OptionValue::Unsigned(span));
        let mut ctx = FormatContext::new(chunks, options, lang);
        crate::passes::tokenize_cleanup::run(&mut ctx);
        crate::passes::brace_cleanup::run(&mut ctx);
        crate::passes::combine::run(&mut ctx);
        crate::passes::space::run(&mut ctx);
        crate::passes::indent::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn aligns_consecutive_assignments() {
        let ctx = run_on("a = 1;\nbcd = 2;\n", "align_assign_span", 5);
        let assigns: Vec<ChunkId> = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::Assign)
            .collect();
        assert_eq!(assigns.len(), 2);
        assert_eq!(ctx.chunks.get(assigns[0]).column, ctx.chunks.get(assigns[1]).column);
    }

    #[test]
    fn aligns_consecutive_variable_declarations() {
        let ctx = run_on("int a;\nlong bcd;\n", "align_var_def_span", 5);
        let names: Vec<ChunkId> = ctx
            .chunks
            .iter()
            .filter(|&id| {
                ctx.chunks.get(id).flags.contains(PcfFlags::VAR_DEF)
                    && ctx.chunks.get(id).kind == TokenKind::Word
            })
            .collect();
        assert_eq!(names.len(), 2);
        assert_eq!(ctx.chunks.get(names[0]).column, ctx.chunks.get(names[1]).column);
    }

    #[test]
    fn zero_span_disables_alignment() {
        let ctx = run_on("a = 1;\nbcd = 2;\n", "align_assign_span", 0);
        let assigns: Vec<ChunkId> = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::Assign)
            .collect();
        assert_ne!(ctx.chunks.get(assigns[0]).column, ctx.chunks.get(assigns[1]).column);
    }
}
