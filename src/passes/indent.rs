//! Column assignment (spec.md §4.10). Block depth comes straight from the
//! `brace_level` `passes::brace_cleanup` already stamped on every chunk
//! (real and virtual braces counted alike), so this pass doesn't need to
//! re-walk an opener/closer stack of its own: the first chunk on a line
//! indents to `brace_level * indent_columns`, nudged by `indent_continue`
//! when the line continues the previous statement rather than starting a
//! new one, and outdented one level for labels/`case`/`default`.
//! Continuation chunks on the same line derive `column` from their
//! predecessor's `column` + length + `passes::space`'s `SPACE_BEFORE`
//! decision, so this pass must run after `passes::space`.

use crate::chunk::ChunkId;
use crate::chunk_list::ChunkList;
use crate::context::FormatContext;
use crate::options::Options;
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    let options = ctx.options.clone();
    assign_columns(&mut ctx.chunks, &options);
}

/// Entry point for passes (`passes::width`) that need to recompute columns
/// without owning a whole `FormatContext`.
pub fn run_with(list: &mut ChunkList, options: &Options) {
    assign_columns(list, options);
}

fn assign_columns(list: &mut ChunkList, options: &Options) {
    let step = options.get_unsigned("indent_columns") as u32;
    let indent_continue = options.get_signed("indent_continue");

    let mut column: u32 = 0;
    let mut first_on_line = true;

    let ids: Vec<ChunkId> = list.iter().collect();
    for id in ids {
        if list.get(id).kind == TokenKind::Newline {
            first_on_line = true;
            continue;
        }

        if first_on_line {
            column = base_indent_for(list, id, step, indent_continue);
            first_on_line = false;
        } else {
            let prev = list.prev(id).expect("non-first chunk has a predecessor");
            let gap = if list.get(id).flags.contains(PcfFlags::SPACE_BEFORE) {
                1
            } else {
                0
            };
            column = column + list.get(prev).len() as u32 + gap;
        }
        list.get_mut(id).column = column;
    }
}

fn base_indent_for(list: &ChunkList, id: ChunkId, step: u32, indent_continue: i64) -> u32 {
    let level = list.get(id).brace_level as u32;
    let kind = list.get(id).kind;

    if matches!(kind, TokenKind::Label | TokenKind::Case | TokenKind::Default) {
        return level.saturating_sub(1) * step;
    }

    let base = (level * step) as i64;
    let adjusted = if is_continuation_line(list, id) {
        base + indent_continue
    } else {
        base
    };
    adjusted.max(0) as u32
}

/// A line continues the previous statement (rather than starting a new
/// block member) when the chunk that precedes this line's newline run is
/// not itself a statement/expr boundary.
fn is_continuation_line(list: &ChunkList, id: ChunkId) -> bool {
    let mut cur = match list.prev(id) {
        Some(p) => p,
        None => return false,
    };
    while list.get(cur).kind == TokenKind::Newline {
        match list.prev(cur) {
            Some(p) => cur = p,
            None => return false,
        }
    }
    !matches!(
        list.get(cur).kind,
        TokenKind::Semicolon
            | TokenKind::VSemicolon
            | TokenKind::BraceOpen
            | TokenKind::BraceClose
            | TokenKind::VbraceOpen
            | TokenKind::VbraceClose
            | TokenKind::Colon
            | TokenKind::CaseColon
            | TokenKind::LabelColon
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::Options;
    use crate::tokenizer::tokenize;

    fn run_on(src: &str) -> FormatContext {
        let lang = LangFlags::C;
        let chunks = tokenize(src, lang);
        let mut ctx = FormatContext::new(chunks, Options::new(lang), lang);
        crate::passes::tokenize_cleanup::run(&mut ctx);
        crate::passes::brace_cleanup::run(&mut ctx);
        crate::passes::combine::run(&mut ctx);
        crate::passes::space::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn body_inside_braces_is_indented_one_level() {
        let ctx = run_on("if (x) {\ny;\n}");
        let y = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::Word && ctx.chunks.get(id).str == "y")
            .unwrap();
        assert_eq!(ctx.chunks.get(y).column, 4);
    }

    #[test]
    fn top_level_statement_starts_at_column_zero() {
        let ctx = run_on("x;\ny;");
        let y = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::Word)
            .nth(1)
            .unwrap();
        assert_eq!(ctx.chunks.get(y).column, 0);
    }

    #[test]
    fn nested_braces_compound_indent() {
        let ctx = run_on("if (a) {\nif (b) {\nz;\n}\n}");
        let z = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::Word && ctx.chunks.get(id).str == "z")
            .unwrap();
        assert_eq!(ctx.chunks.get(z).column, 8);
    }
}
