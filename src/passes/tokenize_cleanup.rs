//! Local, context-free refinements over the freshly tokenized list
//! (spec.md §4.3), plus template-vs-comparison disambiguation.

use crate::chunk::ChunkId;
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::language::LangFlags;
use crate::token::{PcfFlags, TokenKind};
use std::collections::HashSet;

pub fn run(ctx: &mut FormatContext) {
    merge_tsquare(&mut ctx.chunks);
    let closers = detect_templates(&mut ctx.chunks);
    resolve_remaining_angles(&mut ctx.chunks, &closers);
    reclassify_dots(&mut ctx.chunks, ctx.lang);
    classify_operator_overloads(&mut ctx.chunks);
}

fn merge_tsquare(list: &mut ChunkList) {
    let opens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::SquareOpen)
        .collect();
    for open in opens {
        let Some(close) = list.next(open) else { continue };
        if list.get(close).kind != TokenKind::SquareClose {
            continue;
        }
        if list.get(open).orig_col_end != list.get(close).orig_col {
            continue;
        }
        let close_end = list.get(close).orig_col_end;
        {
            let c = list.get_mut(open);
            c.kind = TokenKind::TSquare;
            c.str = "[]".to_string();
            c.orig_col_end = close_end;
        }
        list.chunk_del(close);
    }
}

/// Walks every `ANGLE_OPEN`, trying to find a matching `ANGLE_CLOSE` whose
/// forward scan never crosses a statement terminator, brace, or depth-0
/// comparison/boolean operator. Returns the set of `ANGLE_CLOSE` ids that
/// were consumed as a genuine template closer (nested template closes are
/// included via their own, separately-detected opens).
fn detect_templates(list: &mut ChunkList) -> HashSet<ChunkId> {
    let opens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::AngleOpen)
        .collect();
    let mut closers = HashSet::new();

    for open in opens {
        if !preceded_by_template_candidate(list, open) {
            continue;
        }
        if let Some(close) = scan_template_body(list, open) {
            list.get_mut(open).ptype = TokenKind::Template;
            list.get_mut(close).ptype = TokenKind::Template;
            let mut cur = list.next(open);
            while let Some(id) = cur {
                if id == close {
                    break;
                }
                list.get_mut(id).flags.insert(PcfFlags::IN_TEMPLATE);
                cur = list.next(id);
            }
            closers.insert(close);
        }
    }
    closers
}

fn preceded_by_template_candidate(list: &ChunkList, angle_open: ChunkId) -> bool {
    match list.prev_nc(angle_open, Scope::All) {
        Some(p) => matches!(
            list.get(p).kind,
            TokenKind::Word
                | TokenKind::Type
                | TokenKind::OperatorVal
                | TokenKind::Comma
                | TokenKind::DcMember
        ),
        None => false,
    }
}

fn scan_template_body(list: &ChunkList, angle_open: ChunkId) -> Option<ChunkId> {
    let mut depth = 1i32;
    let mut cur = list.next(angle_open)?;
    loop {
        let kind = list.get(cur).kind;
        match kind {
            TokenKind::AngleOpen => depth += 1,
            TokenKind::AngleClose => {
                depth -= 1;
                if depth == 0 {
                    return Some(cur);
                }
            }
            TokenKind::ParenOpen | TokenKind::SquareOpen | TokenKind::BraceOpen => {
                cur = list.skip_to_match(cur, Scope::All)?;
            }
            TokenKind::Semicolon | TokenKind::BraceClose => return None,
            TokenKind::Boolean if depth == 1 => return None,
            TokenKind::Compare if depth == 1 => return None,
            _ => {}
        }
        cur = list.next(cur)?;
    }
}

fn resolve_remaining_angles(list: &mut ChunkList, closers: &HashSet<ChunkId>) {
    let opens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| {
            list.get(id).kind == TokenKind::AngleOpen && list.get(id).ptype != TokenKind::Template
        })
        .collect();
    for id in opens {
        list.get_mut(id).kind = TokenKind::Compare;
    }

    let spares: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::AngleClose && !closers.contains(&id))
        .collect();

    let mut i = 0;
    while i < spares.len() {
        let cur = spares[i];
        if let Some(next) = spares.get(i + 1).copied() {
            let adjacent = list.next(cur) == Some(next)
                && list.get(cur).orig_col_end == list.get(next).orig_col;
            if adjacent {
                let end = list.get(next).orig_col_end;
                {
                    let c = list.get_mut(cur);
                    c.kind = TokenKind::Arith;
                    c.str = ">>".to_string();
                    c.orig_col_end = end;
                }
                list.chunk_del(next);
                i += 2;
                continue;
            }
        }
        list.get_mut(cur).kind = TokenKind::Compare;
        i += 1;
    }
}

fn reclassify_dots(list: &mut ChunkList, lang: LangFlags) {
    if !lang.intersects(LangFlags::ALL_C_LIKE) {
        return;
    }
    let dots: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Dot)
        .collect();
    for id in dots {
        list.get_mut(id).kind = TokenKind::Member;
    }
}

fn classify_operator_overloads(list: &mut ChunkList) {
    let words: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Operator)
        .collect();
    for op in words {
        let Some(next) = list.next(op) else { continue };
        let kind = list.get(next).kind;
        if kind == TokenKind::ParenOpen {
            if let Some(close) = list.next(next) {
                if list.get(close).kind == TokenKind::ParenClose {
                    merge_into(list, op, &[next, close], "()");
                }
            }
            continue;
        }
        if matches!(
            kind,
            TokenKind::TSquare
                | TokenKind::Arith
                | TokenKind::Compare
                | TokenKind::Assign
                | TokenKind::Boolean
                | TokenKind::Not
                | TokenKind::BitNot
                | TokenKind::IncAfter
                | TokenKind::DecAfter
        ) {
            let text = list.get(next).str.clone();
            merge_into(list, op, &[next], &text);
        }
    }
}

fn merge_into(list: &mut ChunkList, anchor: ChunkId, rest: &[ChunkId], suffix: &str) {
    let end = rest
        .last()
        .map(|id| list.get(*id).orig_col_end)
        .unwrap_or(list.get(anchor).orig_col_end);
    {
        let c = list.get_mut(anchor);
        c.kind = TokenKind::OperatorVal;
        c.str.push_str(suffix);
        c.orig_col_end = end;
    }
    for id in rest {
        list.chunk_del(*id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::tokenizer::tokenize;

    fn run_on(src: &str) -> FormatContext {
        let lang = LangFlags::CPP;
        let chunks = tokenize(src, lang);
        let mut ctx = FormatContext::new(chunks, Options::new(lang), lang);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn merges_square_brackets_into_tsquare() {
        let ctx = run_on("int a[];");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::TSquare);
        assert!(found);
    }

    #[test]
    fn template_angles_are_marked_and_interior_flagged() {
        let ctx = run_on("vector<int> v;");
        let open = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::AngleOpen)
            .expect("template open survives");
        assert_eq!(ctx.chunks.get(open).ptype, TokenKind::Template);
        let int_tok = ctx.chunks.next(open).unwrap();
        assert!(ctx.chunks.get(int_tok).flags.contains(PcfFlags::IN_TEMPLATE));
    }

    #[test]
    fn comparison_chain_downgrades_both_angles() {
        let ctx = run_on("if (a < b && c > d) { }");
        let kinds: Vec<_> = ctx
            .chunks
            .iter()
            .map(|id| ctx.chunks.get(id).kind)
            .filter(|k| matches!(k, TokenKind::AngleOpen | TokenKind::AngleClose))
            .collect();
        assert!(kinds.is_empty());
    }

    #[test]
    fn nested_template_close_is_not_merged_into_shift() {
        let ctx = run_on("vector<vector<int>> v;");
        let closers: Vec<_> = ctx
            .chunks
            .iter()
            .map(|id| ctx.chunks.get(id).kind)
            .filter(|k| *k == TokenKind::AngleClose)
            .collect();
        assert_eq!(closers.len(), 2);
    }
}
