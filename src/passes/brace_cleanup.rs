//! Level assignment and virtual-brace synthesis (spec.md §4.4).
//!
//! Runs in two passes: first every braceless control-statement body gets a
//! synthesized `VBRACE_OPEN`/`VBRACE_CLOSE` pair spliced in, then a single
//! stack-tracking walk assigns `level`/`brace_level`/`pp_level` to every
//! chunk, real and virtual braces alike.

use crate::chunk::{Chunk, ChunkId};
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    insert_virtual_braces(&mut ctx.chunks);
    assign_levels(&mut ctx.chunks);
}

fn is_braceless_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::If | TokenKind::While | TokenKind::Switch | TokenKind::For
            | TokenKind::Do
            | TokenKind::Else
    )
}

fn insert_virtual_braces(list: &mut ChunkList) {
    let keywords: Vec<ChunkId> = list
        .iter()
        .filter(|&id| is_braceless_keyword(list.get(id).kind))
        .collect();

    for keyword in keywords {
        let kind = list.get(keyword).kind;

        if kind == TokenKind::While && closes_a_do_loop(list, keyword) {
            continue;
        }

        let Some(body_start) = find_body_start(list, keyword) else {
            continue;
        };
        if list.get(body_start).kind == TokenKind::BraceOpen {
            continue;
        }
        if kind == TokenKind::Else && list.get(body_start).kind == TokenKind::If {
            continue;
        }

        let mut vopen = Chunk::new_virtual_brace(TokenKind::VbraceOpen);
        vopen.ptype = kind;
        vopen.orig_line = list.get(body_start).orig_line;
        list.add_before(vopen, body_start);

        let mut vclose = Chunk::new_virtual_brace(TokenKind::VbraceClose);
        vclose.ptype = kind;
        match find_statement_terminator(list, body_start) {
            Some(term) => {
                vclose.orig_line = list.get(term).orig_line;
                list.add_after(vclose, term);
            }
            None => {
                list.add_tail(vclose);
            }
        }
    }
}

fn closes_a_do_loop(list: &ChunkList, while_kw: ChunkId) -> bool {
    match list.prev_ncnnl(while_kw, Scope::All) {
        Some(p) => {
            let c = list.get(p);
            (c.kind == TokenKind::BraceClose || c.kind == TokenKind::VbraceClose)
                && c.ptype == TokenKind::Do
        }
        None => false,
    }
}

fn find_body_start(list: &ChunkList, keyword: ChunkId) -> Option<ChunkId> {
    match list.get(keyword).kind {
        TokenKind::If | TokenKind::While | TokenKind::Switch | TokenKind::For => {
            let paren_open = list.next_ncnnl(keyword, Scope::All)?;
            if list.get(paren_open).kind != TokenKind::ParenOpen {
                return None;
            }
            let paren_close = list.skip_to_match(paren_open, Scope::All)?;
            list.next_ncnnl(paren_close, Scope::All)
        }
        TokenKind::Do | TokenKind::Else => list.next_ncnnl(keyword, Scope::All),
        _ => None,
    }
}

fn find_statement_terminator(list: &ChunkList, body_start: ChunkId) -> Option<ChunkId> {
    let mut depth = 0i32;
    let mut cur = body_start;
    loop {
        let kind = list.get(cur).kind;
        match kind {
            TokenKind::ParenOpen | TokenKind::SquareOpen | TokenKind::BraceOpen => depth += 1,
            TokenKind::ParenClose | TokenKind::SquareClose | TokenKind::BraceClose => depth -= 1,
            TokenKind::Semicolon | TokenKind::VSemicolon if depth <= 0 => return Some(cur),
            _ => {}
        }
        cur = list.next(cur)?;
    }
}

fn brace_count(stack: &[TokenKind]) -> u16 {
    stack
        .iter()
        .filter(|k| matches!(k, TokenKind::BraceOpen | TokenKind::VbraceOpen))
        .count() as u16
}

fn assign_levels(list: &mut ChunkList) {
    let mut stack: Vec<TokenKind> = Vec::new();
    let mut pp_depth: u16 = 0;
    let ids: Vec<ChunkId> = list.iter().collect();

    for id in ids {
        let kind = list.get(id).kind;

        match kind {
            TokenKind::PpIf => {
                list.get_mut(id).pp_level = pp_depth;
                pp_depth += 1;
            }
            TokenKind::PpEndif => {
                pp_depth = pp_depth.saturating_sub(1);
                list.get_mut(id).pp_level = pp_depth;
            }
            _ => list.get_mut(id).pp_level = pp_depth,
        }

        if list.get(id).flags.contains(PcfFlags::IN_PREPROC) {
            // spec.md §4.4's preprocessor-isolation invariant: a directive's
            // own delimiters (e.g. an unbalanced brace in a macro body) are
            // frozen at the surrounding code's current depth and never push
            // or pop `stack`, so they can't corrupt the level of the real
            // code that follows.
            let c = list.get_mut(id);
            c.level = stack.len() as u16;
            c.brace_level = brace_count(&stack);
            continue;
        }

        match kind {
            TokenKind::ParenClose
            | TokenKind::SquareClose
            | TokenKind::BraceClose
            | TokenKind::VbraceClose => {
                stack.pop();
                let level = stack.len() as u16;
                let c = list.get_mut(id);
                c.level = level;
                c.brace_level = brace_count(&stack);
            }
            TokenKind::ParenOpen
            | TokenKind::SquareOpen
            | TokenKind::BraceOpen
            | TokenKind::VbraceOpen => {
                let level = stack.len() as u16;
                {
                    let c = list.get_mut(id);
                    c.level = level;
                    c.brace_level = brace_count(&stack);
                }
                stack.push(kind);
            }
            _ => {
                let c = list.get_mut(id);
                c.level = stack.len() as u16;
                c.brace_level = brace_count(&stack);
            }
        }
    }
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
        run(&mut ctx);
        ctx
    }

    #[test]
    fn braceless_if_body_gets_virtual_braces() {
        let ctx = run_on("if (x) y;");
        let kinds: Vec<_> = ctx.chunks.iter().map(|id| ctx.chunks.get(id).kind).collect();
        assert!(kinds.contains(&TokenKind::VbraceOpen));
        assert!(kinds.contains(&TokenKind::VbraceClose));
    }

    #[test]
    fn braced_if_body_gets_no_virtual_braces() {
        let ctx = run_on("if (x) { y; }");
        let kinds: Vec<_> = ctx.chunks.iter().map(|id| ctx.chunks.get(id).kind).collect();
        assert!(!kinds.contains(&TokenKind::VbraceOpen));
    }

    #[test]
    fn matching_delimiters_share_level() {
        let ctx = run_on("a(b(c));");
        let outer_open = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::ParenOpen)
            .unwrap();
        let outer_close = ctx.chunks.skip_to_match(outer_open, Scope::All).unwrap();
        assert_eq!(
            ctx.chunks.get(outer_open).level,
            ctx.chunks.get(outer_close).level
        );
    }

    #[test]
    fn do_while_trailing_while_gets_no_virtual_brace() {
        let ctx = run_on("do { x(); } while (cond);");
        let vbraces = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::VbraceOpen)
            .count();
        assert_eq!(vbraces, 0);
    }

    #[test]
    fn preprocessor_braces_do_not_corrupt_surrounding_levels() {
        let ctx = run_on("#define FOO {\nvoid f() {\nx();\n}\n");
        let x_call = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::Word && ctx.chunks.get(id).str == "x")
            .unwrap();
        assert_eq!(ctx.chunks.get(x_call).level, 1);
    }

    #[test]
    fn else_if_chain_does_not_double_wrap() {
        let ctx = run_on("if (a) x(); else if (b) y(); else z();");
        let vopens = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::VbraceOpen)
            .count();
        // one for `x();`, one for `y();`, one for `z();`
        assert_eq!(vopens, 3);
    }
}
