//! Pawn virtual-semicolon synthesis and scrubbing (spec.md §4.6). A no-op
//! for languages that require explicit terminators.

use crate::chunk::{Chunk, ChunkId};
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::language::LangFlags;
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    if !ctx.lang.contains(LangFlags::PAWN) {
        return;
    }
    insert_virtual_semicolons(&mut ctx.chunks);
    scrub_redundant(&mut ctx.chunks);
}

fn is_continuation(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Comma
            | TokenKind::Arith
            | TokenKind::Boolean
            | TokenKind::Compare
            | TokenKind::Assign
            | TokenKind::Question
            | TokenKind::CondColon
            | TokenKind::ParenOpen
            | TokenKind::SquareOpen
            | TokenKind::BraceOpen
            | TokenKind::DcMember
            | TokenKind::Member
            | TokenKind::Arrow
            | TokenKind::PtrType
            | TokenKind::Addr
            | TokenKind::Deref
            | TokenKind::Byref
            | TokenKind::Pos
            | TokenKind::Neg
            | TokenKind::Not
            | TokenKind::BitNot
            | TokenKind::IncBefore
            | TokenKind::DecBefore
    )
}

fn insert_virtual_semicolons(list: &mut ChunkList) {
    let newlines: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Newline)
        .collect();

    for nl in newlines {
        let Some(prev) = list.prev_nc(nl, Scope::All) else { continue };
        let c = list.get(prev);
        if c.flags.contains(PcfFlags::IN_PREPROC) {
            continue;
        }
        if c.kind.is_semicolon() || is_continuation(c.kind) {
            continue;
        }
        list.add_after(Chunk::new_virtual_semicolon(), prev);
    }

    if let Some(tail) = list.tail() {
        let kind = list.get(tail).kind;
        if kind != TokenKind::Newline && !kind.is_semicolon() && !is_continuation(kind) {
            list.add_tail(Chunk::new_virtual_semicolon());
        }
    }
}

fn scrub_redundant(list: &mut ChunkList) {
    let redundant_after: [TokenKind; 5] = [
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Switch,
        TokenKind::Case,
        TokenKind::While,
    ];
    let vsemis: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::VSemicolon)
        .collect();
    for id in vsemis {
        let Some(prev) = list.prev(id) else { continue };
        let c = list.get(prev);
        let redundant = matches!(c.kind, TokenKind::BraceClose | TokenKind::VbraceClose)
            && redundant_after.contains(&c.ptype);
        if redundant {
            list.chunk_del(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::tokenizer::tokenize;

    fn run_on(src: &str) -> FormatContext {
        let lang = LangFlags::PAWN;
        let chunks = tokenize(src, lang);
        let mut ctx = FormatContext::new(chunks, Options::new(lang), lang);
        crate::passes::tokenize_cleanup::run(&mut ctx);
        crate::passes::brace_cleanup::run(&mut ctx);
        crate::passes::combine::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn inserts_virtual_semicolon_at_bare_statement_end() {
        let ctx = run_on("x = 1\ny = 2\n");
        let count = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::VSemicolon)
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn does_not_insert_after_continuation_operator() {
        let ctx = run_on("x = 1 +\n2\n");
        let count = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::VSemicolon)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn non_pawn_languages_are_untouched() {
        let chunks = tokenize("x = 1\ny = 2\n", LangFlags::C);
        let mut ctx = FormatContext::new(chunks, Options::new(LangFlags::C), LangFlags::C);
        run(&mut ctx);
        let count = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::VSemicolon)
            .count();
        assert_eq!(count, 0);
    }
}
