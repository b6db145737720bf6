//! Newline insertion/removal around configurable constructs (spec.md §4.8).
//! Every edit routes through [`apply_iarf`], which mirrors the source
//! tool's `newline_add_between`/`newline_del_between` refusal rules:
//! preprocessor boundaries are never crossed and one-liners are left alone.

use crate::chunk::{Chunk, ChunkId};
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::options::{Iarf, Options};
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    let options = ctx.options.clone();
    control_keyword_braces(&mut ctx.chunks, &options);
    cuddled_else(&mut ctx.chunks, &options);
    function_def_brace(&mut ctx.chunks, &options);
    after_semicolon(&mut ctx.chunks, &options);
    before_return(&mut ctx.chunks, &options);
}

/// Returns the single `NEWLINE` chunk directly between `a` and `b`, if any;
/// `None` means `a` and `b` sit on the same source line.
fn newline_between(list: &ChunkList, a: ChunkId, b: ChunkId) -> Option<ChunkId> {
    let n = list.next(a)?;
    if list.get(n).kind == TokenKind::Newline && list.next(n) == Some(b) {
        Some(n)
    } else {
        None
    }
}

fn crosses_preproc_boundary(list: &ChunkList, a: ChunkId, b: ChunkId) -> bool {
    list.get(a).flags.contains(PcfFlags::IN_PREPROC) != list.get(b).flags.contains(PcfFlags::IN_PREPROC)
}

fn either_one_liner(list: &ChunkList, a: ChunkId, b: ChunkId) -> bool {
    list.get(a).flags.contains(PcfFlags::ONE_LINER) || list.get(b).flags.contains(PcfFlags::ONE_LINER)
}

fn insert_newline_unconditional(list: &mut ChunkList, a: ChunkId, b: ChunkId) {
    match newline_between(list, a, b) {
        Some(nl) => {
            if list.get(nl).nl_count == 0 {
                list.get_mut(nl).nl_count = 1;
            }
        }
        None => {
            let mut chunk = Chunk::new(TokenKind::Newline, "\n");
            chunk.nl_count = 1;
            chunk.flags.insert(PcfFlags::INSERTED);
            list.add_after(chunk, a);
        }
    }
}

/// `ADD` respects `ONE_LINER`: it never gratuitously restructures a body
/// that fits on one source line.
fn newline_add_between(list: &mut ChunkList, a: ChunkId, b: ChunkId) {
    if crosses_preproc_boundary(list, a, b) || either_one_liner(list, a, b) {
        return;
    }
    insert_newline_unconditional(list, a, b);
}

/// `FORCE` overrides `ONE_LINER` (this is how `nl_if_brace = force` expands
/// a one-line `if` body), clearing the flag on the split site the same way
/// `undo_one_liner` would.
fn newline_force_between(list: &mut ChunkList, a: ChunkId, b: ChunkId) {
    if crosses_preproc_boundary(list, a, b) {
        return;
    }
    insert_newline_unconditional(list, a, b);
    if let Some(nl) = newline_between(list, a, b) {
        list.get_mut(nl).nl_count = 1;
    }
    list.get_mut(a).flags.remove(PcfFlags::ONE_LINER);
    list.get_mut(b).flags.remove(PcfFlags::ONE_LINER);
}

fn newline_del_between(list: &mut ChunkList, a: ChunkId, b: ChunkId) {
    if crosses_preproc_boundary(list, a, b) {
        return;
    }
    if list.get(a).kind == TokenKind::CommentCpp {
        return;
    }
    if let Some(nl) = newline_between(list, a, b) {
        list.chunk_del(nl);
    }
}

fn apply_iarf(list: &mut ChunkList, a: ChunkId, b: ChunkId, value: Iarf) {
    match value {
        Iarf::Ignore => {}
        Iarf::Add => newline_add_between(list, a, b),
        Iarf::Force => newline_force_between(list, a, b),
        Iarf::Remove => newline_del_between(list, a, b),
    }
}

fn brace_option_name(ptype: TokenKind) -> Option<&'static str> {
    Some(match ptype {
        TokenKind::If => "nl_if_brace",
        TokenKind::Else => "nl_else_brace",
        TokenKind::For => "nl_for_brace",
        TokenKind::While => "nl_while_brace",
        TokenKind::Do => "nl_do_brace",
        TokenKind::Switch => "nl_switch_brace",
        _ => return None,
    })
}

fn control_keyword_braces(list: &mut ChunkList, options: &Options) {
    let braces: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::BraceOpen)
        .collect();
    for brace in braces {
        let ptype = list.get(brace).ptype;
        let Some(opt_name) = brace_option_name(ptype) else { continue };
        let Some(anchor) = list.prev_ncnnl(brace, Scope::All) else { continue };
        let value = options.get_iarf(opt_name);
        apply_iarf(list, anchor, brace, value);
    }
}

fn cuddled_else(list: &mut ChunkList, options: &Options) {
    let value = options.get_iarf("nl_brace_else");
    let closes: Vec<ChunkId> = list
        .iter()
        .filter(|&id| {
            list.get(id).kind == TokenKind::BraceClose && list.get(id).ptype == TokenKind::If
        })
        .collect();
    for close in closes {
        let Some(next) = list.next_ncnnl(close, Scope::All) else { continue };
        if list.get(next).kind != TokenKind::Else {
            continue;
        }
        apply_iarf(list, close, next, value);
    }
}

fn function_def_brace(list: &mut ChunkList, options: &Options) {
    let value = options.get_iarf("nl_fdef_brace");
    let words: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).ptype == TokenKind::FuncDef)
        .collect();
    for word in words {
        let Some(paren_open) = list.next_nc(word, Scope::All) else { continue };
        if list.get(paren_open).kind != TokenKind::FparenOpen {
            continue;
        }
        let Some(paren_close) = list.skip_to_match(paren_open, Scope::All) else { continue };
        let Some(brace) = list.next_ncnnl(paren_close, Scope::All) else { continue };
        if list.get(brace).kind != TokenKind::BraceOpen {
            continue;
        }
        apply_iarf(list, paren_close, brace, value);
    }
}

fn after_semicolon(list: &mut ChunkList, options: &Options) {
    let value = options.get_iarf("nl_after_semicolon");
    if value == Iarf::Ignore {
        return;
    }
    let semis: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Semicolon)
        .collect();
    for semi in semis {
        if list.get(semi).flags.contains(PcfFlags::IN_FOR) {
            continue;
        }
        let Some(next) = list.next(semi) else { continue };
        if list.get(next).kind == TokenKind::BraceClose {
            continue;
        }
        apply_iarf(list, semi, next, value);
    }
}

fn before_return(list: &mut ChunkList, options: &Options) {
    let value = options.get_iarf("nl_before_return_stmt");
    if value == Iarf::Ignore {
        return;
    }
    let returns: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Return)
        .collect();
    for ret in returns {
        let Some(prev) = list.prev_ncnnl(ret, Scope::All) else { continue };
        if prev == ret {
            continue;
        }
        apply_iarf(list, prev, ret, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::OptionValue;
    use crate::tokenizer::tokenize;

    fn run_on(src: &str, opts: &[(&'static str, OptionValue)]) -> FormatContext {
        let lang = LangFlags::C;
        let chunks = tokenize(src, lang);
        let mut options = Options::new(lang);
        for (k, v) in opts {
            options.set(k, v.clone());
        }
        let mut ctx = FormatContext::new(chunks, options, lang);
        crate::passes::tokenize_cleanup::run(&mut ctx);
        crate::passes::brace_cleanup::run(&mut ctx);
        crate::passes::combine::run(&mut ctx);
        crate::passes::braces::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn forces_newline_before_if_brace() {
        let ctx = run_on(
            "if (x) { y; }",
            &[("nl_if_brace", OptionValue::Iarf(Iarf::Force))],
        );
        let brace = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::BraceOpen)
            .unwrap();
        let prev = ctx.chunks.prev(brace).unwrap();
        assert_eq!(ctx.chunks.get(prev).kind, TokenKind::Newline);
    }

    #[test]
    fn removes_newline_before_if_brace() {
        let ctx = run_on(
            "if (x)\n{ y; }",
            &[("nl_if_brace", OptionValue::Iarf(Iarf::Remove))],
        );
        let brace = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::BraceOpen)
            .unwrap();
        let prev = ctx.chunks.prev(brace).unwrap();
        assert_ne!(ctx.chunks.get(prev).kind, TokenKind::Newline);
    }

    #[test]
    fn ignore_leaves_existing_layout_untouched() {
        let ctx = run_on("if (x)\n{ y; }", &[]);
        let brace = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::BraceOpen)
            .unwrap();
        let prev = ctx.chunks.prev(brace).unwrap();
        assert_eq!(ctx.chunks.get(prev).kind, TokenKind::Newline);
    }
}
