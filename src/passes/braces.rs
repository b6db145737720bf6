//! Option-driven brace add/remove, one-liner marking, and long-block
//! trailing comments (spec.md §4.7).

use crate::chunk::{Chunk, ChunkId};
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::options::{Iarf, Options};
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    mark_one_liners(&mut ctx.chunks);
    add_braces(&mut ctx.chunks, &ctx.options);
    remove_braces(&mut ctx.chunks, &ctx.options);
    add_long_block_comments(&mut ctx.chunks, &ctx.options);
}

fn mark_one_liners(list: &mut ChunkList) {
    let opens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::BraceOpen)
        .collect();
    for open in opens {
        let Some(close) = list.skip_to_match(open, Scope::All) else { continue };
        if list.get(open).orig_line != list.get(close).orig_line {
            continue;
        }
        let mut cur = Some(open);
        while let Some(id) = cur {
            list.get_mut(id).flags.insert(PcfFlags::ONE_LINER);
            if id == close {
                break;
            }
            cur = list.next(id);
        }
    }
}

fn full_brace_option(options: &Options, ptype: TokenKind) -> Iarf {
    let name = match ptype {
        TokenKind::If | TokenKind::Else => "mod_full_brace_if",
        TokenKind::For => "mod_full_brace_for",
        TokenKind::While => "mod_full_brace_while",
        TokenKind::Do => "mod_full_brace_do",
        _ => return Iarf::Ignore,
    };
    options.get_iarf(name)
}

fn add_braces(list: &mut ChunkList, options: &Options) {
    let vopens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::VbraceOpen)
        .collect();
    for vopen in vopens {
        let ptype = list.get(vopen).ptype;
        if !full_brace_option(options, ptype).wants_presence() {
            continue;
        }
        let Some(vclose) = list.skip_to_match(vopen, Scope::All) else { continue };
        {
            let c = list.get_mut(vopen);
            c.kind = TokenKind::BraceOpen;
            c.str = "{".to_string();
        }
        let c = list.get_mut(vclose);
        c.kind = TokenKind::BraceClose;
        c.str = "}".to_string();
    }
}

fn body_has_var_decl(list: &ChunkList, open: ChunkId, close: ChunkId) -> bool {
    let mut cur = list.next(open);
    while let Some(id) = cur {
        if id == close {
            break;
        }
        if list.get(id).flags.contains(PcfFlags::VAR_DEF) || list.get(id).kind == TokenKind::Typedef
        {
            return true;
        }
        cur = list.next(id);
    }
    false
}

fn newline_span(list: &ChunkList, open: ChunkId, close: ChunkId) -> u32 {
    let mut cur = list.next(open);
    let mut total = 0u32;
    while let Some(id) = cur {
        if id == close {
            break;
        }
        if list.get(id).kind == TokenKind::Newline {
            total += list.get(id).nl_count;
        }
        cur = list.next(id);
    }
    total
}

fn remove_braces(list: &mut ChunkList, options: &Options) {
    let opens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::BraceOpen)
        .collect();
    let max_nl = options.get_unsigned("mod_full_brace_nl");

    for open in opens {
        let ptype = list.get(open).ptype;
        if !full_brace_option(options, ptype).wants_absence() {
            continue;
        }
        if list.get(open).flags.contains(PcfFlags::IN_PREPROC) {
            continue;
        }
        if list.get(open).flags.contains(PcfFlags::KEEP_BRACE) {
            continue;
        }
        let Some(close) = list.skip_to_match(open, Scope::All) else { continue };
        if body_has_var_decl(list, open, close) {
            continue;
        }
        if max_nl != 0 && newline_span(list, open, close) > max_nl as u32 {
            continue;
        }
        {
            let c = list.get_mut(open);
            c.kind = TokenKind::VbraceOpen;
            c.str.clear();
        }
        let c = list.get_mut(close);
        c.kind = TokenKind::VbraceClose;
        c.str.clear();
    }
}

fn add_long_block_comments(list: &mut ChunkList, options: &Options) {
    if !options.get_bool("mod_add_long_closebrace_comment_enabled") {
        return;
    }
    let threshold = options.get_unsigned("mod_add_long_closebrace_comment") as u32;
    let closes: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::BraceClose)
        .collect();
    for close in closes {
        let Some(open) = list.prev_type_at_level(
            close,
            TokenKind::BraceOpen,
            list.get(close).level,
            Scope::All,
        ) else {
            continue;
        };
        let span = list.get(close).orig_line.saturating_sub(list.get(open).orig_line);
        if span <= threshold {
            continue;
        }
        let ptype = list.get(open).ptype;
        let label = match ptype {
            TokenKind::Namespace => "namespace",
            TokenKind::Class => "class",
            TokenKind::Struct => "struct",
            TokenKind::If => "if",
            TokenKind::For => "for",
            TokenKind::While => "while",
            _ => continue,
        };
        let mut comment = Chunk::new(TokenKind::CommentMulti, format!("/* {label} */"));
        comment.flags.insert(PcfFlags::INSERTED);
        list.add_after(comment, close);
    }
}
