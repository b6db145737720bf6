//! Redundant-semicolon removal: a bare `;;` run, and a `;` immediately after
//! a `}` that closed a `namespace`/`class`/`struct` body (legal-but-redundant
//! C++, per `original_source/src/semicolons.cpp`).

use crate::chunk::ChunkId;
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    if ctx.options.get_bool("mod_remove_extra_semicolon") {
        remove_extra_semicolons(&mut ctx.chunks);
    }
    if ctx.options.get_bool("mod_remove_semicolon_after_brace") {
        remove_semicolon_after_aggregate_brace(&mut ctx.chunks);
    }
}

fn remove_extra_semicolons(list: &mut ChunkList) {
    let semis: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Semicolon)
        .collect();
    for id in semis {
        let Some(prev) = list.prev_ncnnl(id, Scope::All) else { continue };
        let redundant = list.get(prev).kind == TokenKind::Semicolon
            && !list.get(id).flags.contains(PcfFlags::IN_FOR)
            && !list.get(prev).flags.contains(PcfFlags::IN_FOR);
        if redundant {
            list.chunk_del(id);
        }
    }
}

fn remove_semicolon_after_aggregate_brace(list: &mut ChunkList) {
    let semis: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Semicolon)
        .collect();
    for id in semis {
        let Some(prev) = list.prev_ncnnl(id, Scope::All) else { continue };
        if list.get(prev).kind != TokenKind::BraceClose {
            continue;
        }
        let ptype = list.get(prev).ptype;
        if matches!(
            ptype,
            TokenKind::Namespace | TokenKind::Class | TokenKind::Struct
        ) {
            list.chunk_del(id);
        }
    }
}
