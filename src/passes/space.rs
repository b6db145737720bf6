//! Inter-chunk whitespace pass (spec.md §4.9). For every adjacent pair on
//! the same source line, decides whether a single space belongs between
//! them and records the decision on `PcfFlags::SPACE_BEFORE`; `passes::indent`
//! and `passes::align` consume the flag (plus token length) to derive each
//! chunk's output `column`, rather than stamping columns here directly,
//! since the indent pass still has to shift whole lines afterward.
//!
//! The real tool keys roughly 250 rules on `(a.type, b.type, context)`; this
//! covers the subset with a corresponding `sp_*` option in
//! `options::defaults` and falls back to preserving whatever gap the source
//! already had (spec.md §7's "do no harm" default) for everything else.

use crate::chunk::{Chunk, ChunkId};
use crate::chunk_list::ChunkList;
use crate::context::FormatContext;
use crate::options::{Iarf, Options};
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    apply_spacing(&mut ctx.chunks, &ctx.options);
}

fn apply_spacing(list: &mut ChunkList, options: &Options) {
    let ids: Vec<ChunkId> = list.iter().collect();
    for pair in ids.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if list.get(b).kind == TokenKind::Newline || list.get(a).kind == TokenKind::Newline {
            continue;
        }
        let wants_space = space_needed(list, options, a, b);
        if wants_space {
            list.get_mut(b).flags.insert(PcfFlags::SPACE_BEFORE);
        } else {
            list.get_mut(b).flags.remove(PcfFlags::SPACE_BEFORE);
        }
    }
}

/// `true` if a space belongs between `a` and `b`. Exposed for `passes::align`,
/// which needs the same decision when recomputing a shifted line's layout.
pub fn space_needed(list: &ChunkList, options: &Options, a: ChunkId, b: ChunkId) -> bool {
    let ca = list.get(a);
    let cb = list.get(b);
    match rule_for(ca, cb) {
        Some(name) => match options.get_iarf(name) {
            Iarf::Add | Iarf::Force => true,
            Iarf::Remove => false,
            Iarf::Ignore => had_original_gap(ca, cb),
        },
        None => had_original_gap(ca, cb),
    }
}

fn had_original_gap(a: &Chunk, b: &Chunk) -> bool {
    if a.orig_line != b.orig_line {
        return true; // shouldn't happen for same-line pairs; fail open
    }
    if a.orig_line == 0 && a.orig_col == 0 {
        return true; // one side is synthetic (inserted); default to readable
    }
    b.orig_col > a.orig_col_end
}

fn rule_for(a: &Chunk, b: &Chunk) -> Option<&'static str> {
    use TokenKind::*;
    if b.kind == Comma {
        return Some("sp_before_comma");
    }
    if a.kind == Comma {
        return Some("sp_after_comma");
    }
    if a.kind == ParenOpen || b.kind == ParenClose {
        return Some("sp_inside_paren");
    }
    if a.kind == SparenOpen || b.kind == SparenClose {
        return Some("sp_inside_sparen");
    }
    if a.kind == FparenOpen || b.kind == FparenClose {
        return Some("sp_inside_fparen");
    }
    if a.kind.is_control_statement() && b.kind == SparenOpen {
        return Some("sp_before_sparen");
    }
    if b.kind == FparenOpen {
        return Some(if a.ptype == FuncCall {
            "sp_func_call_paren"
        } else {
            "sp_before_fparen"
        });
    }
    if a.kind == PtrType {
        return Some("sp_after_ptr_star");
    }
    if b.kind == PtrType {
        return Some("sp_before_ptr_star");
    }
    if a.kind == Assign || b.kind == Assign {
        return Some("sp_around_assign");
    }
    if a.kind == Compare || b.kind == Compare {
        return Some("sp_around_compare");
    }
    if a.kind == Boolean || b.kind == Boolean {
        return Some("sp_around_boolean");
    }
    if a.kind == Arith || b.kind == Arith {
        return Some("sp_around_arith");
    }
    if b.kind == Semicolon {
        return Some("sp_before_semi");
    }
    if b.kind == SquareOpen {
        return Some("sp_before_square");
    }
    if a.kind == BraceOpen || b.kind == BraceClose {
        return Some("sp_inside_braces");
    }
    if a.kind == AngleClose && (b.kind == ParenOpen || b.kind == FparenOpen) {
        return Some("sp_angle_paren");
    }
    None
}
