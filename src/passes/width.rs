//! Line-width enforcement (spec.md §4.12). When a physical line's last
//! chunk ends past `code_width`, finds the best eligible split point and
//! inserts a line break there, then re-runs `passes::indent` to recompute
//! `column` for the newly created line (its first chunk becomes a
//! continuation line, picking up `indent_continue`). Repeats, bounded, since
//! a single split can still leave a remainder over width.
//!
//! Split sites are ranked by the priority table `original_source/src/width.cpp`
//! uses: lower number wins. `for(;;)` headers get a small memo
//! (`already_split`) of sparens already broken once, so the bounded
//! indent<->width loop here is guaranteed to converge rather than
//! re-splitting the same header forever (spec.md's "Open Question" on
//! width/indent interaction).

use std::collections::HashSet;

use crate::chunk::{Chunk, ChunkId};
use crate::chunk_list::ChunkList;
use crate::context::FormatContext;
use crate::options::Options;
use crate::token::{PcfFlags, TokenKind};

const MAX_PASSES: u32 = 16;

pub fn run(ctx: &mut FormatContext) {
    let width = ctx.options.get_unsigned("code_width") as u32;
    if width == 0 {
        return;
    }
    let mut split_for_headers: HashSet<ChunkId> = HashSet::new();

    for _ in 0..MAX_PASSES {
        let overflowing = overflowing_line_starts(&ctx.chunks, width);
        if overflowing.is_empty() {
            break;
        }
        let changes_before = ctx.changes;
        for line_start in overflowing {
            if split_line(&mut ctx.chunks, line_start, width, &mut split_for_headers) {
                ctx.mark_changed();
            }
        }
        if ctx.changes == changes_before {
            break;
        }
        let options = ctx.options.clone();
        super::indent::run_with(&mut ctx.chunks, &options);
    }
}

fn overflowing_line_starts(list: &ChunkList, width: u32) -> Vec<ChunkId> {
    let mut starts = Vec::new();
    let mut cur = list.head();
    let mut at_start = true;
    let mut current_start = None;
    let mut line_end_col = 0u32;
    while let Some(id) = cur {
        if at_start {
            current_start = Some(id);
            line_end_col = 0;
        }
        let c = list.get(id);
        if c.kind != TokenKind::Newline {
            line_end_col = line_end_col.max(c.column + c.len() as u32);
        } else if let Some(start) = current_start {
            if line_end_col > width {
                starts.push(start);
            }
        }
        at_start = c.kind == TokenKind::Newline;
        cur = list.next(id);
    }
    if let Some(start) = current_start {
        if !at_start && line_end_col > width {
            starts.push(start);
        }
    }
    starts
}

struct Candidate {
    after: ChunkId,
    priority: u8,
    column: u32,
}

fn split_line(
    list: &mut ChunkList,
    line_start: ChunkId,
    width: u32,
    split_for_headers: &mut HashSet<ChunkId>,
) -> bool {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut cur = line_start;
    loop {
        if let Some(next) = list.next(cur) {
            if list.get(next).kind == TokenKind::Newline {
                break;
            }
            if let Some(priority) = break_priority(list, cur, next, split_for_headers) {
                candidates.push(Candidate {
                    after: cur,
                    priority,
                    column: list.get(cur).column + list.get(cur).len() as u32,
                });
            }
            cur = next;
        } else {
            break;
        }
    }
    if candidates.is_empty() {
        return false;
    }

    let within_width: Vec<&Candidate> = candidates.iter().filter(|c| c.column <= width).collect();
    let chosen = if !within_width.is_empty() {
        within_width
            .into_iter()
            .min_by_key(|c| (c.priority, u32::MAX - c.column))
            .unwrap()
    } else {
        candidates.iter().min_by_key(|c| (c.priority, c.column)).unwrap()
    };

    let after = chosen.after;
    if list.get(after).flags.contains(PcfFlags::IN_FOR) {
        split_for_headers.insert(after);
    }

    let mut nl = Chunk::new(TokenKind::Newline, "\n");
    nl.nl_count = 1;
    nl.flags.insert(PcfFlags::INSERTED);
    list.add_after(nl, after);
    true
}

/// Priority table, lower value splits first. `None` means this boundary is
/// not an eligible split site at all.
fn break_priority(
    list: &ChunkList,
    a: ChunkId,
    b: ChunkId,
    split_for_headers: &HashSet<ChunkId>,
) -> Option<u8> {
    use TokenKind::*;
    let ca = list.get(a);
    let cb = list.get(b);

    if ca.kind == Semicolon && ca.flags.contains(PcfFlags::IN_FOR) {
        // Only offer a `for(;;)` header once; after that, stop splitting it
        // further so the indent<->width loop terminates.
        return if split_for_headers.contains(&a) {
            None
        } else {
            Some(9)
        };
    }
    if ca.kind == Semicolon {
        return Some(1);
    }
    if ca.kind == Comma {
        return Some(2);
    }
    if ca.kind == Boolean || cb.kind == Boolean {
        return Some(3);
    }
    if ca.kind == Compare || cb.kind == Compare {
        return Some(4);
    }
    if ca.kind == Arith || cb.kind == Arith {
        return Some(5);
    }
    if ca.str == "^" || cb.str == "^" {
        return Some(6);
    }
    if ca.kind == Assign || cb.kind == Assign {
        return Some(7);
    }
    if ca.kind == String && cb.kind == String {
        return Some(8);
    }
    if ca.kind == Question || ca.kind == CondColon {
        return Some(20);
    }
    if cb.kind == FparenOpen {
        return Some(21);
    }
    if ca.kind == Qualifier || ca.kind == Type {
        return Some(25);
    }
    None
}
