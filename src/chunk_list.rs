//! Owning, arena-backed doubly-linked chunk graph (spec.md §4.1).
//!
//! The source tool represents this as raw `prev`/`next` pointers on
//! heap-allocated nodes. Per spec.md §9's redesign note, chunks instead live
//! in a `Vec`-backed arena addressed by stable [`ChunkId`]s, with neighbors
//! stored as `Option<ChunkId>`. "Delete" tombstones a slot (sets it to
//! `None`); nothing here ever shifts other chunks' ids, so ids taken before
//! a delete stay meaningful to compare (they just stop resolving).

use crate::chunk::{Chunk, ChunkId};
use crate::token::{PcfFlags, TokenKind};

/// Preprocessor-isolation scope for navigation (spec.md §4.1, §9's
/// supplemented uniform-`scope`-parameter contract).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    /// Respect preprocessor isolation: crossing out of a `#...` run from
    /// inside it is refused; crossing in from outside skips the whole run.
    All,
    /// Traverse every chunk, preprocessor or not.
    Preproc,
}

#[derive(Debug, Default)]
pub struct ChunkList {
    slots: Vec<Option<Chunk>>,
    head: Option<ChunkId>,
    tail: Option<ChunkId>,
    len: usize,
}

impl ChunkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<ChunkId> {
        self.head
    }

    pub fn tail(&self) -> Option<ChunkId> {
        self.tail
    }

    pub fn get(&self, id: ChunkId) -> &Chunk {
        self.slots[id.index()]
            .as_ref()
            .expect("ChunkId referenced a tombstoned or out-of-range slot")
    }

    pub fn get_mut(&mut self, id: ChunkId) -> &mut Chunk {
        self.slots[id.index()]
            .as_mut()
            .expect("ChunkId referenced a tombstoned or out-of-range slot")
    }

    pub fn try_get(&self, id: ChunkId) -> Option<&Chunk> {
        self.slots.get(id.index()).and_then(|s| s.as_ref())
    }

    pub fn next(&self, id: ChunkId) -> Option<ChunkId> {
        self.get(id).next
    }

    pub fn prev(&self, id: ChunkId) -> Option<ChunkId> {
        self.get(id).prev
    }

    fn alloc(&mut self, chunk: Chunk) -> ChunkId {
        let id = ChunkId(self.slots.len() as u32);
        self.slots.push(Some(chunk));
        self.len += 1;
        id
    }

    pub fn add_tail(&mut self, chunk: Chunk) -> ChunkId {
        let id = self.alloc(chunk);
        match self.tail {
            Some(old_tail) => {
                self.get_mut(old_tail).next = Some(id);
                self.get_mut(id).prev = Some(old_tail);
                self.tail = Some(id);
            }
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            }
        }
        id
    }

    pub fn add_head(&mut self, chunk: Chunk) -> ChunkId {
        let id = self.alloc(chunk);
        match self.head {
            Some(old_head) => {
                self.get_mut(old_head).prev = Some(id);
                self.get_mut(id).next = Some(old_head);
                self.head = Some(id);
            }
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            }
        }
        id
    }

    pub fn add_after(&mut self, chunk: Chunk, reference: ChunkId) -> ChunkId {
        let next = self.get(reference).next;
        let id = self.alloc(chunk);
        self.get_mut(id).prev = Some(reference);
        self.get_mut(id).next = next;
        self.get_mut(reference).next = Some(id);
        match next {
            Some(n) => self.get_mut(n).prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    pub fn add_before(&mut self, chunk: Chunk, reference: ChunkId) -> ChunkId {
        let prev = self.get(reference).prev;
        let id = self.alloc(chunk);
        self.get_mut(id).next = Some(reference);
        self.get_mut(id).prev = prev;
        self.get_mut(reference).prev = Some(id);
        match prev {
            Some(p) => self.get_mut(p).next = Some(id),
            None => self.head = Some(id),
        }
        id
    }

    /// Unlinks `id` from the list without destroying its slot. The chunk is
    /// still addressable via `get`/`get_mut` but is no longer reachable by
    /// traversal; a later `chunk_del` reclaims the slot.
    pub fn pop(&mut self, id: ChunkId) {
        let (prev, next) = {
            let c = self.get(id);
            (c.prev, c.next)
        };
        match prev {
            Some(p) => self.get_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.get_mut(n).prev = prev,
            None => self.tail = prev,
        }
        let c = self.get_mut(id);
        c.prev = None;
        c.next = None;
    }

    /// Unlinks and destroys `id`'s slot. Calling any accessor with this id
    /// afterward panics, matching the "borrowed reference" ownership model
    /// spec.md §3.1 describes.
    pub fn chunk_del(&mut self, id: ChunkId) {
        self.pop(id);
        self.slots[id.index()] = None;
        self.len -= 1;
    }

    /// Swap two arbitrary chunks' positions within the list (their content
    /// stays at the same `ChunkId`, only the list structure changes).
    pub fn swap(&mut self, a: ChunkId, b: ChunkId) {
        if a == b {
            return;
        }
        let a_prev = self.get(a).prev;
        let a_next = self.get(a).next;
        let b_prev = self.get(b).prev;
        let b_next = self.get(b).next;

        let relink = |list: &mut Self, id: ChunkId, prev: Option<ChunkId>, next: Option<ChunkId>| {
            list.get_mut(id).prev = prev;
            list.get_mut(id).next = next;
            match prev {
                Some(p) => list.get_mut(p).next = Some(id),
                None => list.head = Some(id),
            }
            match next {
                Some(n) => list.get_mut(n).prev = Some(id),
                None => list.tail = Some(id),
            }
        };

        if a_next == Some(b) {
            relink(self, b, a_prev, Some(a));
            relink(self, a, Some(b), b_next);
        } else if b_next == Some(a) {
            relink(self, a, b_prev, Some(b));
            relink(self, b, Some(a), a_next);
        } else {
            relink(self, a, b_prev, b_next);
            relink(self, b, a_prev, a_next);
        }
    }

    /// Swap two whole source lines by splicing the ranges delimited by the
    /// newlines that precede `a` and `b`. `a` and `b` must each be the first
    /// non-newline chunk on their respective line, with `a`'s line occurring
    /// before `b`'s line in the list.
    pub fn swap_lines(&mut self, a: ChunkId, b: ChunkId) {
        let a_end = self.line_end(a);
        let b_end = self.line_end(b);
        let before_a = self.get(a).prev;
        let after_a = self.get(a_end).next;
        let after_b = self.get(b_end).next;
        // Middle segment, if any, sits strictly between `a_end` and `b`.
        let middle_end = self.get(b).prev;

        let link = |list: &mut Self, left: Option<ChunkId>, right: Option<ChunkId>| {
            match left {
                Some(l) => list.get_mut(l).next = right,
                None => list.head = right,
            }
            match right {
                Some(r) => list.get_mut(r).prev = left,
                None => list.tail = left,
            }
        };

        link(self, before_a, Some(b));
        if after_a == Some(b) {
            // No middle segment: `a..=a_end` sat directly before `b..=b_end`.
            link(self, Some(b_end), Some(a));
        } else {
            link(self, Some(b_end), after_a);
            link(self, middle_end, Some(a));
        }
        link(self, Some(a_end), after_b);
    }

    fn line_end(&self, first_on_line: ChunkId) -> ChunkId {
        let mut cur = first_on_line;
        while let Some(n) = self.get(cur).next {
            if self.get(n).kind.is_newline() {
                break;
            }
            cur = n;
        }
        cur
    }

    pub fn get_first_on_line(&self, id: ChunkId) -> ChunkId {
        let mut cur = id;
        while let Some(p) = self.get(cur).prev {
            if self.get(p).kind.is_newline() {
                break;
            }
            cur = p;
        }
        cur
    }

    // ---- scope-aware primitive navigation -------------------------------

    fn preproc_run_end(&self, from: ChunkId) -> Option<ChunkId> {
        let mut cur = from;
        loop {
            match self.next(cur) {
                Some(n) if self.get(n).flags.contains(PcfFlags::IN_PREPROC) => cur = n,
                other => return other,
            }
        }
    }

    fn preproc_run_start(&self, from: ChunkId) -> Option<ChunkId> {
        let mut cur = from;
        loop {
            match self.prev(cur) {
                Some(p) if self.get(p).flags.contains(PcfFlags::IN_PREPROC) => cur = p,
                other => return other,
            }
        }
    }

    pub fn next_scoped(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        match scope {
            Scope::Preproc => self.next(id),
            Scope::All => {
                let cur_in_preproc = self.get(id).flags.contains(PcfFlags::IN_PREPROC);
                let candidate = self.next(id)?;
                let cand_in_preproc = self.get(candidate).flags.contains(PcfFlags::IN_PREPROC);
                match (cur_in_preproc, cand_in_preproc) {
                    (true, false) => None,
                    (false, true) => self.preproc_run_end(candidate),
                    _ => Some(candidate),
                }
            }
        }
    }

    pub fn prev_scoped(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        match scope {
            Scope::Preproc => self.prev(id),
            Scope::All => {
                let cur_in_preproc = self.get(id).flags.contains(PcfFlags::IN_PREPROC);
                let candidate = self.prev(id)?;
                let cand_in_preproc = self.get(candidate).flags.contains(PcfFlags::IN_PREPROC);
                match (cur_in_preproc, cand_in_preproc) {
                    (true, false) => None,
                    (false, true) => self.preproc_run_start(candidate),
                    _ => Some(candidate),
                }
            }
        }
    }

    // ---- "skip" helpers ---------------------------------------------------

    pub fn next_nc(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.skip_while(id, scope, Self::next_scoped, |c| c.kind.is_comment())
    }

    pub fn prev_nc(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.skip_while(id, scope, Self::prev_scoped, |c| c.kind.is_comment())
    }

    pub fn next_nnl(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.skip_while(id, scope, Self::next_scoped, |c| c.kind.is_newline())
    }

    pub fn prev_nnl(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.skip_while(id, scope, Self::prev_scoped, |c| c.kind.is_newline())
    }

    pub fn next_ncnnl(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.skip_while(id, scope, Self::next_scoped, |c| {
            c.kind.is_comment() || c.kind.is_newline()
        })
    }

    pub fn prev_ncnnl(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.skip_while(id, scope, Self::prev_scoped, |c| {
            c.kind.is_comment() || c.kind.is_newline()
        })
    }

    /// Next chunk that is not a newline and not a "blank" run (nl_count > 1
    /// doesn't itself disqualify; this only excludes newline sentinels).
    pub fn next_nblank(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.next_nnl(id, scope)
    }

    pub fn prev_nblank(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        self.prev_nnl(id, scope)
    }

    fn skip_while(
        &self,
        id: ChunkId,
        scope: Scope,
        step: impl Fn(&Self, ChunkId, Scope) -> Option<ChunkId>,
        should_skip: impl Fn(&Chunk) -> bool,
    ) -> Option<ChunkId> {
        let mut cur = step(self, id, scope)?;
        while should_skip(self.get(cur)) {
            cur = step(self, cur, scope)?;
        }
        Some(cur)
    }

    /// Next chunk with the given kind at the same `level` as `id`, within
    /// `scope`. Returns `None` if the level decreases below `id`'s level
    /// before a match is found.
    pub fn next_type_at_level(
        &self,
        id: ChunkId,
        kind: TokenKind,
        level: u16,
        scope: Scope,
    ) -> Option<ChunkId> {
        let mut cur = self.next_scoped(id, scope)?;
        loop {
            let c = self.get(cur);
            if c.level < level {
                return None;
            }
            if c.level == level && c.kind == kind {
                return Some(cur);
            }
            cur = self.next_scoped(cur, scope)?;
        }
    }

    pub fn prev_type_at_level(
        &self,
        id: ChunkId,
        kind: TokenKind,
        level: u16,
        scope: Scope,
    ) -> Option<ChunkId> {
        let mut cur = self.prev_scoped(id, scope)?;
        loop {
            let c = self.get(cur);
            if c.level < level {
                return None;
            }
            if c.level == level && c.kind == kind {
                return Some(cur);
            }
            cur = self.prev_scoped(cur, scope)?;
        }
    }

    /// Given an opener, returns its matching closer (and vice versa) by
    /// scanning forward/backward for the inverse kind at the same `level`.
    pub fn skip_to_match(&self, id: ChunkId, scope: Scope) -> Option<ChunkId> {
        let c = self.get(id);
        let target_kind = c.kind.inverse();
        let level = c.level;
        if c.kind.is_opener() {
            self.next_type_at_level(id, target_kind, level, scope)
        } else if c.kind.is_closer() {
            self.prev_type_at_level(id, target_kind, level, scope)
        } else {
            None
        }
    }

    /// Skip an `ANGLE_OPEN .. ANGLE_CLOSE` template header, returning the
    /// closer.
    pub fn skip_template(&self, angle_open: ChunkId, scope: Scope) -> Option<ChunkId> {
        debug_assert_eq!(self.get(angle_open).kind, TokenKind::AngleOpen);
        self.skip_to_match(angle_open, scope)
    }

    /// Skip a `[]` (`TSquare`) or `[ .. ]` pair used for array declarators,
    /// returning the chunk after it.
    pub fn skip_tsquare(&self, square_open: ChunkId, scope: Scope) -> Option<ChunkId> {
        match self.get(square_open).kind {
            TokenKind::TSquare => self.next_scoped(square_open, scope),
            TokenKind::SquareOpen => {
                let close = self.skip_to_match(square_open, scope)?;
                self.next_scoped(close, scope)
            }
            _ => None,
        }
    }

    /// Skip a GCC `__attribute__((...))` run starting at the `__attribute__`
    /// word, returning the chunk after the closing `)`.
    pub fn skip_attribute(&self, attribute_word: ChunkId, scope: Scope) -> Option<ChunkId> {
        let paren = self.next_scoped(attribute_word, scope)?;
        if self.get(paren).kind != TokenKind::ParenOpen {
            return None;
        }
        let close = self.skip_to_match(paren, scope)?;
        self.next_scoped(close, scope)
    }

    pub fn iter_from(&self, start: Option<ChunkId>) -> ChunkListIter<'_> {
        ChunkListIter {
            list: self,
            cur: start,
        }
    }

    pub fn iter(&self) -> ChunkListIter<'_> {
        self.iter_from(self.head)
    }
}

pub struct ChunkListIter<'a> {
    list: &'a ChunkList,
    cur: Option<ChunkId>,
}

impl<'a> Iterator for ChunkListIter<'a> {
    type Item = ChunkId;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cur?;
        self.cur = self.list.next(cur);
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Chunk {
        Chunk::new(TokenKind::Word, s)
    }

    #[test]
    fn add_tail_links_both_directions() {
        let mut list = ChunkList::new();
        let a = list.add_tail(word("a"));
        let b = list.add_tail(word("b"));
        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.prev(b), Some(a));
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(b));
    }

    #[test]
    fn pop_unlinks_without_destroying_slot() {
        let mut list = ChunkList::new();
        let a = list.add_tail(word("a"));
        let b = list.add_tail(word("b"));
        let c = list.add_tail(word("c"));
        list.pop(b);
        assert_eq!(list.next(a), Some(c));
        assert_eq!(list.prev(c), Some(a));
        // Slot still resolves.
        assert_eq!(list.get(b).str, "b");
    }

    #[test]
    fn chunk_del_removes_from_traversal() {
        let mut list = ChunkList::new();
        let a = list.add_tail(word("a"));
        let b = list.add_tail(word("b"));
        list.chunk_del(a);
        assert_eq!(list.head(), Some(b));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn skip_to_match_finds_balanced_pair() {
        let mut list = ChunkList::new();
        let open = list.add_tail(Chunk::new(TokenKind::ParenOpen, "("));
        list.get_mut(open).level = 0;
        let inner = list.add_tail(word("x"));
        list.get_mut(inner).level = 1;
        let close = list.add_tail(Chunk::new(TokenKind::ParenClose, ")"));
        list.get_mut(close).level = 0;
        assert_eq!(list.skip_to_match(open, Scope::All), Some(close));
        assert_eq!(list.skip_to_match(close, Scope::All), Some(open));
    }

    #[test]
    fn all_scope_refuses_to_cross_out_of_preproc() {
        let mut list = ChunkList::new();
        let a = list.add_tail(word("hash"));
        list.get_mut(a).flags.insert(PcfFlags::IN_PREPROC);
        let b = list.add_tail(word("after"));
        assert_eq!(list.next_scoped(a, Scope::All), None);
        assert_eq!(list.next_scoped(a, Scope::Preproc), Some(b));
    }

    #[test]
    fn all_scope_skips_over_preproc_run_from_outside() {
        let mut list = ChunkList::new();
        let a = list.add_tail(word("before"));
        let pp1 = list.add_tail(word("#if"));
        list.get_mut(pp1).flags.insert(PcfFlags::IN_PREPROC);
        let pp2 = list.add_tail(word("X"));
        list.get_mut(pp2).flags.insert(PcfFlags::IN_PREPROC);
        let after = list.add_tail(word("after"));
        assert_eq!(list.next_scoped(a, Scope::All), Some(after));
    }
}
