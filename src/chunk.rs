//! The chunk: spec.md §3.1's token-or-whitespace-or-sentinel unit.

use crate::token::{PcfFlags, TokenKind};

/// Stable index into a [`ChunkList`](crate::chunk_list::ChunkList)'s arena.
/// Indices are never reused within the lifetime of a list, so a `ChunkId`
/// captured before a delete is safe to compare against (it will simply no
/// longer resolve) but never aliases a different, later chunk.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ChunkId(pub(crate) u32);

impl ChunkId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[cfg(test)]
    pub(crate) fn for_test(n: u32) -> Self {
        ChunkId(n)
    }
}

/// A token, inter-token artifact, or synthetic sentinel. See spec.md §3.1
/// for the field-by-field contract and invariants.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub kind: TokenKind,
    /// Parent/context kind, e.g. a `{` whose `ptype == TokenKind::If`.
    pub ptype: TokenKind,
    pub str: String,

    pub orig_line: u32,
    pub orig_col: u32,
    pub orig_col_end: u32,

    /// Output column, mutated by `passes::indent` and `passes::align`.
    pub column: u32,

    pub level: u16,
    pub brace_level: u16,
    pub pp_level: u16,

    /// For `TokenKind::Newline` chunks: run length. Blank-line count is
    /// `nl_count - 1`. Meaningless for any other kind.
    pub nl_count: u32,

    pub flags: PcfFlags,

    pub(crate) prev: Option<ChunkId>,
    pub(crate) next: Option<ChunkId>,
}

impl Chunk {
    pub fn new(kind: TokenKind, str: impl Into<String>) -> Self {
        Chunk {
            kind,
            ptype: TokenKind::Tombstone,
            str: str.into(),
            orig_line: 0,
            orig_col: 0,
            orig_col_end: 0,
            column: 0,
            level: 0,
            brace_level: 0,
            pp_level: 0,
            nl_count: 0,
            flags: PcfFlags::empty(),
            prev: None,
            next: None,
        }
    }

    /// A `VBRACE_OPEN`/`VBRACE_CLOSE` synthesized by `passes::brace_cleanup`;
    /// invariant: empty `str`, invisible in output.
    pub fn new_virtual_brace(kind: TokenKind) -> Self {
        debug_assert!(kind.is_virtual_brace());
        Chunk::new(kind, "")
    }

    pub fn new_virtual_semicolon() -> Self {
        Chunk::new(TokenKind::VSemicolon, "")
    }

    pub fn len(&self) -> usize {
        self.str.chars().count()
    }

    pub fn is_empty_str(&self) -> bool {
        self.str.is_empty()
    }

    pub fn prev(&self) -> Option<ChunkId> {
        self.prev
    }

    pub fn next(&self) -> Option<ChunkId> {
        self.next
    }
}
