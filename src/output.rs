//! Chunk graph -> text (spec.md §4.13, last stage of the cascade). Every
//! chunk already carries its final `column` by the time this runs; this
//! pass only pads with spaces up to each chunk's column and re-emits
//! `orig_line`-independent newline runs, plus whatever BOM/CRLF the input
//! had (spec.md's "Output" contract: encoding round-trips verbatim, the
//! *content* is the only thing passes are allowed to reshape).

use crate::context::FormatContext;
use crate::token::TokenKind;

pub fn render(ctx: &FormatContext) -> String {
    let mut out = String::new();
    if ctx.had_bom {
        out.push('\u{feff}');
    }

    let mut cursor: u32 = 0;
    for id in ctx.chunks.iter() {
        let c = ctx.chunks.get(id);
        match c.kind {
            TokenKind::Newline => {
                let count = c.nl_count.max(1);
                for _ in 0..count {
                    out.push_str(if ctx.crlf { "\r\n" } else { "\n" });
                }
                cursor = 0;
            }
            TokenKind::VbraceOpen | TokenKind::VbraceClose | TokenKind::VSemicolon => {
                // Invisible sentinels: carry layout state but never render.
            }
            _ => {
                let pad = c.column.saturating_sub(cursor);
                for _ in 0..pad {
                    out.push(' ');
                }
                out.push_str(&c.str);
                cursor = c.column + c.len() as u32;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::chunk_list::ChunkList;
    use crate::language::LangFlags;
    use crate::options::Options;

    #[test]
    fn pads_chunks_out_to_their_column() {
        let mut list = ChunkList::new();
        let mut a = Chunk::new(TokenKind::Word, "x");
        a.column = 0;
        list.add_tail(a);
        let mut b = Chunk::new(TokenKind::Assign, "=");
        b.column = 2;
        list.add_tail(b);
        let ctx = FormatContext::new(list, Options::new(LangFlags::C), LangFlags::C);
        assert_eq!(render(&ctx), "x =");
    }

    #[test]
    fn virtual_braces_produce_no_output() {
        let mut list = ChunkList::new();
        let mut a = Chunk::new(TokenKind::Word, "x");
        a.column = 0;
        list.add_tail(a);
        let mut vb = Chunk::new_virtual_brace(TokenKind::VbraceOpen);
        vb.column = 1;
        list.add_tail(vb);
        let ctx = FormatContext::new(list, Options::new(LangFlags::C), LangFlags::C);
        assert_eq!(render(&ctx), "x");
    }

    #[test]
    fn reemits_bom_and_crlf() {
        let mut list = ChunkList::new();
        let mut a = Chunk::new(TokenKind::Word, "x");
        a.column = 0;
        list.add_tail(a);
        let mut nl = Chunk::new(TokenKind::Newline, "\n");
        nl.nl_count = 1;
        list.add_tail(nl);
        let mut ctx = FormatContext::new(list, Options::new(LangFlags::C), LangFlags::C);
        ctx.had_bom = true;
        ctx.crlf = true;
        assert_eq!(render(&ctx), "\u{feff}x\r\n");
    }
}
