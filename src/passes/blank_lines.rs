//! Normalizes blank-line run lengths against `nl_max` and the `#ifdef`
//! squeeze policy (spec.md §4.8's blank-line control, broken out as its own
//! pass per spec.md §2).

use crate::chunk::ChunkId;
use crate::chunk_list::ChunkList;
use crate::context::FormatContext;
use crate::token::TokenKind;

pub fn run(ctx: &mut FormatContext) {
    let max = ctx.options.get_unsigned("nl_max") as u32;
    if max > 0 {
        clamp_blank_runs(&mut ctx.chunks, max);
    }
    if ctx.options.get_bool("nl_squeeze_ifdef") {
        squeeze_around_ifdef(&mut ctx.chunks);
    }
}

fn clamp_blank_runs(list: &mut ChunkList, max: u32) {
    let cap = max + 1; // nl_count includes the line-ending newline itself
    let newlines: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Newline)
        .collect();
    for id in newlines {
        let c = list.get_mut(id);
        if c.nl_count > cap {
            c.nl_count = cap;
        }
    }
}

fn squeeze_around_ifdef(list: &mut ChunkList) {
    let boundaries: Vec<ChunkId> = list
        .iter()
        .filter(|&id| matches!(list.get(id).kind, TokenKind::PpIf | TokenKind::PpEndif))
        .collect();
    for id in boundaries {
        if let Some(prev) = list.prev(id) {
            if list.get(prev).kind == TokenKind::Newline {
                list.get_mut(prev).nl_count = 1;
            }
        }
        if let Some(next) = list.next(id) {
            if list.get(next).kind == TokenKind::Newline {
                list.get_mut(next).nl_count = 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::{OptionValue, Options};
    use crate::tokenizer::tokenize;

    #[test]
    fn clamps_excess_blank_lines_to_nl_max() {
        let chunks = tokenize("a;\n\n\n\n\nb;", LangFlags::C);
        let mut options = Options::new(LangFlags::C);
        options.set("nl_max", OptionValue::Unsigned(1));
        let mut ctx = FormatContext::new(chunks, options, LangFlags::C);
        run(&mut ctx);
        let nl = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::Newline)
            .unwrap();
        assert_eq!(ctx.chunks.get(nl).nl_count, 2);
    }

    #[test]
    fn zero_nl_max_means_unbounded() {
        let chunks = tokenize("a;\n\n\n\n\nb;", LangFlags::C);
        let options = Options::new(LangFlags::C);
        let mut ctx = FormatContext::new(chunks, options, LangFlags::C);
        run(&mut ctx);
        let nl = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::Newline)
            .unwrap();
        assert_eq!(ctx.chunks.get(nl).nl_count, 5);
    }
}
