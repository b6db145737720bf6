//! Strips a bare `return;` immediately before the closing `}` of the
//! function body it lives in (`mod_remove_empty_return`).

use crate::chunk::ChunkId;
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::token::TokenKind;

pub fn run(ctx: &mut FormatContext) {
    if !ctx.options.get_bool("mod_remove_empty_return") {
        return;
    }
    strip_trailing_empty_returns(&mut ctx.chunks);
}

fn strip_trailing_empty_returns(list: &mut ChunkList) {
    let returns: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::Return)
        .collect();
    for ret in returns {
        let Some(semi) = list.next_nc(ret, Scope::All) else { continue };
        if semi != ret && list.get(semi).kind != TokenKind::Semicolon {
            continue;
        }
        let Some(after_semi) = list.next_ncnnl(semi, Scope::All) else { continue };
        if list.get(after_semi).kind != TokenKind::BraceClose {
            continue;
        }
        list.chunk_del(semi);
        list.chunk_del(ret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::{OptionValue, Options};
    use crate::tokenizer::tokenize;

    fn run_on(src: &str) -> FormatContext {
        let lang = LangFlags::C;
        let chunks = tokenize(src, lang);
        let mut options = Options::new(lang);
        options.set("mod_remove_empty_return", OptionValue::Bool(true));
        let mut ctx = FormatContext::new(chunks, options, lang);
        crate::passes::tokenize_cleanup::run(&mut ctx);
        crate::passes::brace_cleanup::run(&mut ctx);
        crate::passes::combine::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn strips_empty_return_before_closing_brace() {
        let ctx = run_on("void f() { x(); return; }");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::Return);
        assert!(!found);
    }

    #[test]
    fn keeps_return_with_value() {
        let ctx = run_on("int f() { return 1; }");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::Return);
        assert!(found);
    }
}
