//! The heavy reclassification pass (spec.md §4.5): star/amp and plus/minus
//! disambiguation, C-cast detection, `WORD (` call/def/proto/ctor-var
//! classification, typedef shape, aggregate body marking, variable-
//! declarator flagging, Objective-C message/block/property recognition,
//! C++ lambda-intro detection, and colon classification
//! (`combine_labels`).

use crate::chunk::ChunkId;
use crate::chunk_list::{ChunkList, Scope};
use crate::chunk_stack::ChunkStack;
use crate::context::FormatContext;
use crate::language::LangFlags;
use crate::token::{PcfFlags, TokenKind};

pub fn run(ctx: &mut FormatContext) {
    mark_control_parens(&mut ctx.chunks);
    mark_statement_starts(&mut ctx.chunks);
    fix_symbols(ctx);
    mark_var_defs(&mut ctx.chunks);
    classify_square_brackets(&mut ctx.chunks, ctx.lang);
    if ctx.lang.contains(LangFlags::OBJC) {
        classify_oc_declarations(&mut ctx.chunks);
    }
    combine_labels(&mut ctx.chunks);
}

/// Objective-C `@`-keyword declarations: `@interface`/`@implementation`/
/// `@protocol`/`@class`/`@end` retype their keyword to `OcClass`,
/// `@property` to `OcProperty`. The `@` sigil itself tokenizes as
/// `TokenKind::OcScope`, the closest existing variant to "thing that
/// scopes the word after it into an Objective-C declaration".
fn classify_oc_declarations(list: &mut ChunkList) {
    let ids: Vec<ChunkId> = list.iter().collect();
    for id in ids {
        if list.get(id).kind != TokenKind::OcScope {
            continue;
        }
        let Some(next) = list.next_nc(id, Scope::All) else { continue };
        if list.get(next).kind != TokenKind::Word {
            continue;
        }
        match list.get(next).str.as_str() {
            "interface" | "implementation" | "protocol" | "class" | "end" => {
                list.get_mut(next).kind = TokenKind::OcClass;
            }
            "property" => {
                list.get_mut(next).kind = TokenKind::OcProperty;
            }
            _ => {}
        }
    }
}

/// Retypes a `^` that opens a block literal (preceded by an expression
/// boundary, followed by `(` or `{`) to `OcBlockCaret`. Bitwise-xor `^`
/// never satisfies the `EXPR_START` guard its caller checks.
fn classify_block_caret(list: &mut ChunkList, id: ChunkId) {
    let Some(next) = list.next_nc(id, Scope::All) else { return };
    if matches!(list.get(next).kind, TokenKind::ParenOpen | TokenKind::BraceOpen) {
        list.get_mut(id).kind = TokenKind::OcBlockCaret;
    }
}

/// Disambiguates `[...]` between array indexing, an Objective-C message
/// send (`[receiver selector:arg ...]`), and a C++ lambda introducer
/// (`[capture](params) { ... }`). A top-level `:` inside the brackets
/// (not nested inside a further paren/square/brace) means a message;
/// otherwise, brackets not preceded by a value and followed immediately
/// by `(` or `{` read as a lambda intro.
fn classify_square_brackets(list: &mut ChunkList, lang: LangFlags) {
    let opens: Vec<ChunkId> = list
        .iter()
        .filter(|&id| list.get(id).kind == TokenKind::SquareOpen)
        .collect();
    for open in opens {
        let Some(close) = list.skip_to_match(open, Scope::All) else { continue };

        if lang.contains(LangFlags::OBJC) && has_top_level_colon(list, open, close) {
            list.get_mut(open).ptype = TokenKind::OcMsg;
            list.get_mut(close).ptype = TokenKind::OcMsg;
            mark_message_colons(list, open, close);
            continue;
        }

        if lang.contains(LangFlags::CPP) && looks_like_lambda_intro(list, open, close) {
            list.get_mut(open).ptype = TokenKind::CppLambda;
            list.get_mut(close).ptype = TokenKind::CppLambda;
        }
    }
}

fn has_top_level_colon(list: &ChunkList, open: ChunkId, close: ChunkId) -> bool {
    let mut depth = 0i32;
    let mut cur = list.next(open);
    while let Some(id) = cur {
        if id == close {
            break;
        }
        match list.get(id).kind {
            TokenKind::ParenOpen | TokenKind::SquareOpen | TokenKind::BraceOpen => depth += 1,
            TokenKind::ParenClose | TokenKind::SquareClose | TokenKind::BraceClose => depth -= 1,
            TokenKind::Colon if depth == 0 => return true,
            _ => {}
        }
        cur = list.next(id);
    }
    false
}

fn mark_message_colons(list: &mut ChunkList, open: ChunkId, close: ChunkId) {
    let mut depth = 0i32;
    let mut cur = list.next(open);
    while let Some(id) = cur {
        if id == close {
            break;
        }
        match list.get(id).kind {
            TokenKind::ParenOpen | TokenKind::SquareOpen | TokenKind::BraceOpen => depth += 1,
            TokenKind::ParenClose | TokenKind::SquareClose | TokenKind::BraceClose => depth -= 1,
            TokenKind::Colon if depth == 0 => list.get_mut(id).kind = TokenKind::OcColon,
            _ => {}
        }
        cur = list.next(id);
    }
}

fn looks_like_lambda_intro(list: &ChunkList, open: ChunkId, close: ChunkId) -> bool {
    let follows_a_value = list
        .prev_nc(open, Scope::All)
        .map(|p| {
            matches!(
                list.get(p).kind,
                TokenKind::Word | TokenKind::Number | TokenKind::ParenClose | TokenKind::SquareClose
            )
        })
        .unwrap_or(false);
    if follows_a_value {
        return false;
    }
    list.next_nc(close, Scope::All)
        .map(|after| matches!(list.get(after).kind, TokenKind::ParenOpen | TokenKind::BraceOpen))
        .unwrap_or(false)
}

/// Flags a declarator's name with `VAR_DEF` (`VAR_1ST` for the first one in
/// a comma list) once a preceding type specifier has been recognized.
/// `align.rs`'s `align_var_defs` keys off `VAR_DEF` to line up declaration
/// names; runs after `fix_symbols` so a typedef's trailing name (already
/// retyped `Word` -> `Type` by `mark_typedef`) is correctly skipped.
fn mark_var_defs(list: &mut ChunkList) {
    let ids: Vec<ChunkId> = list.iter().collect();
    for id in ids {
        let Some(c) = list.try_get(id) else { continue };
        if c.kind != TokenKind::Word {
            continue;
        }
        let Some(prev) = list.prev_nc(id, Scope::All) else { continue };
        if list.get(prev).kind == TokenKind::DcMember {
            continue;
        }
        if !ends_a_type(list, prev) {
            continue;
        }
        if let Some(next) = list.next_nc(id, Scope::All) {
            if list.get(next).kind == TokenKind::ParenOpen {
                continue;
            }
        }
        let is_first = list.get(prev).kind != TokenKind::Comma;
        let word = list.get_mut(id);
        word.flags.insert(PcfFlags::VAR_DEF);
        if is_first {
            word.flags.insert(PcfFlags::VAR_1ST);
        }
    }
}

/// Retypes the `( ... )` immediately following `if`/`while`/`switch`/`for`
/// to `SparenOpen`/`SparenClose`, ahead of `fix_symbols`, so downstream
/// passes (space, parens) can key off the control-statement condition
/// without re-deriving it from the keyword each time.
fn mark_control_parens(list: &mut ChunkList) {
    let keywords: Vec<ChunkId> = list
        .iter()
        .filter(|&id| {
            matches!(
                list.get(id).kind,
                TokenKind::If | TokenKind::While | TokenKind::Switch | TokenKind::For
            )
        })
        .collect();
    for kw in keywords {
        let Some(paren_open) = list.next_ncnnl(kw, Scope::All) else { continue };
        if list.get(paren_open).kind != TokenKind::ParenOpen {
            continue;
        }
        let Some(paren_close) = list.skip_to_match(paren_open, Scope::All) else { continue };
        list.get_mut(paren_open).kind = TokenKind::SparenOpen;
        list.get_mut(paren_close).kind = TokenKind::SparenClose;
        if list.get(kw).kind == TokenKind::For {
            mark_in_for(list, paren_open, paren_close);
        }
    }
}

/// Flags every chunk inside a `for(...)` header with `IN_FOR`, including
/// the two separating semicolons, so later passes (`passes::semicolons`'
/// doubled-`;` guard, `passes::width`'s split-priority table) can tell a
/// `for(;;)` separator apart from a statement-ending semicolon.
fn mark_in_for(list: &mut ChunkList, paren_open: ChunkId, paren_close: ChunkId) {
    let mut cur = Some(paren_open);
    while let Some(id) = cur {
        list.get_mut(id).flags.insert(PcfFlags::IN_FOR);
        if id == paren_close {
            break;
        }
        cur = list.next(id);
    }
}

fn is_stmt_boundary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon
            | TokenKind::VSemicolon
            | TokenKind::BraceOpen
            | TokenKind::BraceClose
            | TokenKind::VbraceOpen
            | TokenKind::VbraceClose
    )
}

fn is_expr_boundary(kind: TokenKind) -> bool {
    is_stmt_boundary(kind)
        || matches!(
            kind,
            TokenKind::Comma
                | TokenKind::ParenOpen
                | TokenKind::SquareOpen
                | TokenKind::Assign
                | TokenKind::Compare
                | TokenKind::Boolean
                | TokenKind::Arith
                | TokenKind::Return
                | TokenKind::Question
                | TokenKind::Colon
                | TokenKind::CaseColon
        )
}

fn mark_statement_starts(list: &mut ChunkList) {
    let ids: Vec<ChunkId> = list.iter().collect();
    for id in ids {
        let prev = list.prev_nnl(id, Scope::All);
        let stmt_start = match prev {
            None => true,
            Some(p) => is_stmt_boundary(list.get(p).kind),
        };
        let expr_start = stmt_start
            || prev
                .map(|p| is_expr_boundary(list.get(p).kind))
                .unwrap_or(true);
        let c = list.get_mut(id);
        if stmt_start {
            c.flags.insert(PcfFlags::STMT_START);
        }
        if expr_start {
            c.flags.insert(PcfFlags::EXPR_START);
        }
    }
}

/// True if the token immediately preceding `before` (and a short run before
/// that) looks like the tail of a type specifier.
fn ends_a_type(list: &ChunkList, before: ChunkId) -> bool {
    let mut cur = before;
    let mut seen = false;
    for _ in 0..8 {
        let kind = list.get(cur).kind;
        match kind {
            TokenKind::Qualifier
            | TokenKind::Type
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Enum
            | TokenKind::Class
            | TokenKind::DcMember
            | TokenKind::PtrType => seen = true,
            TokenKind::Word if !seen => seen = true,
            _ => return seen,
        }
        match list.prev_nc(cur, Scope::All) {
            Some(p) => cur = p,
            None => return seen,
        }
    }
    seen
}

fn fix_symbols(ctx: &mut FormatContext) {
    let ids: Vec<ChunkId> = ctx.chunks.iter().collect();
    for id in ids {
        let Some(chunk) = ctx.chunks.try_get(id) else { continue };
        match chunk.kind {
            TokenKind::Arith => match chunk.str.as_str() {
                "*" => classify_star(&mut ctx.chunks, id),
                "&" => classify_amp(&mut ctx.chunks, id),
                "+" => classify_plus_minus(&mut ctx.chunks, id, TokenKind::Pos),
                "-" => classify_plus_minus(&mut ctx.chunks, id, TokenKind::Neg),
                "^" if chunk.flags.contains(PcfFlags::EXPR_START) => {
                    classify_block_caret(&mut ctx.chunks, id)
                }
                _ => {}
            },
            TokenKind::ParenOpen => try_classify_c_cast(ctx, id),
            TokenKind::Word => {
                if let Some(next) = ctx.chunks.next_nc(id, Scope::All) {
                    if ctx.chunks.get(next).kind == TokenKind::ParenOpen {
                        classify_word_paren(&mut ctx.chunks, id, next);
                    }
                }
            }
            TokenKind::Typedef => mark_typedef(&mut ctx.chunks, id),
            TokenKind::Struct | TokenKind::Union | TokenKind::Enum | TokenKind::Class
            | TokenKind::Namespace => mark_aggregate_body(&mut ctx.chunks, id),
            _ => {}
        }
    }
}

fn classify_star(list: &mut ChunkList, id: ChunkId) {
    let prev = list.prev_nc(id, Scope::All);
    let next = list.next_nc(id, Scope::All);
    let is_ptr_prev = prev.map_or(false, |p| {
        let k = list.get(p).kind;
        matches!(
            k,
            TokenKind::Qualifier | TokenKind::Type | TokenKind::PtrType | TokenKind::DcMember
        ) || (k == TokenKind::Word && ends_a_type(list, p))
    });
    let is_unary_prev = prev.map_or(true, |p| {
        matches!(list.get(p).kind, TokenKind::Sizeof | TokenKind::Delete)
            || list.get(id).flags.contains(PcfFlags::EXPR_START)
    });
    let is_ptr_next = next.map_or(false, |n| {
        matches!(list.get(n).kind, TokenKind::ParenClose | TokenKind::Comma)
    });

    let kind = if is_ptr_prev || is_ptr_next {
        TokenKind::PtrType
    } else if is_unary_prev {
        TokenKind::Deref
    } else {
        TokenKind::Arith
    };
    list.get_mut(id).kind = kind;
}

fn classify_amp(list: &mut ChunkList, id: ChunkId) {
    let prev = list.prev_nc(id, Scope::All);
    let is_type_prev = prev.map_or(false, |p| {
        let k = list.get(p).kind;
        matches!(
            k,
            TokenKind::Qualifier | TokenKind::Type | TokenKind::PtrType | TokenKind::DcMember
        ) || (k == TokenKind::Word && ends_a_type(list, p))
    });
    let is_unary_context = list.get(id).flags.contains(PcfFlags::EXPR_START);

    let kind = if is_unary_context && !is_type_prev {
        TokenKind::Addr
    } else if is_type_prev {
        TokenKind::Byref
    } else {
        TokenKind::Arith
    };
    list.get_mut(id).kind = kind;
}

fn classify_plus_minus(list: &mut ChunkList, id: ChunkId, unary_kind: TokenKind) {
    let is_unary = list.get(id).flags.contains(PcfFlags::EXPR_START);
    list.get_mut(id).kind = if is_unary { unary_kind } else { TokenKind::Arith };
}

fn is_value_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Word
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Char
            | TokenKind::ParenOpen
            | TokenKind::Deref
            | TokenKind::Addr
            | TokenKind::Pos
            | TokenKind::Neg
            | TokenKind::Not
            | TokenKind::BitNot
            | TokenKind::Sizeof
    )
}

/// Retypes `(TYPE)` to `CCast` when the parenthesized content is entirely
/// type-like and sits where a cast is grammatically plausible. A bare `Word`
/// inside the parens (as opposed to an already-recognized `Type`/`Qualifier`/
/// `PtrType`) is a guess at an unresolved type name rather than a confirmed
/// one; spec.md §6.2/§7's "do no harm" policy means we still make the call
/// (real uncrustify casts use plenty of user-defined type names) but record
/// it via [`FormatContext::report_classification_miss`] so callers wanting
/// to audit shaky classifications can see how many times this happened.
fn try_classify_c_cast(ctx: &mut FormatContext, paren_open: ChunkId) {
    let list = &mut ctx.chunks;
    let prev = list.prev_nc(paren_open, Scope::All);
    let plausible_position = prev.map_or(true, |p| {
        matches!(
            list.get(p).kind,
            TokenKind::Assign
                | TokenKind::Comma
                | TokenKind::Return
                | TokenKind::ParenOpen
                | TokenKind::Boolean
                | TokenKind::Compare
                | TokenKind::Arith
                | TokenKind::SquareOpen
                | TokenKind::BraceOpen
        )
    });
    if !plausible_position {
        return;
    }
    let Some(paren_close) = list.skip_to_match(paren_open, Scope::All) else { return };

    let mut inner: Vec<ChunkId> = Vec::new();
    let mut cur = list.next(paren_open);
    while let Some(id) = cur {
        if id == paren_close {
            break;
        }
        inner.push(id);
        cur = list.next(id);
    }
    if inner.is_empty() {
        return;
    }
    let all_type_like = inner.iter().all(|&id| {
        matches!(
            list.get(id).kind,
            TokenKind::Type | TokenKind::Qualifier | TokenKind::PtrType | TokenKind::Word
        )
    });
    if !all_type_like {
        return;
    }
    let Some(after) = list.next_ncnnl(paren_close, Scope::All) else { return };
    if !is_value_start(list.get(after).kind) {
        return;
    }

    let had_unresolved_word = inner.iter().any(|&id| list.get(id).kind == TokenKind::Word);
    list.get_mut(paren_open).kind = TokenKind::CCast;
    for &id in &inner {
        if list.get(id).kind == TokenKind::Word {
            list.get_mut(id).kind = TokenKind::Type;
        }
    }
    list.get_mut(after).flags.insert(PcfFlags::EXPR_START);
    if had_unresolved_word {
        ctx.report_classification_miss("c-cast with unresolved type name");
    }
}

fn classify_word_paren(list: &mut ChunkList, word: ChunkId, paren_open: ChunkId) {
    let prev = list.prev_nc(word, Scope::All);

    if let Some(p) = prev {
        if list.get(p).kind == TokenKind::BitNot {
            list.get_mut(word).ptype = TokenKind::Destructor;
            retype_fparen(list, paren_open);
            return;
        }
        if list.get(p).kind == TokenKind::DcMember {
            let Some(paren_close) = list.skip_to_match(paren_open, Scope::All) else {
                return;
            };
            let after = list.next_ncnnl(paren_close, Scope::All);
            let ptype = match after.map(|a| list.get(a).kind) {
                Some(TokenKind::BraceOpen) => TokenKind::FuncClassDef,
                _ => TokenKind::FuncClassProto,
            };
            list.get_mut(word).ptype = ptype;
            retype_fparen(list, paren_open);
            return;
        }
    }

    let preceded_by_type = prev.map_or(false, |p| ends_a_type(list, p));
    let ptype = if preceded_by_type {
        match list.skip_to_match(paren_open, Scope::All) {
            Some(paren_close) => match list.next_ncnnl(paren_close, Scope::All) {
                Some(after) => match list.get(after).kind {
                    TokenKind::BraceOpen => TokenKind::FuncDef,
                    TokenKind::Semicolon | TokenKind::Assign => TokenKind::FuncProto,
                    TokenKind::ParenOpen => TokenKind::FuncType,
                    _ => TokenKind::FuncCtorVar,
                },
                None => TokenKind::FuncCtorVar,
            },
            None => TokenKind::FuncCtorVar,
        }
    } else {
        TokenKind::FuncCall
    };

    list.get_mut(word).ptype = ptype;
    retype_fparen(list, paren_open);
}

fn retype_fparen(list: &mut ChunkList, paren_open: ChunkId) {
    if let Some(paren_close) = list.skip_to_match(paren_open, Scope::All) {
        list.get_mut(paren_close).kind = TokenKind::FparenClose;
    }
    list.get_mut(paren_open).kind = TokenKind::FparenOpen;
}

/// A `typedef` can name more than one type in a single declaration
/// (`typedef int A, B, C;`); every comma-separated declarator at paren
/// depth 0 becomes a `Type`, not just the last one. `names` collects each
/// candidate as it's closed off by a top-level comma (or the final `;`)
/// and retypes them all in one pass once the declaration's full extent is
/// known, the same closed-at-the-end bookkeeping `ChunkStack` is built for.
fn mark_typedef(list: &mut ChunkList, typedef_kw: ChunkId) {
    let mut cur = list.next(typedef_kw);
    let mut depth = 0i32;
    let mut last_word = None;
    let mut names = ChunkStack::new();
    while let Some(id) = cur {
        let kind = list.get(id).kind;
        if kind == TokenKind::Semicolon {
            break;
        }
        list.get_mut(id).flags.insert(PcfFlags::IN_TYPEDEF);
        match kind {
            TokenKind::ParenOpen | TokenKind::SquareOpen => depth += 1,
            TokenKind::ParenClose | TokenKind::SquareClose => depth -= 1,
            TokenKind::Comma if depth == 0 => {
                if let Some(w) = last_word.take() {
                    names.push_back(w);
                }
            }
            TokenKind::Word if depth == 0 => last_word = Some(id),
            _ => {}
        }
        cur = list.next(id);
    }
    if let Some(w) = last_word {
        names.push_back(w);
    }
    while let Some(name) = names.pop_front() {
        list.get_mut(name).kind = TokenKind::Type;
    }
}

fn mark_aggregate_body(list: &mut ChunkList, keyword: ChunkId) {
    let in_flag = match list.get(keyword).kind {
        TokenKind::Struct | TokenKind::Union => PcfFlags::IN_STRUCT,
        TokenKind::Enum => PcfFlags::IN_ENUM,
        TokenKind::Class => PcfFlags::IN_CLASS,
        TokenKind::Namespace => PcfFlags::IN_NAMESPACE,
        _ => return,
    };
    let ptype = list.get(keyword).kind;

    let Some(mut cur) = list.next_ncnnl(keyword, Scope::All) else { return };
    while list.get(cur).kind != TokenKind::BraceOpen {
        if is_stmt_boundary(list.get(cur).kind) {
            return; // forward declaration, no body
        }
        let Some(n) = list.next_ncnnl(cur, Scope::All) else { return };
        cur = n;
    }
    let open = cur;
    let Some(close) = list.skip_to_match(open, Scope::All) else { return };
    list.get_mut(open).ptype = ptype;
    list.get_mut(close).ptype = ptype;
    let mut inner = list.next(open);
    while let Some(id) = inner {
        if id == close {
            break;
        }
        list.get_mut(id).flags.insert(in_flag);
        inner = list.next(id);
    }
}

enum ColonCtx {
    Case,
    Label(ChunkId),
}

fn combine_labels(list: &mut ChunkList) {
    let mut pending_q: Vec<ChunkId> = Vec::new();
    let ids: Vec<ChunkId> = list.iter().collect();
    for id in ids {
        let kind = list.get(id).kind;
        if kind == TokenKind::Question {
            pending_q.push(id);
            continue;
        }
        if kind != TokenKind::Colon {
            continue;
        }
        let level = list.get(id).level;
        if let Some(&q) = pending_q.last() {
            if list.get(q).level == level {
                pending_q.pop();
                list.get_mut(id).kind = TokenKind::CondColon;
                continue;
            }
        }
        match backward_scan_colon_context(list, id) {
            Some(ColonCtx::Case) => list.get_mut(id).kind = TokenKind::CaseColon,
            Some(ColonCtx::Label(word)) => {
                list.get_mut(id).kind = TokenKind::LabelColon;
                list.get_mut(word).kind = TokenKind::Label;
            }
            None => {}
        }
    }
}

fn backward_scan_colon_context(list: &ChunkList, colon: ChunkId) -> Option<ColonCtx> {
    let prev = list.prev_nc(colon, Scope::All)?;
    match list.get(prev).kind {
        TokenKind::Default => Some(ColonCtx::Case),
        TokenKind::Word => {
            let before = list.prev_ncnnl(prev, Scope::All);
            let is_first = before.map_or(true, |b| is_stmt_boundary(list.get(b).kind));
            if is_first {
                Some(ColonCtx::Label(prev))
            } else {
                None
            }
        }
        _ => {
            let mut cur = prev;
            loop {
                match list.get(cur).kind {
                    TokenKind::Case => return Some(ColonCtx::Case),
                    k if is_stmt_boundary(k) => return None,
                    _ => {}
                }
                cur = list.prev_nc(cur, Scope::All)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::Options;
    use crate::tokenizer::tokenize;

    fn run_on(src: &str) -> FormatContext {
        run_on_lang(src, LangFlags::C)
    }

    fn run_on_lang(src: &str, lang: LangFlags) -> FormatContext {
        let chunks = tokenize(src, lang);
        let mut ctx = FormatContext::new(chunks, Options::new(lang), lang);
        crate::passes::tokenize_cleanup::run(&mut ctx);
        crate::passes::brace_cleanup::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    #[test]
    fn star_and_amp_disambiguation() {
        let ctx = run_on("int *p = &q; a = b*c;");
        let kinds: Vec<_> = ctx
            .chunks
            .iter()
            .map(|id| ctx.chunks.get(id).kind)
            .collect();
        let ptr_count = kinds.iter().filter(|k| **k == TokenKind::PtrType).count();
        let addr_count = kinds.iter().filter(|k| **k == TokenKind::Addr).count();
        let arith_star = kinds.iter().filter(|k| **k == TokenKind::Arith).count();
        assert_eq!(ptr_count, 1);
        assert_eq!(addr_count, 1);
        assert!(arith_star >= 1);
    }

    #[test]
    fn c_cast_is_detected() {
        let ctx = run_on("x = (size_t)y;");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::CCast);
        assert!(found);
    }

    #[test]
    fn c_cast_with_unresolved_type_name_reports_classification_miss() {
        let ctx = run_on("x = (Foo)y;");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::CCast);
        assert!(found);
        assert_eq!(ctx.error_count, 1);
    }

    #[test]
    fn function_call_vs_definition() {
        let call_ctx = run_on("foo(a, b);");
        let word = call_ctx
            .chunks
            .iter()
            .find(|&id| call_ctx.chunks.get(id).kind == TokenKind::Word)
            .unwrap();
        assert_eq!(call_ctx.chunks.get(word).ptype, TokenKind::FuncCall);

        let def_ctx = run_on("int foo(int a) { return a; }");
        let word = def_ctx
            .chunks
            .iter()
            .find(|&id| {
                def_ctx.chunks.get(id).kind == TokenKind::Word
                    && def_ctx.chunks.get(id).str == "foo"
            })
            .unwrap();
        assert_eq!(def_ctx.chunks.get(word).ptype, TokenKind::FuncDef);
    }

    #[test]
    fn case_colon_is_classified() {
        let ctx = run_on("switch (x) { case 1: break; }");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::CaseColon);
        assert!(found);
    }

    #[test]
    fn if_condition_parens_become_sparens() {
        let ctx = run_on("if (x) y;");
        let kinds: Vec<_> = ctx.chunks.iter().map(|id| ctx.chunks.get(id).kind).collect();
        assert!(kinds.contains(&TokenKind::SparenOpen));
        assert!(kinds.contains(&TokenKind::SparenClose));
        assert!(!kinds.contains(&TokenKind::ParenOpen));
    }

    #[test]
    fn label_colon_is_classified() {
        let ctx = run_on("done: return;");
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::LabelColon);
        assert!(found);
    }

    #[test]
    fn for_header_semicolons_are_flagged_in_for() {
        let ctx = run_on("for (i = 0; i < 1; i++) x();");
        let semi_count = ctx
            .chunks
            .iter()
            .filter(|&id| {
                ctx.chunks.get(id).kind == TokenKind::Semicolon
                    && ctx.chunks.get(id).flags.contains(PcfFlags::IN_FOR)
            })
            .count();
        assert_eq!(semi_count, 2);
        let trailing_semi_is_unflagged = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::Semicolon)
            .any(|id| !ctx.chunks.get(id).flags.contains(PcfFlags::IN_FOR));
        assert!(trailing_semi_is_unflagged);
    }

    #[test]
    fn typedef_with_multiple_comma_separated_names() {
        let ctx = run_on("typedef int A, B, C;");
        let type_words: Vec<&str> = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::Type)
            .map(|id| ctx.chunks.get(id).str.as_str())
            .collect();
        assert!(type_words.contains(&"A"));
        assert!(type_words.contains(&"B"));
        assert!(type_words.contains(&"C"));
    }

    #[test]
    fn objc_message_send_gets_oc_colon_and_ptype() {
        let ctx = run_on_lang("[obj doSomething:arg withOther:other];", LangFlags::OBJC);
        let oc_colons = ctx
            .chunks
            .iter()
            .filter(|&id| ctx.chunks.get(id).kind == TokenKind::OcColon)
            .count();
        assert_eq!(oc_colons, 2);
        let open = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::SquareOpen)
            .unwrap();
        assert_eq!(ctx.chunks.get(open).ptype, TokenKind::OcMsg);
    }

    #[test]
    fn plain_array_index_is_not_a_message() {
        let ctx = run_on_lang("x = arr[i];", LangFlags::OBJC);
        let open = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::SquareOpen)
            .unwrap();
        assert_ne!(ctx.chunks.get(open).ptype, TokenKind::OcMsg);
    }

    #[test]
    fn objc_property_and_interface_keywords_are_classified() {
        let ctx = run_on_lang("@interface Foo\n@property int x;\n@end\n", LangFlags::OBJC);
        let kinds: Vec<_> = ctx.chunks.iter().map(|id| ctx.chunks.get(id).kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::OcClass).count(), 2);
        assert!(kinds.contains(&TokenKind::OcProperty));
    }

    #[test]
    fn objc_block_caret_is_classified() {
        let ctx = run_on_lang("int (^blk)(int) = ^(int x) { return x; };", LangFlags::OBJC);
        let found = ctx
            .chunks
            .iter()
            .any(|id| ctx.chunks.get(id).kind == TokenKind::OcBlockCaret);
        assert!(found);
    }

    #[test]
    fn cpp_lambda_intro_is_classified() {
        let ctx = run_on_lang("auto f = [](int x) { return x; };", LangFlags::CPP);
        let open = ctx
            .chunks
            .iter()
            .find(|&id| ctx.chunks.get(id).kind == TokenKind::SquareOpen)
            .unwrap();
        assert_eq!(ctx.chunks.get(open).ptype, TokenKind::CppLambda);
    }
}
