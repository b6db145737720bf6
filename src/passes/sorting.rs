//! Sorts consecutive runs of `#include`, `using`, or `import` statements
//! (`mod_sort_include`/`mod_sort_using`/`mod_sort_import`), grounded on
//! `original_source/src/sorting.cpp`'s category table: system includes
//! (`<...>`) sort before local includes (`"..."`), ties broken
//! alphabetically; `using`/`import` runs sort alphabetically outright.

use crate::chunk::ChunkId;
use crate::chunk_list::{ChunkList, Scope};
use crate::context::FormatContext;
use crate::token::TokenKind;

pub fn run(ctx: &mut FormatContext) {
    if ctx.options.get_bool("mod_sort_include") {
        sort_runs(&mut ctx.chunks, is_include_line, include_key);
    }
    if ctx.options.get_bool("mod_sort_using") {
        sort_runs(&mut ctx.chunks, is_using_line, plain_key);
    }
    if ctx.options.get_bool("mod_sort_import") {
        sort_runs(&mut ctx.chunks, is_import_line, plain_key);
    }
}

fn is_include_line(list: &ChunkList, line_start: ChunkId) -> bool {
    let c = list.get(line_start);
    if c.kind != TokenKind::Unknown || c.str != "#" {
        return false;
    }
    matches!(list.next_nc(line_start, Scope::All), Some(n) if list.get(n).str == "include")
}

fn is_using_line(list: &ChunkList, line_start: ChunkId) -> bool {
    list.get(line_start).kind == TokenKind::Using
}

fn is_import_line(list: &ChunkList, line_start: ChunkId) -> bool {
    let c = list.get(line_start);
    c.kind == TokenKind::Word && c.str == "import"
}

fn line_text(list: &ChunkList, line_start: ChunkId) -> String {
    let mut out = String::new();
    let mut cur = Some(line_start);
    while let Some(id) = cur {
        if list.get(id).kind == TokenKind::Newline {
            break;
        }
        out.push_str(&list.get(id).str);
        cur = list.next(id);
    }
    out
}

/// `(category, text)`: system includes (`<...>`) before local (`"..."`).
fn include_key(list: &ChunkList, line_start: ChunkId) -> (u8, String) {
    let text = line_text(list, line_start);
    let category = if text.contains('<') { 0 } else { 1 };
    (category, text)
}

fn plain_key(list: &ChunkList, line_start: ChunkId) -> (u8, String) {
    (0, line_text(list, line_start))
}

fn line_starts(list: &ChunkList) -> Vec<ChunkId> {
    let mut starts = Vec::new();
    let mut cur = list.head();
    let mut at_start = true;
    while let Some(id) = cur {
        if at_start {
            starts.push(id);
        }
        at_start = list.get(id).kind == TokenKind::Newline;
        cur = list.next(id);
    }
    starts
}

fn sort_runs<K: Ord>(
    list: &mut ChunkList,
    matches: impl Fn(&ChunkList, ChunkId) -> bool,
    key: impl Fn(&ChunkList, ChunkId) -> K,
) {
    let starts = line_starts(list);
    let mut i = 0;
    while i < starts.len() {
        if !matches(list, starts[i]) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < starts.len() && matches(list, starts[j]) {
            j += 1;
        }
        sort_run(list, &mut starts[i..j].to_vec(), &key);
        i = j;
    }
}

fn sort_run<K: Ord>(
    list: &mut ChunkList,
    run: &mut Vec<ChunkId>,
    key: &impl Fn(&ChunkList, ChunkId) -> K,
) {
    for i in 0..run.len() {
        let mut min = i;
        for j in (i + 1)..run.len() {
            if key(list, run[j]) < key(list, run[min]) {
                min = j;
            }
        }
        if min != i {
            list.swap_lines(run[i], run[min]);
            run.swap(i, min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LangFlags;
    use crate::options::{OptionValue, Options};
    use crate::tokenizer::tokenize;

    fn run_on(src: &str, opt: &'static str) -> FormatContext {
        let lang = LangFlags::CPP;
        let chunks = tokenize(src, lang);
        let mut options = Options::new(lang);
        options.set(opt, OptionValue::Bool(true));
        let mut ctx = FormatContext::new(chunks, options, lang);
        run(&mut ctx);
        ctx
    }

    fn rendered(ctx: &FormatContext) -> String {
        ctx.chunks.iter().map(|id| ctx.chunks.get(id).str.clone()).collect::<Vec<_>>().join("")
    }

    #[test]
    fn sorts_include_run_system_before_local() {
        let ctx = run_on(
            "#include \"z.h\"\n#include <a.h>\n#include \"b.h\"\n",
            "mod_sort_include",
        );
        let out = rendered(&ctx);
        let a_pos = out.find("a.h").unwrap();
        let b_pos = out.find("b.h").unwrap();
        let z_pos = out.find("z.h").unwrap();
        assert!(a_pos < b_pos);
        assert!(b_pos < z_pos);
    }

    #[test]
    fn sorts_using_run_alphabetically() {
        let ctx = run_on("using zeta;\nusing alpha;\n", "mod_sort_using");
        let out = rendered(&ctx);
        assert!(out.find("alpha").unwrap() < out.find("zeta").unwrap());
    }

    #[test]
    fn leaves_non_consecutive_runs_independently_sorted() {
        let ctx = run_on(
            "using b;\nusing a;\nx();\nusing d;\nusing c;\n",
            "mod_sort_using",
        );
        let out = rendered(&ctx);
        assert!(out.find('a').unwrap() < out.find('b').unwrap());
        assert!(out.find('c').unwrap() < out.find('d').unwrap());
    }
}
