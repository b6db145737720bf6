//! Text → chunks (spec.md §4.2). Produces a freshly populated [`ChunkList`]
//! with `orig_line`/`orig_col`/`orig_col_end` recorded and an initial type
//! guess; later passes (tokenize_cleanup, combine, ...) refine the guess.

use crate::char_table::CharTable;
use crate::chunk::Chunk;
use crate::chunk_list::ChunkList;
use crate::language::LangFlags;
use crate::token::{PcfFlags, TokenKind};

/// Longest-prefix-matched multi/single-character punctuators, ordered by
/// length so the scanner can try 3, then 2, then 1 characters.
const PUNCTUATORS_3: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::Assign),
    (">>=", TokenKind::Assign),
    ("...", TokenKind::Ellipsis),
    ("->*", TokenKind::Arrow),
    ("??.", TokenKind::Member),
];

const PUNCTUATORS_2: &[(&str, TokenKind)] = &[
    ("::", TokenKind::DcMember),
    ("->", TokenKind::Arrow),
    ("++", TokenKind::IncAfter),
    ("--", TokenKind::DecAfter),
    ("&&", TokenKind::Boolean),
    ("||", TokenKind::Boolean),
    ("==", TokenKind::Compare),
    ("!=", TokenKind::Compare),
    ("<=", TokenKind::Compare),
    (">=", TokenKind::Compare),
    ("<<", TokenKind::Arith),
    ("+=", TokenKind::Assign),
    ("-=", TokenKind::Assign),
    ("*=", TokenKind::Assign),
    ("/=", TokenKind::Assign),
    ("%=", TokenKind::Assign),
    ("&=", TokenKind::Assign),
    ("|=", TokenKind::Assign),
    ("^=", TokenKind::Assign),
    ("?.", TokenKind::Member),
    ("[]", TokenKind::TSquare),
];

const PUNCTUATORS_1: &[(char, TokenKind)] = &[
    ('(', TokenKind::ParenOpen),
    (')', TokenKind::ParenClose),
    ('{', TokenKind::BraceOpen),
    ('}', TokenKind::BraceClose),
    ('[', TokenKind::SquareOpen),
    (']', TokenKind::SquareClose),
    ('<', TokenKind::AngleOpen),
    ('>', TokenKind::AngleClose),
    (',', TokenKind::Comma),
    (';', TokenKind::Semicolon),
    (':', TokenKind::Colon),
    ('?', TokenKind::Question),
    ('.', TokenKind::Dot),
    ('+', TokenKind::Arith),
    ('-', TokenKind::Arith),
    ('*', TokenKind::Arith),
    ('/', TokenKind::Arith),
    ('%', TokenKind::Arith),
    ('&', TokenKind::Arith),
    ('|', TokenKind::Arith),
    ('^', TokenKind::Arith),
    ('~', TokenKind::BitNot),
    ('!', TokenKind::Not),
    ('=', TokenKind::Assign),
];

fn classify_word(lang: LangFlags, word: &str) -> TokenKind {
    use TokenKind::*;
    match word {
        "if" => If,
        "else" => Else,
        "for" | "foreach" => For,
        "while" => While,
        "do" => Do,
        "switch" => Switch,
        "case" => Case,
        "default" => Default,
        "return" => Return,
        "break" => Break,
        "continue" => Continue,
        "goto" => Goto,
        "try" => Try,
        "catch" => Catch,
        "finally" => Finally,
        "throw" => Throw,
        "using" => Using,
        "namespace" => Namespace,
        "class" if !lang.contains(LangFlags::OBJC) => Class,
        "struct" => Struct,
        "union" => Union,
        "enum" => Enum,
        "typedef" => Typedef,
        "template" if lang.contains(LangFlags::CPP) => Template,
        "operator" if lang.contains(LangFlags::CPP) => Operator,
        "sizeof" => Sizeof,
        "delete" => Delete,
        "new" => New,
        "const" | "static" | "inline" | "virtual" | "public" | "private" | "protected"
        | "volatile" | "extern" | "final" | "override" | "readonly" | "synchronized" => Qualifier,
        "int" | "char" | "float" | "double" | "void" | "bool" | "long" | "short" | "unsigned"
        | "signed" | "auto" | "var" | "string" | "size_t" => Type,
        _ => Word,
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
    lang: LangFlags,
    in_preproc: bool,
}

impl Scanner {
    fn new(text: &str, lang: LangFlags) -> Self {
        Scanner {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            lang,
            in_preproc: false,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }
}

pub fn tokenize(text: &str, lang: LangFlags) -> ChunkList {
    let mut list = ChunkList::new();
    let mut scan = Scanner::new(text, lang);
    let mut at_line_start = true;

    while !scan.is_eof() {
        let start_line = scan.line;
        let start_col = scan.col;

        // Horizontal whitespace is never chunked; it's re-derived by
        // passes::space and passes::indent.
        if matches!(scan.peek(0), Some(' ') | Some('\t') | Some('\r')) {
            scan.advance();
            continue;
        }

        if scan.peek(0) == Some('\n') {
            let mut count = 0u32;
            while scan.peek(0) == Some('\n') {
                scan.advance();
                count += 1;
            }
            let mut chunk = Chunk::new(TokenKind::Newline, "\n".repeat(count as usize));
            chunk.nl_count = count;
            chunk.orig_line = start_line;
            chunk.orig_col = start_col;
            chunk.orig_col_end = start_col;
            if scan.in_preproc {
                chunk.flags.insert(PcfFlags::IN_PREPROC);
                scan.in_preproc = false;
            }
            list.add_tail(chunk);
            at_line_start = true;
            continue;
        }

        if at_line_start && scan.peek(0) == Some('#') {
            scan.in_preproc = true;
        }
        at_line_start = false;

        let (kind, text_str) = scan_token(&mut scan);
        if text_str.is_empty() {
            // Unrecognized byte: consume it as Unknown so the scanner makes
            // forward progress (spec.md §7's "do no harm" policy).
            let c = scan.advance().unwrap();
            push_token(
                &mut list,
                &scan,
                TokenKind::Unknown,
                c.to_string(),
                start_line,
                start_col,
            );
            continue;
        }
        push_token(&mut list, &scan, kind, text_str, start_line, start_col);
    }

    list
}

fn push_token(
    list: &mut ChunkList,
    scan: &Scanner,
    kind: TokenKind,
    text: String,
    line: u32,
    col: u32,
) {
    let mut chunk = Chunk::new(kind, text);
    chunk.orig_line = line;
    chunk.orig_col = col;
    chunk.orig_col_end = scan.col;
    if scan.in_preproc {
        chunk.flags.insert(PcfFlags::IN_PREPROC);
    }
    list.add_tail(chunk);
}

fn scan_token(scan: &mut Scanner) -> (TokenKind, String) {
    let c = match scan.peek(0) {
        Some(c) => c,
        None => return (TokenKind::Eof, String::new()),
    };

    if c == '/' && scan.peek(1) == Some('/') {
        return scan_line_comment(scan);
    }
    if c == '/' && scan.peek(1) == Some('*') {
        return scan_block_comment(scan);
    }
    if c == '"' {
        return scan_string(scan, '"', TokenKind::String);
    }
    if c == '\'' {
        return scan_string(scan, '\'', TokenKind::Char);
    }
    if c == '@' {
        scan.advance();
        return (TokenKind::OcScope, "@".to_string());
    }
    if c.is_ascii_digit() {
        return scan_number(scan);
    }
    if CharTable::is_identifier_start(c) {
        return scan_word(scan);
    }

    for (s, kind) in PUNCTUATORS_3 {
        if scan.starts_with(s) {
            for _ in 0..3 {
                scan.advance();
            }
            return (*kind, s.to_string());
        }
    }
    for (s, kind) in PUNCTUATORS_2 {
        if scan.starts_with(s) {
            for _ in 0..2 {
                scan.advance();
            }
            return (*kind, s.to_string());
        }
    }
    for (ch, kind) in PUNCTUATORS_1 {
        if *ch == c {
            scan.advance();
            return (*kind, ch.to_string());
        }
    }

    (TokenKind::Unknown, String::new())
}

fn scan_line_comment(scan: &mut Scanner) -> (TokenKind, String) {
    let mut s = String::new();
    while let Some(c) = scan.peek(0) {
        if c == '\n' {
            break;
        }
        s.push(c);
        scan.advance();
    }
    (TokenKind::CommentCpp, s)
}

fn scan_block_comment(scan: &mut Scanner) -> (TokenKind, String) {
    let mut s = String::new();
    s.push(scan.advance().unwrap()); // '/'
    s.push(scan.advance().unwrap()); // '*'
    while !scan.is_eof() {
        if scan.peek(0) == Some('*') && scan.peek(1) == Some('/') {
            s.push(scan.advance().unwrap());
            s.push(scan.advance().unwrap());
            break;
        }
        s.push(scan.advance().unwrap());
    }
    (TokenKind::CommentMulti, s)
}

fn scan_string(scan: &mut Scanner, quote: char, kind: TokenKind) -> (TokenKind, String) {
    let mut s = String::new();
    s.push(scan.advance().unwrap());
    while let Some(c) = scan.peek(0) {
        if c == '\\' {
            s.push(scan.advance().unwrap());
            if let Some(escaped) = scan.peek(0) {
                s.push(escaped);
                scan.advance();
            }
            continue;
        }
        if c == quote {
            s.push(scan.advance().unwrap());
            break;
        }
        if c == '\n' {
            // Unterminated on this line; stop without consuming the newline
            // so the NEWLINE chunk is still produced normally.
            break;
        }
        s.push(c);
        scan.advance();
    }
    (kind, s)
}

fn scan_number(scan: &mut Scanner) -> (TokenKind, String) {
    let mut s = String::new();
    if scan.peek(0) == Some('0') && matches!(scan.peek(1), Some('x') | Some('X')) {
        s.push(scan.advance().unwrap());
        s.push(scan.advance().unwrap());
        while matches!(scan.peek(0), Some(c) if c.is_ascii_hexdigit()) {
            s.push(scan.advance().unwrap());
        }
        return (TokenKind::Number, s);
    }
    while matches!(scan.peek(0), Some(c) if c.is_ascii_digit()) {
        s.push(scan.advance().unwrap());
    }
    if scan.peek(0) == Some('.') && matches!(scan.peek(1), Some(c) if c.is_ascii_digit()) {
        s.push(scan.advance().unwrap());
        while matches!(scan.peek(0), Some(c) if c.is_ascii_digit()) {
            s.push(scan.advance().unwrap());
        }
    }
    while matches!(scan.peek(0), Some(c) if c.is_ascii_alphabetic()) {
        // Numeric suffixes: u, l, f, UL, etc.
        s.push(scan.advance().unwrap());
    }
    (TokenKind::Number, s)
}

fn scan_word(scan: &mut Scanner) -> (TokenKind, String) {
    let mut s = String::new();
    while let Some(c) = scan.peek(0) {
        if s.is_empty() {
            if !CharTable::is_identifier_start(c) {
                break;
            }
        } else if !CharTable::is_identifier_continue(c) {
            break;
        }
        s.push(c);
        scan.advance();
    }
    let kind = classify_word(scan.lang, &s);
    (kind, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_if_statement() {
        let list = tokenize("if (x) y;", LangFlags::C);
        let kinds: Vec<_> = list.iter().map(|id| list.get(id).kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::If,
                TokenKind::ParenOpen,
                TokenKind::Word,
                TokenKind::ParenClose,
                TokenKind::Word,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn merges_blank_lines_into_one_newline_chunk_with_run_length() {
        let list = tokenize("a;\n\n\nb;", LangFlags::C);
        let newline = list
            .iter()
            .map(|id| list.get(id))
            .find(|c| c.kind == TokenKind::Newline)
            .unwrap();
        assert_eq!(newline.nl_count, 3);
    }

    #[test]
    fn records_original_position() {
        let list = tokenize("  int x;", LangFlags::C);
        let first = list.head().unwrap();
        let chunk = list.get(first);
        assert_eq!(chunk.orig_line, 1);
        assert_eq!(chunk.orig_col, 3);
    }

    #[test]
    fn preprocessor_run_is_flagged() {
        let list = tokenize("#define X 1\ny;", LangFlags::C);
        let mut saw_preproc = false;
        let mut saw_non_preproc = false;
        for id in list.iter() {
            let c = list.get(id);
            if c.kind == TokenKind::Word && c.str == "y" {
                saw_non_preproc = !c.flags.contains(PcfFlags::IN_PREPROC);
            }
            if c.str == "define" {
                saw_preproc = c.flags.contains(PcfFlags::IN_PREPROC);
            }
        }
        assert!(saw_preproc);
        assert!(saw_non_preproc);
    }
}
