//! Language mask used to filter keyword/punctuator tables and gate
//! language-specific recognizers in `passes::combine`.

use bitflags::bitflags;

bitflags! {
    /// Which of the C family dialects a given file is being treated as.
    /// Several bits can be set at once for dialects that share a keyword
    /// table (e.g. most C-like languages accept `LANG_C`).
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub struct LangFlags: u16 {
        const C      = 0x0001;
        const CPP    = 0x0002;
        const D      = 0x0004;
        const CS     = 0x0008;
        const JAVA   = 0x0010;
        const OBJC   = 0x0020;
        const VALA   = 0x0040;
        const PAWN   = 0x0080;
        const ECMA   = 0x0100;

        /// Convenience union used by recognizers that apply to any
        /// brace-and-semicolon language (everything except Pawn).
        const ALL_C_LIKE = Self::C.bits() | Self::CPP.bits() | Self::D.bits()
            | Self::CS.bits() | Self::JAVA.bits() | Self::OBJC.bits()
            | Self::VALA.bits() | Self::ECMA.bits();
    }
}

impl LangFlags {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "c" | "h" => LangFlags::C,
            "cpp" | "cxx" | "cc" | "hpp" | "hh" | "hxx" => LangFlags::CPP,
            "d" => LangFlags::D,
            "cs" => LangFlags::CS,
            "java" => LangFlags::JAVA,
            "m" | "mm" => LangFlags::OBJC | LangFlags::CPP,
            "vala" => LangFlags::VALA,
            "pawn" | "pwn" | "p" | "sma" => LangFlags::PAWN,
            "js" | "mjs" | "cjs" | "ts" | "jsx" | "tsx" => LangFlags::ECMA,
            _ => LangFlags::C,
        }
    }

    pub fn is_braceless_statement_language(self) -> bool {
        self.contains(LangFlags::PAWN)
    }
}
