//! Token kinds.
//!
//! The real tool's enumeration runs to roughly 500 members; this keeps one
//! representative member per category from spec.md §3.2 so every pass has a
//! concrete kind to dispatch on, plus the delimiter pairs the invariants in
//! §3.1/§8.1 depend on. Extending a category (e.g. adding more Objective-C
//! message selectors) means adding a variant here and a line to
//! `inverse()`/`category()`; nothing else needs to change shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u16)]
pub enum TokenKind {
    // --- sentinels -------------------------------------------------------
    Tombstone,
    Eof,
    Unknown,

    // --- whitespace / trivia ----------------------------------------------
    /// A physical newline run; `Chunk::nl_count` holds the run length.
    Newline,
    /// A backslash-continued physical newline inside a macro/preproc line.
    NlCont,
    Comment,
    CommentMulti,
    CommentCpp,
    Ignored,

    // --- literals / words ---------------------------------------------
    Word,
    Type,
    Number,
    String,
    StringMulti,
    IStringStart,
    IStringBody,
    IStringEnd,
    Char,

    // --- delimiter pairs (closer = opener variant listed right after) ---
    ParenOpen,
    ParenClose,
    SparenOpen,
    SparenClose,
    FparenOpen,
    FparenClose,
    TparenOpen,
    TparenClose,
    BraceOpen,
    BraceClose,
    VbraceOpen,
    VbraceClose,
    SquareOpen,
    SquareClose,
    TSquare,
    AngleOpen,
    AngleClose,

    // --- punctuation -----------------------------------------------------
    Comma,
    Semicolon,
    VSemicolon,
    Colon,
    PrivateColon,
    CondColon,
    CaseColon,
    LabelColon,
    ClassColon,
    ConstrColon,
    ForColon,
    OcDictColon,
    CsSqColon,
    BitColon,
    Question,
    Dot,
    Member,
    DcMember,
    Arrow,
    Ellipsis,

    // --- operators ---------------------------------------------------
    Arith,
    Boolean,
    Compare,
    Assign,
    IncBefore,
    IncAfter,
    DecBefore,
    DecAfter,
    PtrType,
    Addr,
    Deref,
    Byref,
    Pos,
    Neg,
    Not,
    BitNot,
    CCast,
    CppCast,
    OperatorVal,

    // --- keywords / statements ---------------------------------------
    If,
    Else,
    Elseif,
    For,
    While,
    Do,
    Switch,
    Case,
    Default,
    Return,
    Break,
    Continue,
    Goto,
    Label,
    Try,
    Catch,
    Finally,
    Throw,
    Using,
    Namespace,
    Class,
    Struct,
    Union,
    Enum,
    EnumClass,
    Typedef,
    Template,
    Operator,
    Sizeof,
    Delete,
    New,
    Qualifier,
    FuncCall,
    FuncDef,
    FuncProto,
    FuncType,
    FuncVar,
    FuncClassDef,
    FuncClassProto,
    FuncCtorVar,
    Destructor,

    // --- preprocessor -----------------------------------------------
    Preproc,
    PpDefine,
    PpIf,
    PpElse,
    PpEndif,
    PpPragma,
    PpRegion,
    PpEndregion,
    PpInclude,

    // --- Objective-C -------------------------------------------------
    OcClass,
    OcMsg,
    OcMsgDecl,
    OcMsgSpec,
    OcBlock,
    OcBlockCaret,
    OcBlockExpr,
    OcBlockType,
    OcProperty,
    OcScope,
    OcColon,
    OcProtoList,
    OcGenericSpec,

    // --- C++ lambda ----------------------------------------------------
    CppLambda,

    // --- Pawn ------------------------------------------------------------
    PawnRealSemicolon,
}

impl Default for TokenKind {
    fn default() -> Self {
        TokenKind::Tombstone
    }
}

impl TokenKind {
    /// Maps an opener to its closer and vice versa; identity for unpaired
    /// kinds. Defined for every paired kind named in spec.md §3.2.
    pub fn inverse(self) -> TokenKind {
        use TokenKind::*;
        match self {
            ParenOpen => ParenClose,
            ParenClose => ParenOpen,
            SparenOpen => SparenClose,
            SparenClose => SparenOpen,
            FparenOpen => FparenClose,
            FparenClose => FparenOpen,
            TparenOpen => TparenClose,
            TparenClose => TparenOpen,
            BraceOpen => BraceClose,
            BraceClose => BraceOpen,
            VbraceOpen => VbraceClose,
            VbraceClose => VbraceOpen,
            SquareOpen => SquareClose,
            SquareClose => SquareOpen,
            AngleOpen => AngleClose,
            AngleClose => AngleOpen,
            other => other,
        }
    }

    pub fn is_opener(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            ParenOpen
                | SparenOpen
                | FparenOpen
                | TparenOpen
                | BraceOpen
                | VbraceOpen
                | SquareOpen
                | AngleOpen
        )
    }

    pub fn is_closer(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            ParenClose
                | SparenClose
                | FparenClose
                | TparenClose
                | BraceClose
                | VbraceClose
                | SquareClose
                | AngleClose
        )
    }

    pub fn is_any_brace(self) -> bool {
        matches!(
            self,
            TokenKind::BraceOpen
                | TokenKind::BraceClose
                | TokenKind::VbraceOpen
                | TokenKind::VbraceClose
        )
    }

    pub fn is_virtual_brace(self) -> bool {
        matches!(self, TokenKind::VbraceOpen | TokenKind::VbraceClose)
    }

    pub fn is_newline(self) -> bool {
        matches!(self, TokenKind::Newline)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::CommentMulti | TokenKind::CommentCpp
        )
    }

    pub fn is_preproc(self) -> bool {
        matches!(
            self,
            TokenKind::Preproc
                | TokenKind::PpDefine
                | TokenKind::PpIf
                | TokenKind::PpElse
                | TokenKind::PpEndif
                | TokenKind::PpPragma
                | TokenKind::PpRegion
                | TokenKind::PpEndregion
                | TokenKind::PpInclude
        )
    }

    pub fn is_semicolon(self) -> bool {
        matches!(self, TokenKind::Semicolon | TokenKind::VSemicolon)
    }

    pub fn is_control_statement(self) -> bool {
        use TokenKind::*;
        matches!(self, If | Else | Elseif | For | While | Do | Switch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_an_involution_for_pairs() {
        for kind in [
            TokenKind::ParenOpen,
            TokenKind::BraceOpen,
            TokenKind::SquareOpen,
            TokenKind::AngleOpen,
            TokenKind::VbraceOpen,
        ] {
            assert_eq!(kind.inverse().inverse(), kind);
            assert_ne!(kind.inverse(), kind);
        }
    }

    #[test]
    fn inverse_is_identity_for_unpaired_kinds() {
        assert_eq!(TokenKind::Word.inverse(), TokenKind::Word);
        assert_eq!(TokenKind::Semicolon.inverse(), TokenKind::Semicolon);
    }
}
