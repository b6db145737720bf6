//! `PCF_*` context bitset (spec.md §3.3), propagated during classification.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct PcfFlags: u64 {
        const IN_PREPROC     = 1 << 0;
        const IN_STRUCT      = 1 << 1;
        const IN_ENUM        = 1 << 2;
        const IN_CLASS       = 1 << 3;
        const IN_NAMESPACE   = 1 << 4;
        const IN_FCN_DEF     = 1 << 5;
        const IN_FCN_CALL    = 1 << 6;
        const IN_SPAREN      = 1 << 7;
        const IN_FOR         = 1 << 8;
        const IN_OC_MSG      = 1 << 9;
        const IN_TEMPLATE    = 1 << 10;
        const IN_TYPEDEF     = 1 << 11;
        const IN_CONST_ARGS  = 1 << 12;
        const IN_ARRAY_ASSIGN = 1 << 13;
        const IN_CLASS_BASE  = 1 << 14;
        const IN_QT_MACRO    = 1 << 15;

        const STMT_START     = 1 << 16;
        const EXPR_START     = 1 << 17;

        const VAR_DEF        = 1 << 18;
        const VAR_1ST        = 1 << 19;
        const VAR_TYPE       = 1 << 20;
        const VAR_INLINE     = 1 << 21;

        const ONE_LINER      = 1 << 22;
        const EMPTY_BODY     = 1 << 23;
        const KEEP_BRACE     = 1 << 24;

        const LVALUE         = 1 << 25;
        const OLD_FCN_PARAMS = 1 << 26;
        const RIGHT_COMMENT  = 1 << 27;
        const DONT_INDENT    = 1 << 28;
        const ALIGN_START    = 1 << 29;
        const WAS_ALIGNED    = 1 << 30;
        const ANCHOR         = 1 << 31;
        const PUNCTUATOR     = 1 << 32;
        const INSERTED       = 1 << 33;
        const LONG_BLOCK     = 1 << 34;

        const OC_BOXED       = 1 << 35;
        const OC_RTYPE       = 1 << 36;
        const OC_ATYPE       = 1 << 37;

        const WF_ENDIF       = 1 << 38;

        /// Set by `passes::space`: a single space belongs immediately
        /// before this chunk (on the same source line as its predecessor).
        /// Absent means no gap. Consulted by `passes::indent`/`align`/
        /// `width` when deriving `column`, and ultimately by the output
        /// writer.
        const SPACE_BEFORE   = 1 << 39;
    }
}

impl PcfFlags {
    /// Mask of flags that should propagate to a cloned chunk (e.g. a brace
    /// synthesized by `passes::braces`) without leaking state that is only
    /// valid for the exact source position of the original chunk.
    pub const COPY_FLAGS: PcfFlags = PcfFlags::from_bits_truncate(
        PcfFlags::IN_PREPROC.bits()
            | PcfFlags::IN_STRUCT.bits()
            | PcfFlags::IN_ENUM.bits()
            | PcfFlags::IN_CLASS.bits()
            | PcfFlags::IN_NAMESPACE.bits()
            | PcfFlags::IN_FCN_DEF.bits()
            | PcfFlags::IN_FCN_CALL.bits()
            | PcfFlags::IN_SPAREN.bits()
            | PcfFlags::IN_FOR.bits()
            | PcfFlags::IN_OC_MSG.bits()
            | PcfFlags::IN_TEMPLATE.bits()
            | PcfFlags::IN_TYPEDEF.bits(),
    );
}
