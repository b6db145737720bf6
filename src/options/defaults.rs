use super::{Iarf, OptionValue, Position};
use std::collections::HashMap;

/// Conservative defaults: almost everything is `Iarf::Ignore` /
/// `Position::Ignore`, matching the "do no harm" stance spec.md §7
/// describes and the identity-output invariant in spec.md §8.1.4.
pub(super) fn build_defaults() -> HashMap<&'static str, OptionValue> {
    let mut m = HashMap::new();

    macro_rules! iarf {
        ($($name:literal),+ $(,)?) => {
            $(m.insert($name, OptionValue::Iarf(Iarf::Ignore));)+
        };
    }
    macro_rules! pos {
        ($($name:literal),+ $(,)?) => {
            $(m.insert($name, OptionValue::Position(Position::Ignore));)+
        };
    }
    macro_rules! boolean {
        ($($name:literal => $val:expr),+ $(,)?) => {
            $(m.insert($name, OptionValue::Bool($val));)+
        };
    }
    macro_rules! unsigned {
        ($($name:literal => $val:expr),+ $(,)?) => {
            $(m.insert($name, OptionValue::Unsigned($val));)+
        };
    }
    macro_rules! signed {
        ($($name:literal => $val:expr),+ $(,)?) => {
            $(m.insert($name, OptionValue::Signed($val));)+
        };
    }

    // --- spacing (passes::space) -----------------------------------------
    iarf!(
        "sp_before_comma",
        "sp_after_comma",
        "sp_inside_paren",
        "sp_inside_sparen",
        "sp_inside_fparen",
        "sp_before_sparen",
        "sp_before_fparen",
        "sp_after_ptr_star",
        "sp_before_ptr_star",
        "sp_around_assign",
        "sp_around_compare",
        "sp_around_boolean",
        "sp_around_arith",
        "sp_func_call_paren",
        "sp_before_semi",
        "sp_before_square",
        "sp_inside_braces",
        "sp_angle_paren",
    );

    // --- brace add/remove (passes::braces) --------------------------------
    iarf!(
        "mod_full_brace_if",
        "mod_full_brace_for",
        "mod_full_brace_while",
        "mod_full_brace_do",
    );
    unsigned!("mod_full_brace_nl" => 0);
    boolean!(
        "mod_full_brace_if_chain" => false,
        "mod_add_long_closebrace_comment_enabled" => false,
    );
    unsigned!("mod_add_long_closebrace_comment" => 20);

    // --- newlines (passes::newlines) --------------------------------------
    iarf!(
        "nl_if_brace",
        "nl_else_brace",
        "nl_elseif_brace",
        "nl_for_brace",
        "nl_while_brace",
        "nl_do_brace",
        "nl_switch_brace",
        "nl_brace_else",
        "nl_fcall_brace",
        "nl_fdef_brace",
        "nl_enum_brace",
        "nl_struct_brace",
        "nl_union_brace",
        "nl_class_brace",
        "nl_namespace_brace",
        "nl_func_decl_start",
        "nl_func_decl_args",
        "nl_func_decl_end",
        "nl_after_semicolon",
        "nl_before_return_stmt",
    );
    pos!("pos_comma", "pos_bool", "pos_assign", "pos_compare", "pos_arith");
    unsigned!(
        "nl_max" => 2,
        "nl_func_var_def_blk" => 1,
    );
    boolean!("nl_squeeze_ifdef" => false);

    // --- semicolons / parens / returns / sort ------------------------------
    boolean!(
        "mod_remove_extra_semicolon" => false,
        "mod_remove_semicolon_after_brace" => false,
        "mod_full_paren_if_bool" => false,
        "mod_remove_empty_return" => false,
        "mod_sort_include" => false,
        "mod_sort_using" => false,
        "mod_sort_import" => false,
    );

    // --- indent (passes::indent) -------------------------------------------
    unsigned!(
        "indent_columns" => 4,
        "indent_with_tabs" => 0,
    );
    signed!("indent_continue" => 0);
    boolean!(
        "indent_namespace" => true,
        "indent_class" => true,
        "indent_switch_case" => false,
        "indent_label" => true,
    );

    // --- align (passes::align) ---------------------------------------------
    unsigned!(
        "align_var_def_span" => 0,
        "align_var_def_gap" => 0,
        "align_assign_span" => 0,
        "align_right_cmt_span" => 0,
    );

    // --- width (passes::width) ----------------------------------------------
    unsigned!("code_width" => 0);
    boolean!("ls_code_width" => false, "ls_func_split_full" => false);

    m
}
