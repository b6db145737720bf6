//! Process-wide option store (spec.md §3.4, §6.1). Loaded once, read-only
//! for the duration of a pipeline run. The *source* of the config document
//! (file format, CLI flags) is out of scope per spec.md §1/§6 — this module
//! only owns the typed store and its defaults.

mod defaults;

use crate::error::{FormatError, FormatResult};
use crate::language::LangFlags;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The central spacing/newline control vocabulary (spec.md §3.4).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Iarf {
    /// Do not modify existing whitespace at this site.
    Ignore,
    /// Ensure at least one (space or newline); insert if missing.
    Add,
    /// Ensure none.
    Remove,
    /// Ensure exactly one.
    Force,
}

impl Iarf {
    pub fn wants_presence(self) -> bool {
        matches!(self, Iarf::Add | Iarf::Force)
    }

    pub fn wants_absence(self) -> bool {
        matches!(self, Iarf::Remove)
    }
}

/// Where an operator sits relative to a line break (spec.md glossary).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Ignore,
    Lead,
    Trail,
    Join,
    Break,
    Force,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Iarf(Iarf),
    Position(Position),
    String(String),
}

/// A JSON document matching `Options`' internal shape, for a host driver to
/// load and overlay onto the defaults. The document format itself is not
/// this crate's concern beyond providing this typed shape.
#[derive(Debug, Default, Deserialize)]
pub struct OptionsFile {
    #[serde(flatten)]
    pub values: HashMap<String, OptionValue>,
}

#[derive(Debug, Clone)]
pub struct Options {
    values: HashMap<&'static str, OptionValue>,
    pub lang: LangFlags,
}

impl Options {
    pub fn new(lang: LangFlags) -> Self {
        Options {
            values: defaults::build_defaults(),
            lang,
        }
    }

    pub fn overlay(&mut self, file: OptionsFile) -> FormatResult<()> {
        for (name, value) in file.values {
            let key = self
                .values
                .keys()
                .find(|k| **k == name.as_str())
                .copied()
                .ok_or_else(|| FormatError::OptionConflict {
                    option: "<loaded>",
                    other: "<unknown>",
                    reason: format!("unrecognized option `{name}`"),
                })?;
            self.values.insert(key, value);
        }
        self.validate()
    }

    fn validate(&self) -> FormatResult<()> {
        let nl_max = self.get_unsigned("nl_max");
        let blk_span = self.get_unsigned("nl_func_var_def_blk");
        if nl_max != 0 && blk_span >= nl_max {
            return Err(FormatError::OptionConflict {
                option: "nl_func_var_def_blk",
                other: "nl_max",
                reason: "blank-line-block size must be smaller than the global maximum".into(),
            });
        }
        Ok(())
    }

    pub fn get_bool(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(OptionValue::Bool(v)) => *v,
            _ => false,
        }
    }

    pub fn get_unsigned(&self, name: &str) -> u64 {
        match self.values.get(name) {
            Some(OptionValue::Unsigned(v)) => *v,
            _ => 0,
        }
    }

    pub fn get_signed(&self, name: &str) -> i64 {
        match self.values.get(name) {
            Some(OptionValue::Signed(v)) => *v,
            _ => 0,
        }
    }

    pub fn get_iarf(&self, name: &str) -> Iarf {
        match self.values.get(name) {
            Some(OptionValue::Iarf(v)) => *v,
            _ => Iarf::Ignore,
        }
    }

    pub fn get_position(&self, name: &str) -> Position {
        match self.values.get(name) {
            Some(OptionValue::Position(v)) => *v,
            _ => Position::Ignore,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &'static str, value: OptionValue) {
        self.values.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let opts = Options::new(LangFlags::C);
        assert_eq!(opts.get_iarf("sp_before_comma"), Iarf::Ignore);
        assert_eq!(opts.get_iarf("nl_if_brace"), Iarf::Ignore);
    }

    #[test]
    fn overlay_rejects_unknown_option_names() {
        let mut opts = Options::new(LangFlags::C);
        let mut values = HashMap::new();
        values.insert("not_a_real_option".to_string(), OptionValue::Bool(true));
        let file = OptionsFile { values };
        assert!(opts.overlay(file).is_err());
    }

    #[test]
    fn overlay_applies_known_option_names() {
        let mut opts = Options::new(LangFlags::C);
        let mut values = HashMap::new();
        values.insert("sp_before_comma".to_string(), OptionValue::Iarf(Iarf::Remove));
        let file = OptionsFile { values };
        opts.overlay(file).unwrap();
        assert_eq!(opts.get_iarf("sp_before_comma"), Iarf::Remove);
    }

    #[test]
    fn validate_rejects_conflicting_blank_line_bounds() {
        let mut opts = Options::new(LangFlags::C);
        opts.set("nl_max", OptionValue::Unsigned(2));
        opts.set("nl_func_var_def_blk", OptionValue::Unsigned(5));
        assert!(opts.validate().is_err());
    }
}
