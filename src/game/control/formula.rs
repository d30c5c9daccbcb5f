// Formula plug-in point and a minimal built-in implementation

use std::fmt;
use std::sync::Arc;

use crate::game::characters::{ActorContext, ScriptKey};

/// A compiled expression evaluated against an actor
pub trait Formula: fmt::Debug {
    fn execute(&self, ctx: &ActorContext<'_>) -> i32;

    /// Source text, kept so records can be written back out
    fn source(&self) -> &str;
}

pub type FormulaRef = Arc<dyn Formula>;

/// Turns formula source text into something executable
pub trait FormulaCompiler {
    /// `None` when the source does not compile
    fn compile(&self, source: &str) -> Option<FormulaRef>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Const(i32),
    Property { key: ScriptKey, negate: bool },
}

/// Either an integer literal or an optionally negated property name,
/// e.g. `3`, `facing`, `-last_walk`
#[derive(Debug, Clone)]
pub struct SimpleFormula {
    source: String,
    term: Term,
}

impl SimpleFormula {
    pub fn parse(source: &str) -> Option<Self> {
        let text = source.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(n) = text.parse::<i32>() {
            return Some(Self {
                source: source.to_string(),
                term: Term::Const(n),
            });
        }

        let (negate, name) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };

        let valid_name = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return None;
        }

        let key = name.parse::<ScriptKey>().ok()?;
        Some(Self {
            source: source.to_string(),
            term: Term::Property { key, negate },
        })
    }
}

impl Formula for SimpleFormula {
    fn execute(&self, ctx: &ActorContext<'_>) -> i32 {
        match &self.term {
            Term::Const(n) => *n,
            Term::Property { key, negate } => {
                let value = ctx.get(key).as_int();
                if *negate {
                    -value
                } else {
                    value
                }
            }
        }
    }

    fn source(&self) -> &str {
        &self.source
    }
}

/// Compiler for `SimpleFormula`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCompiler;

impl FormulaCompiler for SimpleCompiler {
    fn compile(&self, source: &str) -> Option<FormulaRef> {
        SimpleFormula::parse(source).map(|f| Arc::new(f) as FormulaRef)
    }
}
