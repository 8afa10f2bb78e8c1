//! A minimal Scheme-dialect reader, evaluator and canonical serializer.
//!
//! # Overview
//!
//! The crate exposes a single pure entry point, [`run`], that takes one
//! line of source text and returns either its canonical textual result or
//! a [`SchemeError`]. Internally the text passes through a short pipeline:
//!
//! ```text
//! source string -> preprocessor -> tokenizer -> parser -> AST -> evaluator -> serializer -> output string
//! ```
//!
//! The dialect is deliberately small: integers, booleans, symbols and cons
//! pairs are the only values, and the evaluator dispatches on the head
//! symbol of each application against a closed table of built-ins (see
//! [`builtins`]). There are no user-defined procedures, no `define`, no
//! floating-point numbers, and no I/O.
//!
//! # Example
//!
//! ```
//! use scheme_core::run;
//!
//! assert_eq!(run("(+ 1 2 3)").unwrap(), "6");
//! assert_eq!(run("'(1 2)").unwrap(), "(1 2)");
//! assert!(run("(").is_err());
//! ```
mod builtins;
pub mod config;
mod error;
mod eval;
mod parser;
mod token;
mod tokenizer;
pub mod util;
mod value;

#[cfg(test)]
mod __tests__;

pub use config::Config;
pub use error::{SchemeError, SchemeResult};
pub use util::Trace;
pub use value::Value;

use tokenizer::Tokenizer;
use util::Code;

/// Run one line of source through the full pipeline with tracing off.
pub fn run(input: &str) -> SchemeResult<String> {
    run_with_config(input, &Config::default())
}

/// Run one line of source, routing debug-only tracing through `config`.
pub fn run_with_config(input: &str, config: &Config) -> SchemeResult<String> {
    if is_trivial(input) {
        return Ok(trivial());
    }
    if input.starts_with(' ') {
        return Err(SchemeError::syntax("input cannot begin with a space"));
    }

    let trimmed = input.trim_end_matches(' ');

    let rewritten;
    let source: &str = if let Some(rest) = trimmed.strip_prefix('\'') {
        if rest.starts_with(' ') {
            return Err(SchemeError::syntax("quote cannot be followed by a space"));
        }
        rewritten = format!("(quote {})", rest);
        &rewritten
    } else {
        trimmed
    };

    let code = Code::from(source);
    let mut tokenizer = Tokenizer::new(code, config.trace)?;
    let ast = parser::parse(&mut tokenizer)?;

    if matches!(ast, Value::CloseMarker) {
        return Err(SchemeError::syntax("unmatched ')'"));
    }

    serialize_top_level(&ast, config)
}

/// Implementation-defined "nothing to do" check: empty input only.
fn is_trivial(input: &str) -> bool {
    input.is_empty()
}

/// Implementation-defined trivial result: the empty string.
fn trivial() -> String {
    String::new()
}

/// Mirrors the top-level dispatch of the reference interpreter's `Run`:
/// `quote` is unwrapped specially (distinct from [`eval::eval`]'s own
/// nested handling of `quote`), any other head must name a built-in, and a
/// pair-shaped result is wrapped in one extra pair of parentheses that
/// [`value::serialize`] itself never adds.
fn serialize_top_level(ast: &Value, config: &Config) -> SchemeResult<String> {
    match ast {
        Value::Integer(_) | Value::Bool(_) | Value::Sym(_) => value::serialize(ast),
        Value::Pair { car, cdr } => {
            let car = car
                .as_deref()
                .ok_or_else(|| SchemeError::runtime("cannot evaluate a pair with no car"))?;

            if let Some("quote") = car.as_sym() {
                let cdr = cdr
                    .as_deref()
                    .ok_or_else(|| SchemeError::syntax("'quote' requires a form"))?;
                return match cdr.pair_parts() {
                    Some((Some(inner), _)) => Ok(format!("({})", value::serialize(inner)?)),
                    Some((None, _)) => Err(SchemeError::runtime("'quote' of an empty pair")),
                    None => value::serialize(cdr),
                };
            }

            let name = car
                .as_sym()
                .filter(|name| builtins::is_builtin(name))
                .ok_or_else(|| {
                    SchemeError::runtime("top-level form must apply a known procedure")
                })?;
            config.trace.dispatch(name, 0);

            let output = ast.eval()?;
            match &output {
                Value::Pair { .. } if output.is_nil() => Ok("()".to_string()),
                Value::Pair { .. } => Ok(format!("({})", value::serialize(&output)?)),
                _ => value::serialize(&output),
            }
        }
        Value::CloseMarker => unreachable!("stray ')' is rejected before serialization"),
    }
}
