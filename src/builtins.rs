use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::error::{SchemeError, SchemeResult};
use crate::value::Value;

/// The closed set of recognized head symbols — built-ins plus `quote`.
/// Anything outside this table is either a literal partial application
/// (absent `cdr`) or a runtime error (present `cdr`); see [`crate::eval`].
pub static BUILTIN_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "quote", "+", "-", "*", "/", "=", "<", ">", ">=", "<=", "min", "max", "abs", "number?",
        "boolean?", "not", "and", "or", "pair?", "null?", "list?", "cons", "car", "cdr", "list",
        "list-tail", "list-ref",
    ]
    .into_iter()
    .collect()
});

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(name)
}

/// Evaluate `value` in place if it looks like an inline call to a known
/// built-in — `Pair{ car: Sym(known), .. }` — otherwise return it unchanged.
fn reduce_if_builtin_call(value: &Value) -> SchemeResult<Value> {
    if let Some((Some(car), _)) = value.pair_parts() {
        if let Some(name) = car.as_sym() {
            if is_builtin(name) {
                return value.eval();
            }
        }
    }
    Ok(value.clone())
}

/// Collect the evaluated-or-structural argument vector for a call's `cdr`.
///
/// Grounded in the original `ArgsToVector`: a flat walk down the spine,
/// except the moment a `car` is itself a pair, it descends into that pair's
/// own leftmost non-pair `car`, reduces it if that's a builtin call, pushes
/// it, and stops — it never collects more than one argument past a nested
/// sub-list.
pub fn args_to_vec(cdr: &Value) -> SchemeResult<Vec<Value>> {
    if !cdr.is_pair() {
        return Err(SchemeError::runtime("argument list must be a pair"));
    }
    let reduced = reduce_if_builtin_call(cdr)?;
    if !reduced.is_pair() {
        return Err(SchemeError::runtime("argument list must be a pair"));
    }

    let mut args = Vec::new();
    let (car, cdr) = reduced.pair_parts().unwrap();
    let Some(first) = car else {
        return Ok(args);
    };
    args.push(first.clone());

    let mut rest = cdr;
    loop {
        let Some(node) = rest else { break };
        if !node.is_pair() {
            // A dotted tail atom reached while collecting arguments.
            args.push(node.clone());
            break;
        }
        let (node_car, node_cdr) = node.pair_parts().unwrap();
        match node_car {
            None => break,
            Some(atom) if !atom.is_pair() => {
                args.push(atom.clone());
                rest = node_cdr;
            }
            Some(nested) => {
                let mut leaf = nested;
                while let Some((Some(inner), _)) = leaf.pair_parts() {
                    if !inner.is_pair() {
                        break;
                    }
                    leaf = inner;
                }
                let reduced_leaf = reduce_if_builtin_call(leaf)?;
                args.push(reduced_leaf);
                break;
            }
        }
    }
    Ok(args)
}

fn require_all_integers(args: &[Value]) -> SchemeResult<Vec<i64>> {
    args.iter()
        .map(|v| {
            v.as_integer()
                .ok_or_else(|| SchemeError::runtime("expected an integer argument"))
        })
        .collect()
}

fn compare(args: &[Value], f: impl Fn(i64, i64) -> bool) -> SchemeResult<Value> {
    if args.is_empty() {
        return Err(SchemeError::runtime("comparison requires at least one argument"));
    }
    let ints = require_all_integers(args)?;
    if ints.len() == 1 {
        return Ok(Value::bool(true));
    }
    for pair in ints.windows(2) {
        if !f(pair[0], pair[1]) {
            return Ok(Value::bool(false));
        }
    }
    Ok(Value::bool(true))
}

fn fold_arith(args: &[Value], f: impl Fn(i64, i64) -> i64) -> SchemeResult<Value> {
    if args.is_empty() {
        return Err(SchemeError::runtime("arithmetic op requires at least one argument"));
    }
    let ints = require_all_integers(args)?;
    let mut acc = ints[0];
    for &n in &ints[1..] {
        acc = f(acc, n);
    }
    Ok(Value::integer(acc))
}

fn is_truthy_false(v: &Value) -> bool {
    matches!(v.as_bool(), Some(false))
}

/// Apply a known built-in by name; `cdr` is the raw, unreduced `cdr` slot of
/// the calling form. Returns `None` only for `name == "quote"`, which the
/// evaluator handles directly since it never evaluates its argument.
pub fn apply(name: &str, cdr: Option<&Value>) -> Option<SchemeResult<Value>> {
    let require_cdr = || {
        cdr.ok_or_else(|| SchemeError::runtime(format!("'{}' requires an argument", name)))
    };

    let result = match name {
        "quote" => return None,
        "number?" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            Ok(Value::bool(args.len() == 1 && matches!(args[0], Value::Integer(_))))
        }),
        "boolean?" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            if args.len() > 1 {
                return Err(SchemeError::runtime("'boolean?' takes at most one argument"));
            }
            Ok(Value::bool(
                args.first().map(|v| matches!(v, Value::Bool(_))).unwrap_or(false),
            ))
        }),
        "pair?" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            Ok(Value::bool(args.len() == 2))
        }),
        "null?" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            Ok(Value::bool(args.is_empty()))
        }),
        "list?" => require_cdr().and_then(|cdr| Ok(Value::bool(is_proper_list(cdr)))),
        "cons" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            if args.len() != 2 {
                return Err(SchemeError::runtime("'cons' requires exactly two arguments"));
            }
            let mut it = args.into_iter();
            let a = it.next().unwrap();
            let b = it.next().unwrap();
            Ok(Value::cons(a, b))
        }),
        "car" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            args.into_iter()
                .next()
                .ok_or_else(|| SchemeError::runtime("'car' of an empty argument list"))
        }),
        "cdr" => require_cdr().and_then(builtin_cdr),
        "list-tail" => require_cdr().and_then(builtin_list_tail),
        "list-ref" => require_cdr().and_then(|cdr| {
            let tail = builtin_list_tail(cdr)?;
            match tail.pair_parts() {
                Some((Some(car), _)) => Ok(car.clone()),
                _ => Err(SchemeError::runtime("'list-ref' index out of range")),
            }
        }),
        "list" => Ok(match cdr {
            None => Value::nil(),
            Some(cdr) if !cdr.is_pair() => Value::cons_nil_tail(cdr.clone()),
            Some(cdr) => cdr.clone(),
        }),
        "=" => optional_cdr_identity(name, cdr, |args| compare(args, |a, b| a == b)),
        ">" => optional_cdr_identity(name, cdr, |args| compare(args, |a, b| a > b)),
        "<" => optional_cdr_identity(name, cdr, |args| compare(args, |a, b| a < b)),
        ">=" => optional_cdr_identity(name, cdr, |args| compare(args, |a, b| a >= b)),
        "<=" => optional_cdr_identity(name, cdr, |args| compare(args, |a, b| a <= b)),
        "+" => optional_cdr_identity(name, cdr, |args| fold_arith(args, i64::wrapping_add)),
        "*" => optional_cdr_identity(name, cdr, |args| fold_arith(args, i64::wrapping_mul)),
        "-" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            fold_arith(&args, i64::wrapping_sub)
        }),
        "/" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            let ints = require_all_integers(&args)?;
            if ints[1..].iter().any(|&n| n == 0) {
                return Err(SchemeError::runtime("division by zero"));
            }
            fold_arith(&args, i64::wrapping_div)
        }),
        "min" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            fold_arith(&args, i64::min)
        }),
        "max" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            fold_arith(&args, i64::max)
        }),
        "abs" => require_cdr().and_then(|cdr| {
            let args = args_to_vec(cdr)?;
            if args.len() != 1 {
                return Err(SchemeError::runtime("'abs' takes exactly one argument"));
            }
            let n = args[0]
                .as_integer()
                .ok_or_else(|| SchemeError::runtime("'abs' expects an integer"))?;
            Ok(Value::integer(n.wrapping_abs()))
        }),
        "not" => require_cdr().and_then(|cdr| {
            if cdr.is_nil() {
                return Ok(Value::bool(false));
            }
            let args = args_to_vec(cdr)?;
            if args.len() != 1 {
                return Err(SchemeError::runtime("'not' takes exactly one argument"));
            }
            Ok(Value::bool(is_truthy_false(&args[0])))
        }),
        "and" => optional_cdr_identity(name, cdr, short_circuit_and),
        "or" => optional_cdr_identity(name, cdr, short_circuit_or),
        _ => return None,
    };
    Some(result)
}

/// Shared shape for `=`,`+`,`*`,`and`,`or`: an absent `cdr` returns the head
/// symbol re-serialized as its own identity value, rather than erroring.
fn optional_cdr_identity(
    name: &str,
    cdr: Option<&Value>,
    f: impl FnOnce(&[Value]) -> SchemeResult<Value>,
) -> SchemeResult<Value> {
    match cdr {
        None => Ok(Value::sym(name)),
        Some(cdr) => {
            let args = args_to_vec(cdr)?;
            f(&args)
        }
    }
}

fn short_circuit_and(args: &[Value]) -> SchemeResult<Value> {
    if args.is_empty() {
        return Err(SchemeError::runtime("'and' requires at least one argument"));
    }
    if args.len() == 1 {
        return Ok(if is_truthy_false(&args[0]) {
            Value::bool(false)
        } else {
            args[0].clone()
        });
    }
    for arg in args {
        if is_truthy_false(arg) {
            return Ok(Value::bool(false));
        }
    }
    Ok(args.last().unwrap().clone())
}

fn short_circuit_or(args: &[Value]) -> SchemeResult<Value> {
    if args.is_empty() {
        return Err(SchemeError::runtime("'or' requires at least one argument"));
    }
    if args.len() == 1 {
        return Ok(if is_truthy_false(&args[0]) {
            args[0].clone()
        } else {
            Value::bool(true)
        });
    }
    for arg in args {
        if !is_truthy_false(arg) {
            return Ok(Value::bool(true));
        }
    }
    Ok(args.last().unwrap().clone())
}

fn builtin_cdr(cdr: &Value) -> SchemeResult<Value> {
    if !cdr.is_pair() {
        return Err(SchemeError::runtime("'cdr' expects a pair"));
    }
    if cdr.is_nil() {
        return Err(SchemeError::runtime("'cdr' of the empty list"));
    }
    match cdr.pair_parts().unwrap() {
        (_, None) => Ok(Value::nil()),
        (_, Some(rest)) => Ok(rest.clone()),
    }
}

fn builtin_list_tail(cdr: &Value) -> SchemeResult<Value> {
    if !cdr.is_pair() {
        return Err(SchemeError::runtime("'list-tail' expects a list"));
    }
    if cdr.is_nil() {
        return Err(SchemeError::runtime("'list-tail' of the empty list"));
    }
    // Walk to the spine's final cell to read the trailing index argument.
    let mut last = cdr;
    while let Some((_, Some(next))) = last.pair_parts() {
        if !next.is_pair() {
            break;
        }
        last = next;
    }
    let index = match last.pair_parts() {
        Some((Some(car), _)) => car
            .as_integer()
            .ok_or_else(|| SchemeError::runtime("'list-tail' index must be an integer"))?,
        _ => return Err(SchemeError::runtime("'list-tail' missing index")),
    };

    let (Some(list), _) = cdr.pair_parts().unwrap() else {
        return Err(SchemeError::runtime("'list-tail' expects a list as its first argument"));
    };
    let mut cursor = list;
    for _ in 0..index {
        match cursor.pair_parts() {
            Some((_, Some(next))) => cursor = next,
            _ => return Err(SchemeError::runtime("'list-tail' index out of range")),
        }
    }
    Ok(cursor.clone())
}

fn is_proper_list(cdr: &Value) -> bool {
    let mut cursor = cdr;
    loop {
        match cursor.pair_parts() {
            Some((Some(car), _)) if car.is_pair() => return false,
            Some((_, Some(next))) if next.is_pair() => cursor = next,
            Some((_, None)) => return true,
            Some((_, Some(_))) => return false,
            None => return true,
        }
    }
}
