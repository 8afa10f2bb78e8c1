use std::borrow::Cow;

use crate::error::{SchemeError, SchemeResult};

/// The shared tagged-variant data model: parser output and evaluator
/// input/output share this one type.
///
/// `Nil` — the empty list `()` — has no variant of its own; it is the
/// canonical `Pair { car: None, cdr: None }` (see [`Value::nil`]). Keeping
/// "absent" (`None`) distinct from a `Nil` value is what lets the serializer
/// tell `()` apart from a missing `cdr` on a single-element list.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Pair {
        car: Option<Box<Value>>,
        cdr: Option<Box<Value>>,
    },
    Integer(i64),
    Bool(bool),
    Sym(String),
    /// Internal-only sentinel the parser's inner reader emits for a bare
    /// `)`. Never appears in a successfully parsed AST.
    CloseMarker,
}

impl Value {
    pub fn nil() -> Value {
        Value::Pair {
            car: None,
            cdr: None,
        }
    }

    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair {
            car: Some(Box::new(car)),
            cdr: Some(Box::new(cdr)),
        }
    }

    /// A pair with only `car` populated — a one-element list.
    pub fn cons_nil_tail(car: Value) -> Value {
        Value::Pair {
            car: Some(Box::new(car)),
            cdr: None,
        }
    }

    pub fn sym(name: impl Into<String>) -> Value {
        Value::Sym(name.into())
    }

    pub fn integer(n: i64) -> Value {
        Value::Integer(n)
    }

    pub fn bool(b: bool) -> Value {
        Value::Bool(b)
    }

    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Pair {
                car: None,
                cdr: None
            }
        )
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair { .. })
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Value::Sym(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// `(car, cdr)` slot references, only for a `Pair`.
    pub fn pair_parts(&self) -> Option<(Option<&Value>, Option<&Value>)> {
        match self {
            Value::Pair { car, cdr } => Some((car.as_deref(), cdr.as_deref())),
            _ => None,
        }
    }
}

/// Canonical textual rendering of a value, per the serializer spec.
///
/// This is a free function (not `Display`) because some shapes — a `Pair`
/// with an absent `car` but present `cdr` — are a [`SchemeError::Runtime`],
/// and `Display` has no room to report that.
pub fn serialize(value: &Value) -> SchemeResult<String> {
    match value {
        Value::Integer(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("#t".to_string()),
        Value::Bool(false) => Ok("#f".to_string()),
        Value::Sym(name) => Ok(serialize_symbol(name)?.into_owned()),
        Value::Pair { car, cdr } => serialize_pair(car.as_deref(), cdr.as_deref()),
        Value::CloseMarker => Ok(")".to_string()),
    }
}

/// Render an unevaluated built-in name the way it would print if it reached
/// the serializer as a bare operator — the "partial application" quirk.
fn serialize_symbol(name: &str) -> SchemeResult<Cow<'static, str>> {
    let rendered = match name {
        "=" | ">" | "<" | ">=" | "<=" | "and" => "#t",
        "or" => "#f",
        "+" => "0",
        "*" => "1",
        "/" | "-" | "min" | "max" | "abs" => {
            return Err(SchemeError::runtime(format!(
                "'{}' cannot be serialized without arguments",
                name
            )));
        }
        other => return Ok(Cow::Owned(other.to_string())),
    };
    Ok(Cow::Borrowed(rendered))
}

fn serialize_pair(car: Option<&Value>, cdr: Option<&Value>) -> SchemeResult<String> {
    match (car, cdr) {
        (None, None) => Ok("()".to_string()),
        (None, Some(_)) => Err(SchemeError::runtime(
            "pair with absent car and present cdr cannot be serialized",
        )),
        (Some(car), Some(cdr)) if !car.is_pair() && !cdr.is_pair() => {
            Ok(format!("{} . {}", serialize(car)?, serialize(cdr)?))
        }
        (Some(car), cdr) => {
            let mut out = String::new();
            out.push_str(&serialize(car)?);
            let mut rest = cdr;
            loop {
                match rest {
                    None => break,
                    Some(node) if node.is_pair() => {
                        let (next_car, next_cdr) = node.pair_parts().unwrap();
                        match next_car {
                            None if next_cdr.is_none() => break,
                            None => {
                                return Err(SchemeError::runtime(
                                    "pair with absent car and present cdr cannot be serialized",
                                ));
                            }
                            Some(next_car) => {
                                out.push(' ');
                                out.push_str(&serialize(next_car)?);
                            }
                        }
                        rest = next_cdr;
                    }
                    Some(atom) => {
                        out.push_str(" . ");
                        out.push_str(&serialize(atom)?);
                        break;
                    }
                }
            }
            Ok(out)
        }
    }
}

impl ptree::TreeItem for Value {
    type Child = Value;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            Value::Pair { .. } if self.is_nil() => write!(f, "()"),
            Value::Pair { .. } => write!(f, "pair"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Sym(name) => write!(f, "{}", name),
            Value::CloseMarker => write!(f, ")"),
        }
    }

    fn children(&self) -> Cow<[Value]> {
        match self.pair_parts() {
            Some((car, cdr)) => {
                let mut kids = Vec::with_capacity(2);
                if let Some(car) = car {
                    kids.push(car.clone());
                }
                if let Some(cdr) = cdr {
                    kids.push(cdr.clone());
                }
                Cow::Owned(kids)
            }
            None => Cow::Borrowed(&[]),
        }
    }
}

impl Value {
    /// Debug helper (not part of the spec) that pretty-prints the cons-cell
    /// structure, grounded in the toolkit's own `ASTNode::print`.
    pub fn print_tree(&self) -> std::io::Result<()> {
        ptree::print_tree(self)
    }
}
