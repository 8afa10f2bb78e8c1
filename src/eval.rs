use crate::builtins;
use crate::error::{SchemeError, SchemeResult};
use crate::value::Value;

impl Value {
    /// Structural, environment-free evaluation: atoms and `Nil` evaluate to
    /// a copy of themselves; a `Pair` is dispatched as an application headed
    /// by its `car`. See the built-in table in [`crate::builtins`].
    pub fn eval(&self) -> SchemeResult<Value> {
        match self {
            Value::Integer(_) | Value::Bool(_) | Value::Sym(_) => Ok(self.clone()),
            Value::CloseMarker => Ok(self.clone()),
            Value::Pair { .. } if self.is_nil() => Ok(self.clone()),
            Value::Pair { car, cdr } => eval_pair(car.as_deref(), cdr.as_deref()),
        }
    }
}

fn eval_pair(car: Option<&Value>, cdr: Option<&Value>) -> SchemeResult<Value> {
    let car = car.ok_or_else(|| SchemeError::runtime("cannot evaluate a pair with no car"))?;

    // This dialect has no computed operators: an application whose head
    // position is itself a pair is left untouched, not recursed into.
    if car.is_pair() {
        return Ok(car.clone());
    }

    let f = car.eval()?;

    // An application form in the argument spine is reduced before dispatch,
    // regardless of whether its head names a recognized built-in.
    let cdr = match cdr {
        Some(value)
            if matches!(value.pair_parts(), Some((Some(c), _)) if matches!(c, Value::Sym(_))) =>
        {
            Some(value.eval()?)
        }
        Some(value) => Some(value.clone()),
        None => None,
    };

    match &f {
        Value::Integer(_) | Value::Bool(_) => {
            if cdr.is_some() {
                return Err(SchemeError::runtime(
                    "a constant cannot be applied to arguments",
                ));
            }
            Ok(f)
        }
        Value::Sym(name) => dispatch(name, car, cdr.as_ref()),
        _ => Err(SchemeError::runtime("head of an application evaluated to an unexpected value")),
    }
}

fn dispatch(name: &str, car: &Value, cdr: Option<&Value>) -> SchemeResult<Value> {
    if name == "quote" {
        let cdr = cdr.ok_or_else(|| SchemeError::runtime("'quote' requires a form"))?;
        if let Some((Some(inner), None)) = cdr.pair_parts() {
            if inner.is_pair() {
                return Ok(inner.clone());
            }
        }
        return Ok(cdr.clone());
    }

    if let Some(result) = builtins::apply(name, cdr) {
        return result;
    }

    match cdr {
        None => Ok(Value::cons_nil_tail(car.clone())),
        Some(_) => Err(SchemeError::runtime(format!("unknown procedure '{}'", name))),
    }
}
