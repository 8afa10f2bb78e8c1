use crate::error::{SchemeError, SchemeResult};
use crate::token::Token;
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// A freshly read form, still distinguishing a literal, immediately-closed
/// `()` from any other value — including one that happens to reduce to the
/// same `Pair { car: None, cdr: None }` shape through further nesting. Only
/// an element written directly as `()` collapses to an absent slot when
/// it's consed into an enclosing list; see [`build_list`].
enum RawForm {
    Bare,
    Value(Value),
}

impl RawForm {
    fn into_value(self) -> Value {
        match self {
            RawForm::Bare => Value::nil(),
            RawForm::Value(v) => v,
        }
    }

    fn is_close_marker(&self) -> bool {
        matches!(self, RawForm::Value(Value::CloseMarker))
    }

    fn as_sym(&self) -> Option<&str> {
        match self {
            RawForm::Value(v) => v.as_sym(),
            RawForm::Bare => None,
        }
    }
}

/// Consume the entire token stream and return the single top-level form.
///
/// Trailing, unconsumed tokens are a syntax error — this is the "outer"
/// reader; [`read_form`] is the recursive "inner" reader it and
/// [`read_list`] both call.
pub fn parse(tokenizer: &mut Tokenizer) -> SchemeResult<Value> {
    if tokenizer.is_end() {
        return Err(SchemeError::syntax("unexpected end of input"));
    }
    let value = read_form(tokenizer)?;
    if !tokenizer.is_end() {
        return Err(SchemeError::syntax("unexpected trailing input"));
    }
    Ok(value)
}

/// Read one form and advance past it, collapsing a bare `()` to `Nil`. May
/// return [`Value::CloseMarker`] — a bare `)` token turned into a sentinel —
/// which only [`read_list`] and the top-level caller are expected to
/// recognize.
fn read_form(tokenizer: &mut Tokenizer) -> SchemeResult<Value> {
    Ok(read_form_raw(tokenizer)?.into_value())
}

fn read_form_raw(tokenizer: &mut Tokenizer) -> SchemeResult<RawForm> {
    if tokenizer.is_end() {
        return Err(SchemeError::syntax("unexpected end of input"));
    }
    let token = tokenizer.token().clone();
    tokenizer.advance()?;
    let form = match token {
        Token::OpenParen => return read_list(tokenizer),
        Token::CloseParen => RawForm::Value(Value::CloseMarker),
        Token::BoolTrue => RawForm::Value(Value::Bool(true)),
        Token::BoolFalse => RawForm::Value(Value::Bool(false)),
        Token::Quote => {
            if tokenizer.is_end() {
                return Err(SchemeError::syntax("quote at end of input"));
            }
            // The preprocessor already desugars a *leading* `'`; a `Quote`
            // token reached here is always mid-expression, and per the
            // dialect's documented quirk it yields a bare `quote` symbol
            // with no form attached.
            RawForm::Value(Value::sym("quote"))
        }
        Token::Integer(n) => RawForm::Value(Value::Integer(n)),
        Token::Sym(name) => RawForm::Value(Value::sym(name)),
        Token::Dot => RawForm::Value(Value::sym(".")),
    };
    Ok(form)
}

/// Build a proper (or dotted) list, having already consumed the opening `(`.
///
/// Returns [`RawForm::Bare`] when nothing separates the parentheses. That
/// only matters to the caller one level up: a bare element occupies an
/// absent slot once consed in, rather than a cons'd-in `Nil` value — see
/// [`build_list`].
fn read_list(tokenizer: &mut Tokenizer) -> SchemeResult<RawForm> {
    let first = read_form_raw(tokenizer)?;
    if first.is_close_marker() {
        return Ok(RawForm::Bare);
    }
    if first.as_sym() == Some(".") {
        return Err(SchemeError::syntax("list cannot start with '.'"));
    }

    let mut elems = vec![first];
    let mut dotted_tail: Option<RawForm> = None;
    let mut next = read_form_raw(tokenizer)?;

    loop {
        if next.is_close_marker() {
            break;
        }
        if next.as_sym() == Some(".") {
            let tail = read_form_raw(tokenizer)?;
            if tail.is_close_marker() {
                return Err(SchemeError::syntax("missing value after '.'"));
            }
            let closer = read_form_raw(tokenizer)?;
            if !closer.is_close_marker() {
                return Err(SchemeError::syntax(
                    "expected ')' after dotted pair's tail",
                ));
            }
            dotted_tail = Some(tail);
            break;
        }
        elems.push(next);
        next = read_form_raw(tokenizer)?;
    }

    Ok(RawForm::Value(build_list(elems, dotted_tail)))
}

/// Fold a flat run of elements, plus an optional dotted tail, into nested
/// `Pair`s from the right — the functional equivalent of the original
/// reader's in-place tail-pointer append, adapted to owned `Value`s. A
/// [`RawForm::Bare`] element or tail leaves its slot absent (`None`)
/// instead of holding a cons'd-in `Nil`, matching how a directly-written
/// `()` behaves as a list element in the reference reader.
fn build_list(elems: Vec<RawForm>, dotted_tail: Option<RawForm>) -> Value {
    let mut cdr = dotted_tail.and_then(raw_slot);
    for elem in elems.into_iter().rev() {
        let car = raw_slot(elem);
        cdr = Some(Box::new(Value::Pair { car, cdr }));
    }
    cdr.map(|b| *b).unwrap_or_else(Value::nil)
}

fn raw_slot(form: RawForm) -> Option<Box<Value>> {
    match form {
        RawForm::Bare => None,
        RawForm::Value(v) => Some(Box::new(v)),
    }
}
