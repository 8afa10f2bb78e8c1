use crate::value::Value;

fn eval_ok(v: Value) -> Value {
    v.eval().unwrap_or_else(|e| panic!("eval failed: {}", e))
}

#[test]
fn atoms_are_self_evaluating() {
    assert_eq!(eval_ok(Value::Integer(5)), Value::Integer(5));
    assert_eq!(eval_ok(Value::Bool(true)), Value::Bool(true));
    assert_eq!(eval_ok(Value::sym("x")), Value::sym("x"));
    assert_eq!(eval_ok(Value::nil()), Value::nil());
}

#[test]
fn quote_returns_its_single_argument_unevaluated() {
    let quoted = Value::cons(Value::sym("quote"), Value::cons_nil_tail(Value::sym("x")));
    assert_eq!(eval_ok(quoted), Value::sym("x"));
}

#[test]
fn quote_of_a_list_does_not_evaluate_it() {
    let inner = Value::cons(Value::sym("+"), Value::cons_nil_tail(Value::Integer(1)));
    let quoted = Value::cons(Value::sym("quote"), Value::cons_nil_tail(inner.clone()));
    assert_eq!(eval_ok(quoted), inner);
}

#[test]
fn application_with_no_cdr_yields_a_one_element_list_for_unknown_names() {
    // Per the dialect's "partial application" rendering: a bare, argument-less
    // head that isn't a built-in name still parses and evaluates, producing
    // a one-element list around the head symbol.
    let form = Value::cons_nil_tail(Value::sym("foo"));
    assert_eq!(eval_ok(form), Value::cons_nil_tail(Value::sym("foo")));
}

#[test]
fn unknown_procedure_with_arguments_is_a_runtime_error() {
    let form = Value::cons(Value::sym("foo"), Value::cons_nil_tail(Value::Integer(1)));
    assert!(form.eval().unwrap_err().is_runtime());
}

#[test]
fn pair_in_head_position_is_returned_unevaluated() {
    let head = Value::cons(Value::Integer(1), Value::Integer(2));
    let form = Value::cons_nil_tail(head.clone());
    assert_eq!(eval_ok(form), head);
}

#[test]
fn nested_builtin_call_in_first_argument_position_is_left_raw() {
    // `ArgsToVector` only descends into a nested call from the second
    // collected argument onward; the first slot is always pushed as-is.
    let inner = Value::cons(Value::sym("+"), Value::cons_nil_tail(Value::Integer(2)));
    let form = Value::cons(Value::sym("car"), Value::cons_nil_tail(inner.clone()));
    assert_eq!(eval_ok(form), inner);
}

#[test]
fn nested_builtin_call_in_second_argument_position_is_reduced() {
    let inner = Value::cons(
        Value::sym("+"),
        Value::cons(Value::Integer(2), Value::cons_nil_tail(Value::Integer(3))),
    );
    let form = Value::cons(
        Value::sym("cons"),
        Value::cons(Value::Integer(1), Value::cons_nil_tail(inner)),
    );
    assert_eq!(eval_ok(form), Value::cons(Value::Integer(1), Value::Integer(5)));
}

#[test]
fn integer_and_bool_heads_with_no_cdr_evaluate_to_themselves() {
    let form = Value::cons_nil_tail(Value::Integer(7));
    assert_eq!(eval_ok(form), Value::Integer(7));
}

#[test]
fn integer_head_applied_to_arguments_is_a_runtime_error() {
    let form = Value::cons(Value::Integer(7), Value::cons_nil_tail(Value::Integer(1)));
    assert!(form.eval().unwrap_err().is_runtime());
}

#[test]
fn pair_with_absent_car_is_a_runtime_error() {
    let degenerate = Value::Pair {
        car: None,
        cdr: Some(Box::new(Value::Integer(1))),
    };
    assert!(degenerate.eval().unwrap_err().is_runtime());
}
