//! Built-in functions registered in the root environment at evaluator
//! construction: `len`, `first`, `last`, `rest`, `push`.

use super::environment::Environment;
use super::object::{BuiltinFn, Object};

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", builtin_len),
    ("first", builtin_first),
    ("last", builtin_last),
    ("rest", builtin_rest),
    ("push", builtin_push),
];

/// Binds every builtin into `env` (expected to be the interpreter's root scope).
pub fn register(env: &Environment) {
    for (name, func) in BUILTINS {
        env.set(name, Object::Builtin(*func));
    }
}

fn wrong_arity(got: usize, want: usize) -> Object {
    Object::Error(format!("wrong number of arguments. got={got}, want={want}"))
}

fn builtin_len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.kind_name()
        )),
    }
}

fn builtin_first(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn builtin_last(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn builtin_rest(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) if elements.is_empty() => Object::Null,
        Object::Array(elements) => Object::Array(elements[1..].to_vec()),
        other => Object::Error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn builtin_push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return wrong_arity(args.len(), 2);
    }
    match &args[0] {
        Object::Array(elements) => {
            let mut copy = elements.clone();
            copy.push(args[1].clone());
            Object::Array(copy)
        }
        other => Object::Error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_reports_string_byte_length() {
        let result = builtin_len(&[Object::String("hello".to_string())]);
        assert!(matches!(result, Object::Integer(5)));
    }

    #[test]
    fn len_reports_array_element_count() {
        let result = builtin_len(&[Object::Array(vec![Object::Integer(1), Object::Integer(2)])]);
        assert!(matches!(result, Object::Integer(2)));
    }

    #[test]
    fn len_rejects_unsupported_type() {
        let result = builtin_len(&[Object::Integer(1)]);
        match result {
            Object::Error(msg) => assert_eq!(msg, "argument to `len` not supported, got INTEGER"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn len_rejects_wrong_arity() {
        let result = builtin_len(&[]);
        match result {
            Object::Error(msg) => assert_eq!(msg, "wrong number of arguments. got=0, want=1"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn push_returns_fresh_array_leaving_original_untouched() {
        let original = vec![Object::Integer(1), Object::Integer(2)];
        let result = builtin_push(&[Object::Array(original.clone()), Object::Integer(3)]);
        match result {
            Object::Array(elements) => {
                assert_eq!(elements.len(), 3);
                assert!(matches!(elements[2], Object::Integer(3)));
            }
            other => panic!("expected array, got {other:?}"),
        }
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn rest_on_empty_array_is_null() {
        assert!(matches!(builtin_rest(&[Object::Array(vec![])]), Object::Null));
    }

    #[test]
    fn first_and_last_on_empty_array_are_null() {
        assert!(matches!(builtin_first(&[Object::Array(vec![])]), Object::Null));
        assert!(matches!(builtin_last(&[Object::Array(vec![])]), Object::Null));
    }
}
