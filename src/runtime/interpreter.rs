//! Tree-walking evaluator: dispatches on AST node variant, implements
//! Monkey's semantics, closure construction, and builtin invocation.

use std::rc::Rc;

use super::builtins;
use super::environment::Environment;
use super::object::{HashObj, Object};
use crate::frontend::ast::{BlockStatement, Expression, Program, Statement};

/// A fresh root environment with every builtin already bound, the way the
/// spec requires builtins to be "registered in the root environment at
/// evaluator construction".
pub fn new_root_environment() -> Environment {
    let env = Environment::new_root();
    builtins::register(&env);
    env
}

/// Evaluate a complete program against `env`. `env` is expected to persist
/// across sequential calls (REPL lines, or a script followed by a REPL
/// session sharing the same scope).
pub fn eval(program: &Program, env: &Environment) -> Object {
    tracing::debug!(
        statements = program.statements.len(),
        "evaluating top-level statements"
    );
    eval_statements(&program.statements, env, true)
}

/// Shared loop for `Program` and `BlockStatement`. `unwrap_return` is `true`
/// only at the program level: a `Block` must propagate a `ReturnValue`
/// marker upward unchanged so the enclosing function call unwraps it exactly
/// once (see `apply_function`).
fn eval_statements(statements: &[Statement], env: &Environment, unwrap_return: bool) -> Object {
    let mut result = Object::Null;
    for statement in statements {
        result = eval_statement(statement, env);
        match &result {
            Object::ReturnValue(inner) if unwrap_return => return (**inner).clone(),
            Object::ReturnValue(_) | Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block_statement(block: &BlockStatement, env: &Environment) -> Object {
    eval_statements(&block.statements, env, false)
}

fn eval_statement(statement: &Statement, env: &Environment) -> Object {
    match statement {
        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.set(&name.name, value);
            Object::Null
        }
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Expression { expression, .. } => eval_expression(expression, env),
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Object {
    match expression {
        Expression::Identifier(ident) => env
            .get(&ident.name)
            .unwrap_or_else(|| Object::Error(format!("identifier not found: {}", ident.name))),
        Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
        Expression::BooleanLiteral { value, .. } => Object::Boolean(*value),
        Expression::StringLiteral { value, .. } => Object::String(value.clone()),
        Expression::Prefix { op, right, .. } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(op, right)
        }
        Expression::Infix {
            left, op, right, ..
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(op, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if_expression(condition, consequence, alternative.as_deref(), env),
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Object::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        },
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }
            let args = match eval_expression_list(arguments, env) {
                Ok(args) => args,
                Err(err) => return err,
            };
            apply_function(function, args)
        }
        Expression::ArrayLiteral { elements, .. } => match eval_expression_list(elements, env) {
            Ok(elements) => Object::Array(elements),
            Err(err) => err,
        },
        Expression::Index { left, index, .. } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env),
        Expression::Missing => Object::Error("missing expression".to_string()),
    }
}

/// Evaluates `exprs` left-to-right, discarding earlier successes and
/// returning immediately on the first error.
fn eval_expression_list(
    exprs: &[Expression],
    env: &Environment,
) -> Result<Vec<Object>, Object> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn eval_prefix_expression(op: &str, right: Object) -> Object {
    match op {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            other => Object::Error(format!("unknown operator: -{}", other.kind_name())),
        },
        _ => Object::Error(format!("unknown operator: {op}{}", right.kind_name())),
    }
}

fn eval_infix_expression(op: &str, left: Object, right: Object) -> Object {
    match op {
        "==" => eval_equality(left, right, true),
        "!=" => eval_equality(left, right, false),
        _ => match (&left, &right) {
            (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(op, *l, *r),
            (Object::String(l), Object::String(r)) => {
                if op == "+" {
                    Object::String(format!("{l}{r}"))
                } else {
                    Object::Error(format!("unknown operator: STRING {op} STRING"))
                }
            }
            _ if left.kind_name() != right.kind_name() => Object::Error(format!(
                "type mismatch: {} {op} {}",
                left.kind_name(),
                right.kind_name()
            )),
            _ => Object::Error(format!(
                "unknown operator: {} {op} {}",
                left.kind_name(),
                right.kind_name()
            )),
        },
    }
}

fn eval_equality(left: Object, right: Object, want_eq: bool) -> Object {
    let op = if want_eq { "==" } else { "!=" };
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => Object::Boolean((l == r) == want_eq),
        (Object::Boolean(l), Object::Boolean(r)) => Object::Boolean((l == r) == want_eq),
        (Object::Null, Object::Null) => Object::Boolean(want_eq),
        _ if left.kind_name() != right.kind_name() => Object::Error(format!(
            "type mismatch: {} {op} {}",
            left.kind_name(),
            right.kind_name()
        )),
        _ => Object::Error(format!(
            "unknown operator: {} {op} {}",
            left.kind_name(),
            right.kind_name()
        )),
    }
}

/// Truncating: wraps on overflow rather than panicking.
fn eval_integer_infix(op: &str, left: i64, right: i64) -> Object {
    match op {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        _ => Object::Error(format!("unknown operator: INTEGER {op} INTEGER")),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &Rc<BlockStatement>,
    alternative: Option<&BlockStatement>,
    env: &Environment,
) -> Object {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block_statement(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block_statement(alternative, env)
    } else {
        Object::Null
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Object::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Object::Hash(hash), key) => match key.hash_key() {
            Some(hash_key) => hash.get(&hash_key).cloned().unwrap_or(Object::Null),
            None => Object::Error(format!("unusable as hash key: {}", key.kind_name())),
        },
        _ => Object::Error(format!(
            "index operator not supported: {}",
            left.kind_name()
        )),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Environment) -> Object {
    let mut hash = HashObj::new();
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        match key.hash_key() {
            Some(hash_key) => hash.insert(hash_key, key, value),
            None => return Object::Error(format!("unusable as hash key: {}", key.kind_name())),
        }
    }
    Object::Hash(hash)
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function {
            parameters,
            body,
            env,
        } => {
            if args.len() != parameters.len() {
                return Object::Error(format!(
                    "wrong number of arguments: expected {}, got {}",
                    parameters.len(),
                    args.len()
                ));
            }
            let call_env = Environment::new_enclosed(&env);
            for (param, arg) in parameters.iter().zip(args) {
                call_env.set(&param.name, arg);
            }
            match eval_block_statement(&body, &call_env) {
                Object::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        Object::Builtin(func) => func(&args),
        other => Object::Error(format!("not a function: {}", other.kind_name())),
    }
}
