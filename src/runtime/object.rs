//! Runtime value variants and their hash-key derivation.
//!
//! `ReturnValue` and `Error` are in-flight control-flow markers: the
//! evaluator is responsible for never letting them leak into an `Array`,
//! `Hash`, builtin argument, or any other position user code can observe
//! (see `runtime::interpreter`).

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::environment::Environment;
use super::fnv::fnv1a;
use crate::frontend::ast::{BlockStatement, Identifier};

pub type BuiltinFn = fn(&[Object]) -> Object;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub enum HashKeyTag {
    Integer,
    Boolean,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub struct HashKey {
    pub tag: HashKeyTag,
    pub value: u64,
}

/// An insertion-ordered map keyed by `HashKey`: a parallel vector of keys
/// alongside a `HashMap` for lookup, so iteration order matches insertion
/// order while lookups stay O(1).
#[derive(Debug, Clone, Default)]
pub struct HashObj {
    order: Vec<HashKey>,
    entries: HashMap<HashKey, (Object, Object)>,
}

impl HashObj {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: HashKey, key_obj: Object, value: Object) {
        if !self.entries.contains_key(&key) {
            self.order.push(key);
        }
        self.entries.insert(key, (key_obj, value));
    }

    pub fn get(&self, key: &HashKey) -> Option<&Object> {
        self.entries.get(key).map(|(_, v)| v)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&Object, &Object)> {
        self.order
            .iter()
            .map(move |k| self.entries.get(k).map(|(key, value)| (key, value)))
            .map(|pair| pair.expect("order and entries stay in sync"))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl PartialEq for HashObj {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Object>),
    Hash(HashObj),
    Function {
        parameters: Rc<Vec<Identifier>>,
        body: Rc<BlockStatement>,
        env: Environment,
    },
    Builtin(BuiltinFn),
    ReturnValue(Box<Object>),
    Error(String),
}

impl Object {
    /// The uppercase tag used in error messages and `inspect`'s fallback.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function { .. } => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    /// `false` and `null` are falsy; everything else, including `0`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// `None` for object kinds that cannot be used as a hash key.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(v) => Some(HashKey {
                tag: HashKeyTag::Integer,
                value: *v as u64,
            }),
            Object::Boolean(v) => Some(HashKey {
                tag: HashKeyTag::Boolean,
                value: u64::from(*v),
            }),
            Object::String(s) => Some(HashKey {
                tag: HashKeyTag::String,
                value: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(v) => v.to_string(),
            Object::Boolean(v) => v.to_string(),
            Object::Null => "null".to_string(),
            Object::String(s) => s.clone(),
            Object::Array(elements) => {
                let items = elements
                    .iter()
                    .map(Object::inspect)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{items}]")
            }
            Object::Hash(hash) => {
                let items = hash
                    .pairs()
                    .map(|(k, v)| format!("{}: {}", k.inspect(), v.inspect()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{items}}}")
            }
            Object::Function {
                parameters, body, ..
            } => {
                let params = parameters
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({params}) {{\n{body}\n}}")
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(msg) => format!("ERROR: {msg}"),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_hash_keys_match_iff_bytes_match() {
        let a = Object::String("hello".to_string()).hash_key().unwrap();
        let b = Object::String("hello".to_string()).hash_key().unwrap();
        let c = Object::String("world".to_string()).hash_key().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn boolean_hash_keys_are_stable() {
        assert_eq!(
            Object::Boolean(true).hash_key(),
            Object::Boolean(true).hash_key()
        );
        assert_ne!(
            Object::Boolean(true).hash_key(),
            Object::Boolean(false).hash_key()
        );
    }

    #[test]
    fn arrays_are_not_hashable() {
        assert!(Object::Array(vec![]).hash_key().is_none());
    }

    #[test]
    fn truthiness_matches_spec() {
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::Integer(0).is_truthy());
    }

    #[test]
    fn hash_obj_preserves_insertion_order() {
        let mut hash = HashObj::new();
        let one = Object::String("one".to_string());
        let two = Object::String("two".to_string());
        hash.insert(one.hash_key().unwrap(), one.clone(), Object::Integer(1));
        hash.insert(two.hash_key().unwrap(), two.clone(), Object::Integer(2));
        let keys: Vec<String> = hash.pairs().map(|(k, _)| k.inspect()).collect();
        assert_eq!(keys, vec!["one", "two"]);
    }
}
