#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_define_lookup() {
    let mut env = Environment::new();
    env.define("x", Value::number(42));
    assert_eq!(env.lookup("x"), Some(Value::number(42)));
    assert_eq!(env.lookup("y"), None);
}

#[test]
fn test_redeclare_overwrites() {
    let mut env = Environment::new();
    env.define("x", Value::number(1));
    env.define("x", Value::Boolean(true));
    assert_eq!(env.lookup("x"), Some(Value::Boolean(true)));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_assign_creates_missing_binding() {
    let mut env = Environment::new();
    assert_eq!(env.get("t"), None);
    env.assign("t", Value::number(3));
    assert_eq!(env.lookup("t"), Some(Value::number(3)));
}

#[test]
fn test_lookup_aliases_arrays() {
    let mut env = Environment::new();
    env.define("a", Value::array(vec![Value::number(1)]));
    let alias = env.lookup("a").unwrap();
    alias.as_array().unwrap().set(0, Value::number(7));
    assert_eq!(env.get("a").unwrap().snapshot(), Snapshot::from(vec![7.0]));
}

#[test]
fn test_snapshot_sorted_and_detached() {
    let mut env = Environment::new();
    env.define("b", Value::number(2));
    env.define("a", Value::array(vec![Value::number(1)]));

    let snapshot = env.snapshot();
    env.get("a").unwrap().as_array().unwrap().set(0, Value::number(9));

    let names: Vec<_> = snapshot.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(snapshot["a"], Snapshot::from(vec![1.0]));
}
