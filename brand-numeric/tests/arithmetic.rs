//! Arithmetic through the dispatch context.

use std::fs;

use brand_dispatch::{DispatchConfig, DispatchError, ResolutionPolicy};
use brand_numeric::{read_config, ArithmeticError, Calculator, EvalError, IntWidth, Numeric, NEG};
use pretty_assertions::assert_eq;

fn calc() -> Calculator {
    Calculator::new().unwrap()
}

#[test]
fn test_same_width_wraps() {
    let calc = calc();
    assert_eq!(calc.eval_str("add", &["100:i8", "100:i8"]).unwrap(), "-56:i8");
    assert_eq!(calc.eval_str("add", &["200:u8", "100:u8"]).unwrap(), "44:u8");
    assert_eq!(calc.eval_str("sub", &["0:u16", "1:u16"]).unwrap(), "65535:u16");
    assert_eq!(
        calc.eval_str("mul", &["4294967295:u32", "2:u32"]).unwrap(),
        "4294967294:u32"
    );
    assert_eq!(calc.eval_str("div", &["-7:i64", "2:i64"]).unwrap(), "-3:i64");
}

#[test]
fn test_result_keeps_brand() {
    let calc = calc();
    let t = calc.taxonomy();
    let result = calc
        .eval("add", &[t.integer(IntWidth::I32, 1), t.integer(IntWidth::I32, 2)])
        .unwrap();
    assert!(result.carries(t.width(IntWidth::I32)));
    assert!(result.has(&t.signed));
    assert_eq!(result.state(), &Numeric::Integer(3));
}

#[test]
fn test_integer_division_by_zero() {
    let calc = calc();
    assert_eq!(
        calc.eval_str("div", &["1:i8", "0:i8"]),
        Err(EvalError::Arithmetic(ArithmeticError::DivisionByZero))
    );
    assert_eq!(calc.eval_str("div", &["1.0:f64", "0:f64"]).unwrap(), "inf:f64");
}

#[test]
fn test_mixed_promotes_to_float() {
    let calc = calc();
    assert_eq!(calc.eval_str("add", &["1:i8", "0.5:f64"]).unwrap(), "1.5:f64");
    assert_eq!(calc.eval_str("sub", &["0.5:f64", "2:u64"]).unwrap(), "-1.5:f64");
    assert_eq!(calc.eval_str("mul", &["1.5:f64", "2.0:f64"]).unwrap(), "3.0:f64");
}

#[test]
fn test_mixed_widths_have_no_method() {
    let calc = calc();
    match calc.eval_str("add", &["1:i8", "1:i16"]) {
        Err(EvalError::Dispatch(DispatchError::NoMethodMatched(e))) => {
            assert_eq!(e.operation, "add");
            assert_eq!(e.considered, 11);
        }
        other => panic!("Expected NoMethodMatched, got {:?}", other),
    }
}

#[test]
fn test_negation() {
    let calc = calc();
    assert_eq!(calc.eval_str(NEG, &["5:i16"]).unwrap(), "-5:i16");
    assert_eq!(calc.eval_str(NEG, &["-128:i8"]).unwrap(), "-128:i8");
    assert_eq!(calc.eval_str(NEG, &["2.5:f64"]).unwrap(), "-2.5:f64");
    assert!(matches!(
        calc.eval_str(NEG, &["5:u8"]),
        Err(EvalError::Dispatch(DispatchError::NoMethodMatched(_)))
    ));
}

#[test]
fn test_unknown_operation_and_bad_literal() {
    let calc = calc();
    assert!(matches!(
        calc.eval_str("pow", &["2:i8", "3:i8"]),
        Err(EvalError::Dispatch(DispatchError::UnknownOperation { .. }))
    ));
    assert!(matches!(
        calc.eval_str("add", &["300:i8", "1:i8"]),
        Err(EvalError::Literal(_))
    ));
}

#[test]
fn test_wrong_arity_has_no_method() {
    let calc = calc();
    assert!(matches!(
        calc.eval_str("add", &["1:i8"]),
        Err(EvalError::Dispatch(DispatchError::NoMethodMatched(_)))
    ));
}

#[test]
fn test_repeated_calls_share_cache_entry() {
    let calc = calc();
    for _ in 0..3 {
        calc.eval_str("add", &["1:u8", "2:u8"]).unwrap();
    }
    let add = calc.context().get("add").unwrap();
    assert_eq!(add.cached_signatures().len(), 1);
}

#[test]
fn test_config_file_drives_calculator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dispatch.json");
    fs::write(&path, r#"{"policy": "most-specific", "cache": false}"#).unwrap();

    let config = read_config(&path).unwrap();
    assert_eq!(
        config,
        DispatchConfig::new()
            .with_policy(ResolutionPolicy::MostSpecific)
            .with_cache(false)
    );

    let calc = Calculator::with_config(config).unwrap();
    assert_eq!(calc.eval_str("add", &["1:u8", "2:u8"]).unwrap(), "3:u8");
    assert!(calc.context().get("add").unwrap().cached_signatures().is_empty());
}

#[test]
fn test_malformed_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dispatch.json");
    fs::write(&path, r#"{"policy": "loose"}"#).unwrap();

    let err = read_config(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to parse config file"));
}
