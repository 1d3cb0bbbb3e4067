use super::*;

#[test]
fn unit_value() {
    let unit = Value::unit();

    assert!(unit.is_unit());
    assert!(Value::default().is_unit());
    assert_eq!(unit.type_name(), "()");
    assert_eq!(format!("{unit:?}"), "Value(())");
}

#[test]
fn typed_value() {
    let value = Value::new(42i64);

    assert!(!value.is_unit());
    assert!(value.is::<i64>());
    assert!(!value.is::<i32>());
    assert_eq!(value.downcast_ref::<i64>(), Some(&42));
    assert_eq!(value.get::<i64>(), Some(42));
    assert_eq!(value.get::<String>(), None);
    assert_eq!(format!("{value:?}"), "Value(<i64>)");
}

#[test]
fn clones_share_the_payload() {
    let value = Value::new(String::from("shared"));
    let clone = value.clone();

    let a = value.downcast_ref::<String>().unwrap();
    let b = clone.downcast_ref::<String>().unwrap();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn semantic_values_checked_access() {
    let input = "abc";
    let sv = SemanticValues::new(
        input,
        "Rule",
        0,
        0..3,
        vec![1..2],
        vec![Value::new(7i64)],
    );

    assert_eq!(sv.rule(), "Rule");
    assert_eq!(sv.text(), "abc");
    assert_eq!(sv.token(), "b");
    assert_eq!(sv.get::<i64>(0).unwrap(), 7);
    assert_eq!(
        sv.get::<u8>(0).unwrap_err().to_string(),
        "value at index 0 is `i64`, expected `u8`"
    );
    assert_eq!(
        sv.get::<i64>(2).unwrap_err().to_string(),
        "missing value at index 2 (1 available)"
    );
}

#[test]
fn token_defaults_to_whole_match() {
    let sv = SemanticValues::new("x 12 y", "Num", 1, 2..4, Vec::new(), Vec::new());

    assert_eq!(sv.token(), "12");
    assert_eq!(sv.parse_token::<u32>().unwrap(), 12);
    assert_eq!(sv.choice(), 1);
    assert!(sv.is_empty());
}

#[test]
fn parse_token_failure_is_an_action_error() {
    let sv = SemanticValues::new("zz", "Num", 0, 0..2, Vec::new(), Vec::new());

    let err = sv.parse_token::<u32>().unwrap_err();

    assert_eq!(err.to_string(), "invalid token `zz`: invalid digit found in string");
}
