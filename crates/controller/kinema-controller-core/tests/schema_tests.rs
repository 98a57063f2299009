use kinema_controller_core::{Config, ControllerError, InputSchema, InputType, InputValue};

fn widths(schema: &InputSchema) -> Vec<usize> {
    schema.inputs().iter().map(|i| i.ty().width()).collect()
}

#[test]
fn offsets_are_cumulative_widths() {
    let mut schema = InputSchema::new(Config::default());
    for _ in 0..4 {
        schema.add_input().unwrap();
    }
    schema.set_input_type(0, InputType::Int);
    schema.set_input_type(2, InputType::Float);

    let widths = widths(&schema);
    let mut expected = 0;
    for (i, input) in schema.inputs().iter().enumerate() {
        assert_eq!(input.offset(), expected, "field {i}");
        expected += widths[i];
    }
    // Int + Bool + Float + Bool
    assert_eq!(schema.total_size(), 4 + 1 + 4 + 1);
}

#[test]
fn recalculation_is_idempotent() {
    let mut schema = InputSchema::new(Config::default());
    for _ in 0..3 {
        schema.add_input().unwrap();
    }
    schema.set_input_type(1, InputType::Float);
    let before: Vec<usize> = schema.inputs().iter().map(|i| i.offset()).collect();
    schema.recalculate_offsets();
    let after: Vec<usize> = schema.inputs().iter().map(|i| i.offset()).collect();
    assert_eq!(before, after);
}

#[test]
fn new_inputs_start_after_existing_fields() {
    let mut schema = InputSchema::new(Config::default());
    let a = schema.add_input().unwrap();
    schema.set_input_type(a, InputType::Int);
    let b = schema.add_input().unwrap();
    assert_eq!(schema.inputs()[b].offset(), 4);
    assert_eq!(schema.inputs()[b].ty(), InputType::Bool);
}

#[test]
fn input_capacity_is_enforced() {
    let mut schema = InputSchema::new(Config::default());
    for _ in 0..64 {
        schema.add_input().unwrap();
    }
    let err = schema.add_input().unwrap_err();
    assert_eq!(
        err,
        ControllerError::CapacityExceeded {
            what: "input",
            cap: 64
        }
    );
    assert_eq!(schema.inputs().len(), 64);
}

#[test]
fn constant_capacity_is_enforced() {
    let config = Config {
        max_constants: 2,
        ..Config::default()
    };
    let mut schema = InputSchema::new(config);
    schema.add_constant().unwrap();
    schema.add_constant().unwrap();
    assert!(matches!(
        schema.add_constant(),
        Err(ControllerError::CapacityExceeded {
            what: "constant",
            ..
        })
    ));
    assert_eq!(schema.constants().len(), 2);
}

#[test]
fn constants_start_as_bool_true() {
    let mut schema = InputSchema::new(Config::default());
    let i = schema.add_constant().unwrap();
    assert_eq!(schema.constants()[i].value(), InputValue::Bool(true));
}

#[test]
fn retagging_a_constant_resets_its_value() {
    let mut schema = InputSchema::new(Config::default());
    let i = schema.add_constant().unwrap();
    schema.set_constant_type(i, InputType::Float);
    assert_eq!(schema.constants()[i].value(), InputValue::Float(0.0));

    schema.set_constant_value(i, InputValue::Float(6.5)).unwrap();
    assert_eq!(schema.constants()[i].value(), InputValue::Float(6.5));

    // Same-type retag keeps the edited value.
    schema.set_constant_type(i, InputType::Float);
    assert_eq!(schema.constants()[i].value(), InputValue::Float(6.5));
}

#[test]
fn mismatched_constant_value_is_declined() {
    let mut schema = InputSchema::new(Config::default());
    let i = schema.add_constant().unwrap();
    assert_eq!(
        schema.set_constant_value(i, InputValue::Int(3)),
        Err(ControllerError::TypeMismatch)
    );
    assert_eq!(schema.constants()[i].value(), InputValue::Bool(true));
}

#[test]
fn overlong_names_are_declined() {
    let mut schema = InputSchema::new(Config::default());
    let i = schema.add_input().unwrap();
    let long = "x".repeat(65);
    assert!(matches!(
        schema.set_input_name(i, &long),
        Err(ControllerError::NameTooLong { len: 65, max: 64 })
    ));
    assert_eq!(schema.inputs()[i].name(), "");
}
