//! Shorthand constructors for tests.

use crate::{InputControl, InputKind, TemporalValue};

pub fn date(year: u32, month: u8, day: u8) -> TemporalValue {
    TemporalValue::from_ymd(year, month, day).expect("test date should be valid")
}

pub fn month(year: u32, month: u8) -> TemporalValue {
    TemporalValue::from_ym(year, month).expect("test month should be valid")
}

pub fn week(year: u32, week: u8) -> TemporalValue {
    TemporalValue::from_yw(year, week).expect("test week should be valid")
}

/// A control built from `(attribute, value)` pairs, like markup would declare it
pub fn control(kind: InputKind, attributes: &[(&str, &str)]) -> InputControl {
    attributes
        .iter()
        .fold(InputControl::new(kind), |control, &(name, value)| match name {
            "min" => control.with_min(value),
            "max" => control.with_max(value),
            "step" => control.with_step(value),
            "value" => control.with_value(value),
            other => panic!("unsupported test attribute {other}"),
        })
}
