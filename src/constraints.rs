use serde::Serialize;

use crate::{InputKind, STEP_ANY, TemporalValue, prelude::*};

/// The `step` attribute of a date-like control.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StepSpec {
    /// No usable `step`: one unit
    #[default]
    Default,
    /// A positive, finite step in units of the control's kind
    Numeric(f64),
    /// `step="any"`: no stepping and no step mismatch
    Any,
}

impl StepSpec {
    /// Reads a `step` attribute. `"any"` disables stepping; a positive finite number
    /// is kept; anything else (`"invalid"`, `"-7"`, `"0"`) falls back to the default.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(STEP_ANY) {
            return Self::Any;
        }
        // floating-point number syntax: no leading `+`, no whitespace, no `inf`/`NaN`
        let starts_like_number = raw
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_digit() || b == b'-' || b == b'.');
        match raw.parse::<f64>() {
            Ok(step) if starts_like_number && step.is_finite() && step > 0.0 => Self::Numeric(step),
            _ => {
                if !raw.is_empty() {
                    tracing::debug!(step = raw, "ignoring unusable step, using the default");
                }
                Self::Default
            }
        }
    }

    /// Whole units per step, or `None` for `any`.
    ///
    /// Date-like controls only step in whole units, so a fractional step rounds to
    /// the nearest integer and never below one (7.6 steps 8 days, 0.3 steps 1).
    #[allow(clippy::cast_possible_truncation)]
    pub fn step_size(&self) -> Option<i64> {
        match *self {
            Self::Default => Some(1),
            Self::Numeric(step) => Some((step.round() as i64).max(1)),
            Self::Any => None,
        }
    }
}

/// One reason a control's value can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidityFlag {
    #[display(fmt = "rangeUnderflow")]
    RangeUnderflow,
    #[display(fmt = "rangeOverflow")]
    RangeOverflow,
    #[display(fmt = "stepMismatch")]
    StepMismatch,
}

/// The validity state of a value under a set of constraints.
///
/// Flags are independent: a value can underflow and mismatch its step at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityResult {
    pub range_underflow: bool,
    pub range_overflow:  bool,
    pub step_mismatch:   bool,
}

impl ValidityResult {
    /// True when no flag is set
    pub const fn is_valid(&self) -> bool {
        !(self.range_underflow || self.range_overflow || self.step_mismatch)
    }

    /// Whether `flag` is set
    pub const fn has(&self, flag: ValidityFlag) -> bool {
        match flag {
            ValidityFlag::RangeUnderflow => self.range_underflow,
            ValidityFlag::RangeOverflow => self.range_overflow,
            ValidityFlag::StepMismatch => self.step_mismatch,
        }
    }

    /// The single reason to report: underflow, then overflow, then step mismatch.
    pub const fn reason(&self) -> Option<ValidityFlag> {
        if self.range_underflow {
            Some(ValidityFlag::RangeUnderflow)
        } else if self.range_overflow {
            Some(ValidityFlag::RangeOverflow)
        } else if self.step_mismatch {
            Some(ValidityFlag::StepMismatch)
        } else {
            None
        }
    }

    /// Every set flag, in reporting order
    pub fn flags(&self) -> impl Iterator<Item = ValidityFlag> + '_ {
        [
            ValidityFlag::RangeUnderflow,
            ValidityFlag::RangeOverflow,
            ValidityFlag::StepMismatch,
        ]
        .into_iter()
        .filter(|flag| self.has(*flag))
    }
}

/// Error type for stepping a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// `step="any"`: the control has no allowed step.
    #[error("{kind} control has step=\"any\"; there is no allowed step")]
    NoAllowedStep { kind: InputKind },

    /// The stepped value would leave the representable years.
    #[error("stepping {kind} value {from} by {units} units leaves the representable range")]
    OutOfRange {
        kind:  InputKind,
        from:  TemporalValue,
        units: i64,
    },
}

/// The `min`, `max` and `step` constraints of one control.
///
/// Bounds and step base are only ever values of the control's own kind; anything
/// else is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    kind:      InputKind,
    min:       Option<TemporalValue>,
    max:       Option<TemporalValue>,
    step:      StepSpec,
    step_base: Option<TemporalValue>,
}

impl Constraints {
    /// Unconstrained, with the default step
    pub const fn new(kind: InputKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
            step: StepSpec::Default,
            step_base: None,
        }
    }

    /// Builds constraints from raw attribute strings, sanitizing each one.
    pub fn from_attributes(
        kind: InputKind,
        min: Option<&str>,
        max: Option<&str>,
        step: Option<&str>,
    ) -> Self {
        Self::new(kind)
            .with_min(min.and_then(|raw| sanitize_bound(kind, "min", raw)))
            .with_max(max.and_then(|raw| sanitize_bound(kind, "max", raw)))
            .with_step(step.map_or(StepSpec::Default, StepSpec::parse))
    }

    #[must_use]
    pub fn with_min(mut self, min: Option<TemporalValue>) -> Self {
        self.min = self.own_kind(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: Option<TemporalValue>) -> Self {
        self.max = self.own_kind(max);
        self
    }

    #[must_use]
    pub const fn with_step(mut self, step: StepSpec) -> Self {
        self.step = step;
        self
    }

    /// Sets an explicit step base, which takes precedence over `min`
    #[must_use]
    pub fn with_step_base(mut self, base: Option<TemporalValue>) -> Self {
        self.step_base = self.own_kind(base);
        self
    }

    pub const fn kind(&self) -> InputKind {
        self.kind
    }

    pub const fn min(&self) -> Option<TemporalValue> {
        self.min
    }

    pub const fn max(&self) -> Option<TemporalValue> {
        self.max
    }

    pub const fn step(&self) -> StepSpec {
        self.step
    }

    pub const fn step_base(&self) -> Option<TemporalValue> {
        self.step_base
    }

    /// The value steps are measured from: the explicit base, else `min`, else the
    /// kind's zero point.
    pub fn step_basis(&self) -> TemporalValue {
        self.step_base
            .or(self.min)
            .unwrap_or_else(|| TemporalValue::zero_point(self.kind))
    }

    /// Classifies `value`. An absent value is always valid.
    pub fn validate(&self, value: Option<&TemporalValue>) -> ValidityResult {
        let Some(value) = value else {
            return ValidityResult::default();
        };

        let range_underflow = self.min.is_some_and(|min| *value < min);
        let range_overflow = self.max.is_some_and(|max| *value > max);
        let step_mismatch = self.step.step_size().is_some_and(|size| {
            value
                .units_between(&self.step_basis())
                .is_some_and(|units| units.rem_euclid(size) != 0)
        });

        ValidityResult {
            range_underflow,
            range_overflow,
            step_mismatch,
        }
    }

    /// Moves `value` up by `amount` steps, starting from the step basis when there is
    /// no value. The result is not clamped to `min`/`max`.
    ///
    /// # Errors
    /// Returns `StepError::NoAllowedStep` for `step="any"`, and
    /// `StepError::OutOfRange` when the result is unrepresentable.
    pub fn step_up(
        &self,
        value: Option<&TemporalValue>,
        amount: i64,
    ) -> Result<TemporalValue, StepError> {
        let Some(size) = self.step.step_size() else {
            tracing::debug!(kind = %self.kind, "refusing to step a control with step=any");
            return Err(StepError::NoAllowedStep { kind: self.kind });
        };

        let from = value.copied().unwrap_or_else(|| self.step_basis());
        let out_of_range = || StepError::OutOfRange {
            kind: self.kind,
            from,
            units: amount.saturating_mul(size),
        };
        let units = amount.checked_mul(size).ok_or_else(out_of_range)?;
        from.shift(units).ok_or_else(out_of_range)
    }

    /// Moves `value` down by `amount` steps; see [`Constraints::step_up`].
    ///
    /// # Errors
    /// Same as [`Constraints::step_up`].
    pub fn step_down(
        &self,
        value: Option<&TemporalValue>,
        amount: i64,
    ) -> Result<TemporalValue, StepError> {
        self.step_up(value, amount.saturating_neg())
    }

    fn own_kind(&self, value: Option<TemporalValue>) -> Option<TemporalValue> {
        value.filter(|v| v.kind() == self.kind)
    }
}

/// Parses a `min`/`max` attribute; malformed or incomplete bounds are no bound at all.
fn sanitize_bound(kind: InputKind, attribute: &str, raw: &str) -> Option<TemporalValue> {
    match TemporalValue::parse_as(raw, kind) {
        Ok(value) => Some(value),
        Err(error) => {
            if !raw.is_empty() {
                tracing::debug!(%kind, attribute, value = raw, %error, "ignoring malformed bound");
            }
            None
        }
    }
}
