//! A headless `<input type="date|month|week">`.
//!
//! [`InputControl`] is the attribute-string side of a form control: it keeps the raw
//! `min`/`max`/`step`/`value` attributes as written, sanitizes them into
//! [`Constraints`] and a current [`TemporalValue`], and exposes the DOM-shaped
//! operations (`valueAsNumber`, `valueAsDate`, `stepUp`, `checkValidity`) on top of
//! the value model. Rendering and event dispatch stay with the caller.

use serde::{Deserialize, Serialize};

use crate::{Constraints, InputKind, StepError, TemporalValue, ValidityResult};

/// The content attributes of a date-like control, as written in markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAttributes {
    #[serde(rename = "type")]
    pub kind:  InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min:   Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max:   Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step:  Option<String>,
    /// The default value; also the step base when there is no usable `min`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ControlAttributes {
    pub const fn new(kind: InputKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
            step: None,
            value: None,
        }
    }
}

/// One date, month or week control and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct InputControl {
    attributes:  ControlAttributes,
    constraints: Constraints,
    value:       Option<TemporalValue>,
}

impl InputControl {
    /// An empty control with no attributes
    pub fn new(kind: InputKind) -> Self {
        Self::from_attributes(ControlAttributes::new(kind))
    }

    /// A control as declared by `attributes`, holding its sanitized default value
    pub fn from_attributes(attributes: ControlAttributes) -> Self {
        let value = attributes
            .value
            .as_deref()
            .and_then(|raw| TemporalValue::parse(raw, attributes.kind));
        let constraints = constraints_for(&attributes);
        Self {
            attributes,
            constraints,
            value,
        }
    }

    #[must_use]
    pub fn with_min(mut self, raw: &str) -> Self {
        self.attributes.min = Some(raw.to_owned());
        self.constraints = constraints_for(&self.attributes);
        self
    }

    #[must_use]
    pub fn with_max(mut self, raw: &str) -> Self {
        self.attributes.max = Some(raw.to_owned());
        self.constraints = constraints_for(&self.attributes);
        self
    }

    #[must_use]
    pub fn with_step(mut self, raw: &str) -> Self {
        self.attributes.step = Some(raw.to_owned());
        self.constraints = constraints_for(&self.attributes);
        self
    }

    /// Sets the default value, which also becomes the current value
    #[must_use]
    pub fn with_value(mut self, raw: &str) -> Self {
        self.attributes.value = Some(raw.to_owned());
        self.value = TemporalValue::parse(raw, self.attributes.kind);
        self.constraints = constraints_for(&self.attributes);
        self
    }

    pub const fn kind(&self) -> InputKind {
        self.attributes.kind
    }

    pub const fn attributes(&self) -> &ControlAttributes {
        &self.attributes
    }

    pub const fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The `min` attribute exactly as written
    pub fn min(&self) -> &str {
        self.attributes.min.as_deref().unwrap_or_default()
    }

    /// The `max` attribute exactly as written
    pub fn max(&self) -> &str {
        self.attributes.max.as_deref().unwrap_or_default()
    }

    /// The `step` attribute exactly as written
    pub fn step(&self) -> &str {
        self.attributes.step.as_deref().unwrap_or_default()
    }

    /// The current value in canonical form, or `""` when empty
    pub fn value(&self) -> String {
        self.value.map(|v| v.to_string()).unwrap_or_default()
    }

    pub const fn temporal_value(&self) -> Option<TemporalValue> {
        self.value
    }

    /// Replaces the value; anything that is not a canonical value of this kind empties it
    pub fn set_value(&mut self, raw: &str) {
        self.value = TemporalValue::parse(raw, self.kind());
    }

    /// `valueAsNumber`; `None` where the DOM reports `NaN`
    pub fn value_as_number(&self) -> Option<f64> {
        self.value.as_ref().map(TemporalValue::to_numeric)
    }

    /// Sets the value from `valueAsNumber` semantics; non-finite or unrepresentable
    /// numbers empty the control
    pub fn set_value_as_number(&mut self, n: f64) {
        self.value = TemporalValue::from_numeric(n, self.kind());
    }

    /// `valueAsDate` as a millisecond timestamp, `None` when empty
    pub fn value_as_date(&self) -> Option<f64> {
        self.value.as_ref().map(TemporalValue::calendar_millis)
    }

    /// Sets the value to the date, month or week containing the UTC day of
    /// `millis`; `None` (a null date) empties the control
    pub fn set_value_as_date(&mut self, millis: Option<f64>) {
        let kind = self.kind();
        self.value = millis
            .and_then(|ms| TemporalValue::from_numeric(ms, InputKind::Date))
            .and_then(|date| TemporalValue::from_calendar_date(&date, kind));
    }

    /// Steps the value up by `n` steps. On error the value is left unchanged.
    ///
    /// # Errors
    /// See [`Constraints::step_up`].
    pub fn step_up(&mut self, n: i64) -> Result<(), StepError> {
        self.value = Some(self.constraints.step_up(self.value.as_ref(), n)?);
        Ok(())
    }

    /// Steps the value down by `n` steps. On error the value is left unchanged.
    ///
    /// # Errors
    /// See [`Constraints::step_down`].
    pub fn step_down(&mut self, n: i64) -> Result<(), StepError> {
        self.value = Some(self.constraints.step_down(self.value.as_ref(), n)?);
        Ok(())
    }

    pub fn validity(&self) -> ValidityResult {
        self.constraints.validate(self.value.as_ref())
    }

    /// Whether the control is valid. An invalid control is logged with its reason;
    /// raising a UI `invalid` event is up to the caller.
    pub fn check_validity(&self) -> bool {
        let Some(reason) = self.validity().reason() else {
            return true;
        };
        tracing::debug!(kind = %self.kind(), value = %self.value(), %reason, "control is invalid");
        false
    }
}

/// The step base is `min` when it is usable, otherwise the default value.
fn constraints_for(attributes: &ControlAttributes) -> Constraints {
    let kind = attributes.kind;
    let constraints = Constraints::from_attributes(
        kind,
        attributes.min.as_deref(),
        attributes.max.as_deref(),
        attributes.step.as_deref(),
    );
    if constraints.min().is_some() {
        return constraints;
    }
    let default_value = attributes
        .value
        .as_deref()
        .and_then(|raw| TemporalValue::parse(raw, kind));
    constraints.with_step_base(default_value)
}
