use crate::parameter::{Parameter, ParameterId};

/// What a slider row shows: caption, range, step and the value label.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub id: ParameterId,
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    /// Current value truncated toward zero.
    pub value_label: String,
}

impl SliderView {
    /// Describes the slider bound to `parameter`.
    #[must_use]
    pub fn new(parameter: &Parameter, step: f64) -> Self {
        Self {
            id: parameter.id(),
            name: parameter.id().label(),
            min: parameter.min(),
            max: parameter.max(),
            step,
            value: parameter.value(),
            value_label: truncated_label(parameter.value()),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncated_label(value: f64) -> String {
    (value.trunc() as i64).to_string()
}
