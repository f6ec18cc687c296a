use crate::input::queue::Controls;

/// What the page shows next to the table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    /// Aim slider readout.
    pub angle_text: String,
    /// Force slider readout.
    pub force_text: String,
    /// Object balls pocketed this session.
    pub pocketed: u32,
    /// Whether the aim/force/strike controls accept input.
    pub controls_enabled: bool,
}

impl Panel {
    /// Mirror the slider values into the readouts.
    pub fn show_controls(&mut self, controls: &Controls) {
        self.angle_text = format_value(controls.angle_deg());
        self.force_text = format_value(controls.force());
    }
}

/// Whole numbers print without a fraction, as a range input reports them.
fn format_value(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
