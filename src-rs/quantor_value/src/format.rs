use quantor_unit::Unit;

/// Settings for rendering values as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// The number of digits after the decimal point
    pub precision: usize,
    /// Prefix the text with `Abs ` or `Rel `
    pub verbose: bool,
    /// Append the display abbreviation of the unit
    pub with_unit: bool,
}

impl FormatConfig {
    /// Creates a configuration with three digits and the unit appended.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            precision: 3,
            verbose: false,
            with_unit: true,
        }
    }

    /// Sets the number of digits after the decimal point.
    #[must_use]
    pub const fn with_precision(self, precision: usize) -> Self {
        Self { precision, ..self }
    }

    /// Sets whether the text starts with the kind of the value.
    #[must_use]
    pub const fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    /// Sets whether the unit is appended.
    #[must_use]
    pub const fn with_unit(self, with_unit: bool) -> Self {
        Self { with_unit, ..self }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a number in fixed notation when it is zero or its magnitude is
/// in `[0.01, 10000)`, and in scientific notation otherwise.
pub fn format_number(value: f64, precision: usize) -> String {
    if value == 0.0 || (1e-2..1e4).contains(&value.abs()) {
        format!("{value:.precision$}")
    } else {
        format!("{value:.precision$e}")
    }
}

/// Wraps already formatted numbers with the kind label and unit.
pub fn decorate(body: &str, label: &str, unit: &Unit, config: &FormatConfig) -> String {
    let mut text = String::new();
    if config.verbose {
        text.push_str(label);
        text.push(' ');
    }
    text.push_str(body);
    if config.with_unit {
        text.push(' ');
        text.push_str(unit.display_abbreviation());
    }
    text
}

/// Formats a list of numbers as `[a, b, c]`.
pub fn format_list(values: impl IntoIterator<Item = f64>, precision: usize) -> String {
    let items: Vec<String> = values
        .into_iter()
        .map(|value| format_number(value, precision))
        .collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation_in_range() {
        assert_eq!(format_number(80.0, 3), "80.000");
        assert_eq!(format_number(0.0, 3), "0.000");
        assert_eq!(format_number(-0.05, 2), "-0.05");
        assert_eq!(format_number(9999.5, 1), "9999.5");
    }

    #[test]
    fn scientific_notation_out_of_range() {
        assert_eq!(format_number(12_346.0, 3), "1.235e4");
        assert_eq!(format_number(0.001, 3), "1.000e-3");
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_list([1.0, 2.5], 1), "[1.0, 2.5]");
        assert_eq!(format_list([], 1), "[]");
    }
}
