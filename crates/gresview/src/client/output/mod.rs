pub mod cli;
pub mod json;
pub mod outputs;
pub mod quiet;

/// Formats a GPU amount, dropping the fractional part when it is zero.
pub fn format_gpu_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let formatted = format!("{value:.2}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
