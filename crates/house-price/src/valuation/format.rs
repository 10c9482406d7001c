const RUPIAH_PER_MILLION: f64 = 1_000_000.0;

/// Formats a model output expressed in millions as a rupiah amount with
/// `.` thousands separators, e.g. `1500.0` becomes `Rp 1.500.000.000`.
pub fn format_rupiah(millions: f64) -> String {
    let rupiah = (millions * RUPIAH_PER_MILLION).round();
    let sign = if rupiah < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rupiah.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("Rp {sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_billions() {
        assert_eq!(format_rupiah(1500.0), "Rp 1.500.000.000");
    }

    #[test]
    fn rounds_to_whole_rupiah() {
        assert_eq!(format_rupiah(0.0015), "Rp 1.500");
        assert_eq!(format_rupiah(2.3456789), "Rp 2.345.679");
    }

    #[test]
    fn handles_small_and_negative_values() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(0.000123), "Rp 123");
        assert_eq!(format_rupiah(-12.5), "Rp -12.500.000");
    }
}
