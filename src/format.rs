// Number formatting for report tables

/// Format an amount with two decimals and comma thousands separators.
///
/// `1234567.891` → `"1,234,567.89"`, `-0.004` → `"0.00"`
pub fn money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // No sign on values that round to zero
    let negative = amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// Currency-prefixed money: `$1,234.56`
pub fn currency(amount: f64) -> String {
    format!("${}", money(amount))
}

/// Percentage with one decimal: `33.3%`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Truncate to a display width, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
