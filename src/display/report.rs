//! Report formatting utilities for terminal output

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar of `width` cells filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    let filled = bar_cells(value, max_value, width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Number of filled cells for a bar; shared with the PDF layout
pub fn bar_cells(value: f64, max_value: f64, width: usize) -> usize {
    if max_value <= 0.0 || value <= 0.0 {
        return 0;
    }
    let filled = ((value / max_value) * width as f64).round() as usize;
    // A non-zero value always shows
    filled.clamp(1, width)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to at most `max_chars` characters, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}
