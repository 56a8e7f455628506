//! Text helpers shared by every renderer of the view model.

/// Literal marker the API embeds in `bio` and `description` for a line break.
pub const LINE_MARKER: &str = "[nl]";

/// Splits text on `[nl]` markers. Empty input yields no lines.
pub fn split_line_markers(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(LINE_MARKER).map(ToOwned::to_owned).collect()
}

/// The value, or `fallback` when it is absent or blank.
pub fn with_fallback(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Badge text for a score; absent scores render as `?`.
pub fn score_label(score: Option<f64>) -> String {
    match score {
        Some(value) if value.is_finite() && value.fract() == 0.0 => {
            format!("Score: {}", value as i64)
        }
        Some(value) if value.is_finite() => format!("Score: {value}"),
        _ => "Score: ?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_line_markers() {
        assert_eq!(
            split_line_markers("Sales lead[nl]Mentor[nl]"),
            vec!["Sales lead", "Mentor", ""]
        );
        assert_eq!(split_line_markers("no markers"), vec!["no markers"]);
        assert!(split_line_markers("").is_empty());
    }

    #[test]
    fn fallback_applies_to_blank_values() {
        assert_eq!(with_fallback(Some("Paris"), "Unknown"), "Paris");
        assert_eq!(with_fallback(Some("  "), "Unknown"), "Unknown");
        assert_eq!(with_fallback(None, "Unknown"), "Unknown");
    }

    #[test]
    fn score_label_formats() {
        assert_eq!(score_label(Some(87.0)), "Score: 87");
        assert_eq!(score_label(Some(4.5)), "Score: 4.5");
        assert_eq!(score_label(Some(0.0)), "Score: 0");
        assert_eq!(score_label(None), "Score: ?");
        assert_eq!(score_label(Some(f64::NAN)), "Score: ?");
    }
}
