//! Plain-text rendering of sentences and candidate lists.

use unicode_width::UnicodeWidthStr;

use lmx_core::Candidate;
use lmx_session::SentenceState;

const TOKEN_COLUMN: usize = 16;

/// Probability as a percentage with one decimal, e.g. `0.7` -> `70.0%`.
pub fn format_probability(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Token as shown to the user. Newlines are drawn as `↵` so they stay visible.
pub fn display_token(token: &str) -> String {
    token.replace('\n', "↵")
}

fn pad(label: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(label);
    if w < width {
        format!("{label}{}", " ".repeat(width - w))
    } else {
        label.to_string()
    }
}

pub fn format_candidates(candidates: &[Candidate]) -> String {
    let mut out = String::new();
    for (i, c) in candidates.iter().enumerate() {
        let token = pad(&format!("\"{}\"", display_token(&c.token)), TOKEN_COLUMN);
        out.push_str(&format!(
            "#{:>2}: {} {:>6}  logit={:.2}\n",
            i,
            token,
            format_probability(c.probability),
            c.score,
        ));
    }
    out
}

pub fn format_state(state: &SentenceState) -> String {
    let mut out = format!("> {}\n", display_token(&state.text));
    if state.loading {
        out.push_str("  (loading)\n");
    }
    if state.error {
        out.push_str("  (prediction failed)\n");
    }
    out.push_str(&format_candidates(state.visible_candidates()));
    out
}
