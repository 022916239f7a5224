use std::process;

use lmx_core::settings::Settings;
use lmx_core::text::{has_prefix, trim_right};
use lmx_core::PredictionRequest;
use lmx_engine::{HttpPredictor, Predictor};

use crate::format::{display_token, format_candidates};

/// One-shot request against the configured service.
pub fn predict(settings: &Settings, text: &str, next: Option<&str>, top_k: Option<u32>) {
    let Some(request) = build_request(settings, text, next, top_k) else {
        eprintln!("Error: text is empty after trimming trailing whitespace");
        process::exit(1);
    };
    let predictor = HttpPredictor::from_settings(&settings.service);

    match predictor.predict(&request) {
        Ok(response) => {
            println!("> {}", display_token(&response.output_text));
            print!("{}", format_candidates(&response.candidates()));
        }
        Err(e) => {
            eprintln!("Error ({}) from {}: {e}", e.kind().as_str(), predictor.url());
            process::exit(1);
        }
    }
}

/// The request `predict` would send; `None` for a whitespace-only prefix.
fn build_request(
    settings: &Settings,
    text: &str,
    next: Option<&str>,
    top_k: Option<u32>,
) -> Option<PredictionRequest> {
    if !has_prefix(text) {
        return None;
    }
    let request = PredictionRequest::new(trim_right(text), next.map(str::to_owned))
        .with_top_k(top_k.or(settings.prediction.top_k));
    Some(request)
}

#[cfg(test)]
mod tests {
    use lmx_core::settings::{default_toml, parse_settings_toml};

    use super::*;

    fn defaults() -> Settings {
        parse_settings_toml(default_toml()).unwrap()
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let s = defaults();
        for text in ["", "   ", "\n\t"] {
            assert_eq!(build_request(&s, text, Some(" a"), None), None, "{text:?}");
        }
    }

    #[test]
    fn request_is_trimmed_and_carries_top_k() {
        let mut s = defaults();
        let req = build_request(&s, "Joel is  ", Some(" happy"), Some(3)).unwrap();
        assert_eq!(req.previous_text, "Joel is");
        assert_eq!(req.chosen_token.as_deref(), Some(" happy"));
        assert_eq!(req.top_k, Some(3));

        s.prediction.top_k = Some(7);
        let req = build_request(&s, "Joel is", None, None).unwrap();
        assert_eq!(req.top_k, Some(7));
    }
}
