use gloo_net::http::Request;
use thiserror::Error;

use crate::types::Record;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to parse metadata: {0}")]
    Parse(String),
}

/// Fetch the trial metadata once. No retry; the caller logs the error.
pub async fn fetch_records(url: &str) -> Result<Vec<Record>, LoadError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
            url: url.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    let records = parse_records(&body)?;
    log::debug!("{records:?}");
    Ok(records)
}

pub fn parse_records(body: &str) -> Result<Vec<Record>, LoadError> {
    serde_json::from_str(body).map_err(|e| LoadError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PutativeCall;

    #[test]
    fn test_parse_array() {
        let body = r#"[
            {"bird": "A", "stim_phase": "pre", "block": 1, "putative_call": "yes", "wav_filename": "song1.wav"},
            {"bird": "B", "stim_phase": "post", "block": "2", "putative_call": false, "wav_filename": "call1.wav",
             "plot_id": "B-2", "plot_filename": {"breath": "figs/b.png"}}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].putative_call, PutativeCall::Label("yes".into()));
        assert_eq!(records[1].putative_call, PutativeCall::Flag(false));
    }

    #[test]
    fn test_null_plot_entries_keep_the_dataset() {
        let body = r#"[
            {"bird": "A", "stim_phase": "pre", "block": 1.0, "putative_call": "yes", "wav_filename": "a.wav",
             "plot_id": null, "plot_filename": {"breath": "figs/a.png", "spec": null}},
            {"bird": "B", "stim_phase": "pre", "block": 2, "putative_call": "no", "wav_filename": "b.wav",
             "plot_id": "B-2", "plot_filename": null}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].block.as_filter_value(), "1");
        assert!(records[1].plot_filename.is_none());
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_non_array_is_parse_error() {
        let err = parse_records(r#"{"bird": "A"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse metadata"));
    }

    #[test]
    fn test_record_missing_required_field() {
        let err = parse_records(r#"[{"bird": "A"}]"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_status_error_text() {
        let err = LoadError::Status { status: 404, url: "data/x.json".into() };
        assert_eq!(err.to_string(), "HTTP 404 for data/x.json");
    }
}
