use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use super::{LanguagePair, TranslateError, Translator};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translator backed by the public Google Translate endpoint
pub struct GoogleTranslator {
    client: Client,
    languages: LanguagePair,
}

impl GoogleTranslator {
    pub fn new(languages: LanguagePair, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, languages })
    }
}

/// Join the translated segments of a `translate_a/single` response
///
/// The body looks like `[[["hấp thụ","absorb",null,null,10]],null,"en",...]`.
fn parse_response(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            TranslateError::InvalidResponse("missing translation segments".to_string())
        })?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    let text = text.trim();
    if text.is_empty() {
        return Err(TranslateError::InvalidResponse("empty translation".to_string()));
    }
    Ok(text.to_string())
}

impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    fn translate_to_target(&self, word: &str) -> Result<String, TranslateError> {
        if word.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", self.languages.source.as_str()),
                ("tl", self.languages.target.as_str()),
                ("dt", "t"),
                ("q", word),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Server {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json()?;
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_segment() {
        let body = json!([[["hấp thụ", "absorb", null, null, 10]], null, "en"]);
        assert_eq!(parse_response(&body).unwrap(), "hấp thụ");
    }

    #[test]
    fn test_parse_joins_segments() {
        let body = json!([[["xin ", "hello ", null], ["chào", "there", null]], null, "en"]);
        assert_eq!(parse_response(&body).unwrap(), "xin chào");
    }

    #[test]
    fn test_parse_unexpected_shape() {
        assert!(parse_response(&json!({"error": "nope"})).is_err());
        assert!(parse_response(&json!([[]])).is_err());
    }
}
