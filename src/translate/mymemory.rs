use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{LanguagePair, TranslateError, Translator};

const ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Translator backed by the MyMemory translation memory API
pub struct MyMemoryTranslator {
    client: Client,
    languages: LanguagePair,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: ResponseData,
    #[serde(default)]
    response_status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: String,
}

impl MyMemoryTranslator {
    pub fn new(languages: LanguagePair, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, languages })
    }

    fn lang_pair(&self) -> String {
        format!("{}|{}", self.languages.source, self.languages.target)
    }
}

/// MyMemory reports failures in-band: `responseStatus` is 200 (number or string) on success
fn parse_response(data: MyMemoryResponse) -> Result<String, TranslateError> {
    let status_ok = match &data.response_status {
        Some(serde_json::Value::Number(n)) => n.as_u64() == Some(200),
        Some(serde_json::Value::String(s)) => s == "200",
        _ => true,
    };
    if !status_ok {
        return Err(TranslateError::InvalidResponse(format!(
            "status {:?}: {}",
            data.response_status, data.response_data.translated_text
        )));
    }

    let text = data.response_data.translated_text.trim();
    if text.is_empty() {
        return Err(TranslateError::InvalidResponse("empty translation".to_string()));
    }
    Ok(text.to_string())
}

impl Translator for MyMemoryTranslator {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    fn translate_to_target(&self, word: &str) -> Result<String, TranslateError> {
        if word.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let lang_pair = self.lang_pair();
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[("q", word), ("langpair", lang_pair.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Server {
                status: status.as_u16(),
            });
        }

        parse_response(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String, TranslateError> {
        parse_response(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"responseData":{"translatedText":"hấp thụ","match":1},"responseStatus":200}"#;
        assert_eq!(parse(body).unwrap(), "hấp thụ");
    }

    #[test]
    fn test_parse_in_band_error() {
        let body = r#"{"responseData":{"translatedText":"INVALID LANGUAGE PAIR"},"responseStatus":"403"}"#;
        assert!(matches!(parse(body), Err(TranslateError::InvalidResponse(_))));
    }

    #[test]
    fn test_lang_pair() {
        let translator =
            MyMemoryTranslator::new(LanguagePair::default(), Duration::from_secs(1)).unwrap();
        assert_eq!(translator.lang_pair(), "en|vi");
    }
}
