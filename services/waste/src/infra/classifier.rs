use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use pilah_domain::category::WasteCategory;

use crate::domain::repository::ClassifierPort;
use crate::domain::types::Verdict;
use crate::error::WasteServiceError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const CLASSIFY_PROMPT: &str = r#"Klasifikasikan jenis sampah dalam gambar dan hitung berapa banyak item sampah yang terlihat. Berikan respons dalam format JSON berikut:
    {
      "classification": "jenis_sampah",
      "count": jumlah_item,
      "confidence": tingkat_kepercayaan_0_1
    }
    Jenis sampah yang mungkin: 'Organik', 'Plastik Daur Ulang', 'Kertas Daur Ulang', 'Kaca Daur Ulang', 'Logam Daur Ulang', atau 'Sampah Lainnya'.
    Jika tidak ada sampah yang terdeteksi, setel "classification" menjadi "Tidak Ada Sampah", "count" menjadi 0, dan "confidence" menjadi 0."#;

/// Classifier backed by the Gemini `generateContent` API. The response is
/// constrained to a JSON object via `responseSchema`, then parsed into a
/// [`Verdict`] against the closed category set.
#[derive(Clone)]
pub struct GeminiClassifier {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClassifier {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_owned(), api_key, model)
    }

    pub fn with_base_url(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn request_body(image: &[u8], content_type: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "text": CLASSIFY_PROMPT },
                {
                    "inline_data": {
                        "mime_type": content_type,
                        "data": BASE64.encode(image),
                    }
                }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "classification": { "type": "STRING" },
                    "count": { "type": "NUMBER" },
                    "confidence": { "type": "NUMBER" },
                },
                "required": ["classification", "count", "confidence"],
            }
        }
    })
}

/// Extract the verdict from a `generateContent` response. The model's JSON
/// is itself a string inside `candidates[0].content.parts[0].text`.
fn parse_verdict(response: &Value) -> anyhow::Result<Verdict> {
    let text = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .context("response has no candidate text")?;
    let inner: Value = serde_json::from_str(text).context("candidate text is not JSON")?;

    let label = inner
        .get("classification")
        .and_then(Value::as_str)
        .context("verdict has no classification")?;
    let category = WasteCategory::from_label(label);
    let confidence = inner
        .get("confidence")
        .and_then(Value::as_f64)
        .context("verdict has no confidence")?
        .clamp(0.0, 1.0);
    let count = inner
        .get("count")
        .and_then(Value::as_f64)
        .map(|n| n.max(0.0).round() as i32);

    Ok(Verdict {
        category,
        confidence,
        count,
    })
}

impl ClassifierPort for GeminiClassifier {
    async fn classify(
        &self,
        image: &[u8],
        content_type: &str,
    ) -> Result<Verdict, WasteServiceError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(image, content_type))
            .send()
            .await
            .context("send classify request")?
            .error_for_status()
            .context("classify request rejected")?;
        let body: Value = response
            .json()
            .await
            .context("decode classify response")?;
        Ok(parse_verdict(&body).context("parse classify response")?)
    }
}
