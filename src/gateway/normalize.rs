use super::types::PredictionEnvelope;
use crate::config::FallbackConfig;
use serde_json::{Map, Value};

/// Keys consulted, in order, for the predicted label.
const PREDICTION_KEYS: [&str; 2] = ["predicted_category", "prediction"];

/// Maps an upstream success body onto the envelope.
///
/// Every field is extracted on its own; a missing or mistyped field falls back
/// without affecting the others.
pub fn normalize(input: &str, body: &Value, fallbacks: &FallbackConfig) -> PredictionEnvelope {
    let prediction = PREDICTION_KEYS
        .iter()
        .find_map(|key| string_field(body, key))
        .unwrap_or_else(|| fallbacks.prediction.clone());

    PredictionEnvelope {
        input: input.to_string(),
        prediction,
        confidence: number_field(body, "confidence"),
        model_used: string_field(body, "model_used")
            .unwrap_or_else(|| fallbacks.model_used.clone()),
        reasoning: string_field(body, "reasoning").unwrap_or_default(),
        complexity_score: number_field(body, "complexity_score"),
        processing_time: number_field(body, "processing_time"),
        complexity_details: body
            .get("complexity_details")
            .filter(|v| v.is_object())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        error: None,
    }
}

/// Envelope for a request the upstream did not complete successfully.
pub fn failure(input: &str, error: String, fallbacks: &FallbackConfig) -> PredictionEnvelope {
    PredictionEnvelope {
        input: input.to_string(),
        prediction: fallbacks.prediction.clone(),
        confidence: 0.0,
        model_used: fallbacks.failure_model_used.clone(),
        reasoning: String::new(),
        complexity_score: 0.0,
        processing_time: 0.0,
        complexity_details: Value::Object(Map::new()),
        error: Some(error),
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(body: &Value, key: &str) -> f64 {
    body.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_full_body() {
        let body = json!({
            "predicted_category": "billing",
            "confidence": 0.87,
            "model_used": "tfidf",
            "reasoning": "short ascii text",
            "complexity_score": 0.2,
            "processing_time": 0.015,
            "complexity_details": {"length": 12}
        });

        let envelope = normalize("refund please", &body, &FallbackConfig::default());

        assert_eq!(
            envelope,
            PredictionEnvelope {
                input: "refund please".to_string(),
                prediction: "billing".to_string(),
                confidence: 0.87,
                model_used: "tfidf".to_string(),
                reasoning: "short ascii text".to_string(),
                complexity_score: 0.2,
                processing_time: 0.015,
                complexity_details: json!({"length": 12}),
                error: None,
            }
        );
    }

    #[test]
    fn test_normalize_empty_body_uses_fallbacks() {
        let envelope = normalize("hi", &json!({}), &FallbackConfig::default());

        assert_eq!(envelope.input, "hi");
        assert_eq!(envelope.prediction, "Unknown");
        assert_eq!(envelope.confidence, 0.0);
        assert_eq!(envelope.model_used, "unknown");
        assert_eq!(envelope.reasoning, "");
        assert_eq!(envelope.complexity_score, 0.0);
        assert_eq!(envelope.processing_time, 0.0);
        assert_eq!(envelope.complexity_details, json!({}));
        assert_eq!(envelope.error, None);
    }

    #[test]
    fn test_normalize_prefers_predicted_category() {
        let body = json!({"predicted_category": "a", "prediction": "b"});
        assert_eq!(normalize("x", &body, &FallbackConfig::default()).prediction, "a");

        let body = json!({"prediction": "b"});
        assert_eq!(normalize("x", &body, &FallbackConfig::default()).prediction, "b");
    }

    #[test]
    fn test_normalize_mistyped_fields_fall_back_individually() {
        let body = json!({
            "predicted_category": 42,
            "confidence": "high",
            "model_used": "transformer",
            "complexity_details": [1, 2]
        });

        let envelope = normalize("x", &body, &FallbackConfig::default());

        assert_eq!(envelope.prediction, "Unknown");
        assert_eq!(envelope.confidence, 0.0);
        assert_eq!(envelope.model_used, "transformer");
        assert_eq!(envelope.complexity_details, json!({}));
    }

    #[test]
    fn test_normalize_non_object_body() {
        let envelope = normalize("x", &json!("plain"), &FallbackConfig::default());
        assert_eq!(envelope.prediction, "Unknown");
    }

    #[test]
    fn test_failure_envelope() {
        let envelope = failure(
            "x",
            "Failed to process request".to_string(),
            &FallbackConfig::default(),
        );

        assert_eq!(envelope.prediction, "Unknown");
        assert_eq!(envelope.model_used, "none");
        assert_eq!(envelope.confidence, 0.0);
        assert_eq!(envelope.error.as_deref(), Some("Failed to process request"));
    }

    #[test]
    fn test_custom_fallbacks() {
        let fallbacks = FallbackConfig {
            prediction: "n/a".to_string(),
            model_used: "router".to_string(),
            ..FallbackConfig::default()
        };

        let envelope = normalize("x", &json!({}), &fallbacks);
        assert_eq!(envelope.prediction, "n/a");
        assert_eq!(envelope.model_used, "router");
    }
}
