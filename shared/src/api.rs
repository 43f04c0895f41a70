use serde::{Deserialize, Serialize};
use std::fmt;

pub const DETECT_TIME_PATH: &str = "/api/detect-time";
pub const UPLOAD_FIELD: &str = "file";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while detecting the time";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Body of a successful `POST /api/detect-time`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectTimeResponse {
    pub time: ClockTime,
    pub confidence: f64,
    #[serde(default)]
    pub detection_image: Option<String>,
}

/// Body of a rejected request. `detail` is either plain text or an object
/// carrying a user-facing `message` plus optional diagnostics.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Structured {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        technical_details: Option<serde_json::Value>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetectionResult {
    pub time: ClockTime,
    pub confidence: f64,
    pub annotated_image: Option<String>,
}

impl DetectionResult {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

impl TryFrom<DetectTimeResponse> for DetectionResult {
    type Error = DetectionFailure;

    fn try_from(response: DetectTimeResponse) -> Result<Self, Self::Error> {
        if !response.time.is_valid() {
            return Err(DetectionFailure::MalformedResponse(format!(
                "time out of range: {}",
                response.time
            )));
        }
        if !(0.0..=1.0).contains(&response.confidence) {
            return Err(DetectionFailure::MalformedResponse(format!(
                "confidence out of range: {}",
                response.confidence
            )));
        }
        Ok(Self {
            time: response.time,
            confidence: response.confidence,
            annotated_image: response.detection_image.filter(|img| !img.is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionFailure {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server error: {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
        technical_details: Option<String>,
    },
    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),
    #[error("Request timed out after {0} ms")]
    TimedOut(u32),
}

impl DetectionFailure {
    /// The only text that reaches the visible error banner.
    pub fn user_message(&self) -> String {
        match self {
            DetectionFailure::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            DetectionFailure::TimedOut(ms) => {
                format!("The detection service did not respond within {} ms", ms)
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turns a raw status code and body into a detection outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<DetectionResult, DetectionFailure> {
    if is_success_status(status) {
        let parsed: DetectTimeResponse = serde_json::from_str(body)
            .map_err(|e| DetectionFailure::MalformedResponse(e.to_string()))?;
        DetectionResult::try_from(parsed)
    } else {
        Err(rejection_from_body(status, body))
    }
}

fn rejection_from_body(status: u16, body: &str) -> DetectionFailure {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);

    let (message, technical_details) = match detail {
        Some(ErrorDetail::Text(text)) => (Some(text), None),
        Some(ErrorDetail::Structured {
            message,
            technical_details,
        }) => (
            message,
            technical_details.map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            }),
        ),
        None => (None, None),
    };

    DetectionFailure::Rejected {
        status,
        message,
        technical_details,
    }
}
