use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded to S3 successfully";
pub const UPLOAD_FAILURE_MESSAGE: &str = "Error uploading file to S3";
pub const DISPATCH_ACK_MESSAGE: &str = "Invocation dispatched";
pub const FILE_CONTENT: &str = "Hello, World!";

/// Parameters for one remote function invocation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InvocationRequest {
    #[serde(rename = "FunctionName")]
    pub function_name: String,
}

impl InvocationRequest {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }
}

/// How the invocation service should run the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvocationKind {
    #[default]
    RequestResponse,
    Event,
    DryRun,
}

impl InvocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequestResponse => "RequestResponse",
            Self::Event => "Event",
            Self::DryRun => "DryRun",
        }
    }
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvocationKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "RequestResponse" => Ok(Self::RequestResponse),
            "Event" => Ok(Self::Event),
            "DryRun" => Ok(Self::DryRun),
            other => Err(format!("unknown invocation type: {other}")),
        }
    }
}

/// What the invocation service reported back. Only logged, never returned.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct InvocationOutcome {
    pub status_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn json(status_code: u16, payload: &impl Serialize) -> Self {
        Self {
            status_code,
            headers: json!({"Content-Type": "application/json"}),
            body: serde_json::to_string(payload).expect("response payload should serialize"),
        }
    }

    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadBody {
    pub message: String,
    #[serde(rename = "s3Url", default, skip_serializing_if = "Option::is_none")]
    pub s3_url: Option<String>,
}

impl UploadBody {
    pub fn uploaded(s3_url: impl Into<String>) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            s3_url: Some(s3_url.into()),
        }
    }

    pub fn failed() -> Self {
        Self {
            message: UPLOAD_FAILURE_MESSAGE.to_string(),
            s3_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DispatchAck {
    pub message: String,
    pub target: String,
}

impl DispatchAck {
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            message: DISPATCH_ACK_MESSAGE.to_string(),
            target: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_upload_body_omits_url_field() {
        let response = ApiGatewayResponse::json(500, &UploadBody::failed());
        let body = response.body_json().expect("body should parse");

        assert_eq!(body["message"], UPLOAD_FAILURE_MESSAGE);
        assert!(body.get("s3Url").is_none());
    }

    #[test]
    fn response_serializes_with_gateway_field_names() {
        let response = ApiGatewayResponse::json(200, &UploadBody::uploaded("https://b/k"));
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert!(value["body"].as_str().unwrap().contains("\"s3Url\":\"https://b/k\""));
    }

    #[test]
    fn invocation_kind_parses_sdk_names() {
        assert_eq!(
            "Event".parse::<InvocationKind>(),
            Ok(InvocationKind::Event)
        );
        assert_eq!(
            " RequestResponse ".parse::<InvocationKind>(),
            Ok(InvocationKind::RequestResponse)
        );
        assert!("async".parse::<InvocationKind>().is_err());
    }

    #[test]
    fn invocation_request_uses_platform_parameter_name() {
        let value = serde_json::to_value(InvocationRequest::new("prd-make-file-lambda"))
            .expect("request should serialize");
        assert_eq!(value, json!({"FunctionName": "prd-make-file-lambda"}));
    }
}
