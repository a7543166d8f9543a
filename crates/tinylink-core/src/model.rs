//! Request and response bodies exchanged with the transport boundary.

use crate::mapping::Mapping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub long_url: String,
}

impl CreateRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub short_url: String,
    pub long_url: String,
}

impl From<&Mapping> for CreateResponse {
    fn from(mapping: &Mapping) -> Self {
        Self {
            short_url: mapping.short_url().to_string(),
            long_url: mapping.long_url().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub long_url: String,
}

impl From<&Mapping> for ResolveResponse {
    fn from(mapping: &Mapping) -> Self {
        Self {
            long_url: mapping.long_url().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_camel_case() {
        let request: CreateRequest =
            serde_json::from_str(r#"{"longUrl":"https://witek.com.br"}"#).unwrap();
        assert_eq!(request.long_url, "https://witek.com.br");
    }

    #[test]
    fn create_response_uses_camel_case() {
        let response = CreateResponse {
            short_url: "https://short.witek.com.br/t/abc".to_string(),
            long_url: "https://witek.com.br".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"shortUrl":"https://short.witek.com.br/t/abc","longUrl":"https://witek.com.br"}"#
        );
    }
}
