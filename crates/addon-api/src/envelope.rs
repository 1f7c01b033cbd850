//! Response envelope used by the addon API

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub description: String,
}

/// Every response body is either the payload or an error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrappingResponse<T> {
    Resp(T),
    Error(ErrorResponse),
}

impl<T> WrappingResponse<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Resp(value) => Ok(value),
            Self::Error(err) => Err(ApiError::Remote {
                description: err.description,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwraps_payload() {
        let resp: WrappingResponse<Vec<u32>> = serde_json::from_str(r#"{"Resp":[1,2,3]}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_error_becomes_remote() {
        let resp: WrappingResponse<Vec<u32>> =
            serde_json::from_str(r#"{"Error":{"description":"collection not found"}}"#).unwrap();
        match resp.into_result() {
            Err(ApiError::Remote { description }) => assert_eq!(description, "collection not found"),
            other => panic!("Expected remote error, got {other:?}"),
        }
    }
}
