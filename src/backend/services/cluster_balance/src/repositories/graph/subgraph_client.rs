//! A minimal client for querying a GraphQL subgraph.

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

use crate::utils::errors::{Result, ServiceError};

/// HTTP client shared by every subgraph client.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ServiceError::Transport(err.to_string()))
}

pub struct SubgraphClient {
    client: Client,
    subgraph_url: Url,
}

impl SubgraphClient {
    pub fn new(subgraph_url: Url, client: Client) -> Self {
        Self {
            client,
            subgraph_url,
        }
    }

    /// Performs the specified GraphQL query on the subgraph.
    pub async fn query<T>(&self, query: &str, variables: Option<Map<String, Value>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.subgraph_url.clone())
            .json(&Query { query, variables })
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        serde_json::from_slice::<QueryResponse<T>>(&body)
            .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?
            .into_result()
    }
}

#[derive(Serialize)]
struct Query<'a> {
    query: &'a str,
    variables: Option<Map<String, Value>>,
}

/// The GraphQL `data`/`errors` envelope.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    #[serde(default = "empty_data")]
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<QueryError>>,
}

impl<T> QueryResponse<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Self {
                data: Some(data),
                errors: None,
            } => Ok(data),
            Self {
                errors: Some(errors),
                data: None,
            } if !errors.is_empty() => {
                // Only the first error is surfaced.
                for error in &errors[1..] {
                    tracing::warn!("additional GraphQL error: {}", error.message);
                }
                Err(ServiceError::Transport(errors[0].to_string()))
            }
            _ => Err(ServiceError::MalformedResponse(
                "invalid GraphQL response".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize, Error)]
#[error("{}", .message)]
struct QueryError {
    message: String,
}

// `#[serde(default)]` on an `Option<T>` would require `T: Default`.
fn empty_data<T>() -> Option<T> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_from_json<T>(value: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value::<QueryResponse<T>>(value)
            .unwrap()
            .into_result()
    }

    #[test]
    fn serialize_query() {
        let mut variables = Map::new();
        variables.insert("account".to_string(), json!("0xabc"));
        variables.insert("block".to_string(), json!(42));

        assert_eq!(
            serde_json::to_value(&Query {
                query: "{ _meta { block { number } } }",
                variables: Some(variables),
            })
            .unwrap(),
            json!({
                "query": "{ _meta { block { number } } }",
                "variables": { "account": "0xabc", "block": 42 },
            }),
        );
    }

    #[test]
    fn deserialize_successful_response() {
        assert!(response_from_json::<bool>(json!({ "data": true })).unwrap());
    }

    #[test]
    fn deserialize_error_response() {
        let err = response_from_json::<bool>(json!({
            "data": null,
            "errors": [{"message": "foo"}, {"message": "bar"}],
        }))
        .unwrap_err();

        assert!(matches!(err, ServiceError::Transport(ref message) if message == "foo"));
    }

    #[test]
    fn deserialize_invalid_response() {
        for value in [
            json!({ "data": null, "errors": null }),
            json!({ "data": null, "errors": [] }),
            json!({ "data": true, "errors": [] }),
            json!({ "data": true, "errors": [{"message": "bad"}] }),
        ] {
            assert!(response_from_json::<bool>(value).is_err());
        }
    }
}
