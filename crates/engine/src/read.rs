//! The generic read pipeline shared by every data source.

use std::time::{Duration, Instant};

use bitbucket_api::{BitbucketClient, OutboundRequest};
use bitbucket_types::{BindingSpec, ErrorKind, ReadError};
use bitbucket_util::{parse_response_json_strict, render_template};
use reqwest::header::RETRY_AFTER;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::bind::{BoundParams, Inputs, bind_params, template_error};
use crate::classify::{classify_status, classify_transport};
use crate::flatten::{Attributes, flatten};

/// Per-read options supplied by the host runtime.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub cancel: CancellationToken,
    /// Host deadline; the client default applies when absent.
    pub deadline: Option<Duration>,
}

impl ReadOptions {
    pub fn with_cancel(cancel: CancellationToken) -> Self {
        Self { cancel, deadline: None }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Result of one successful read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    /// Synthetic identity rendered from the identity template
    pub id: String,
    pub attributes: Attributes,
}

/// A bound binding with its concrete path and query, ready to dispatch.
#[derive(Debug, Clone)]
pub struct PreparedRead {
    pub spec: &'static BindingSpec,
    pub params: BoundParams,
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// Binds inputs and builds the request path and query without sending anything.
pub fn prepare(spec: &'static BindingSpec, inputs: &Inputs) -> Result<PreparedRead, ReadError> {
    let params = bind_params(spec, inputs)?;
    let path = params.path()?;
    let query = params.query();
    Ok(PreparedRead {
        spec,
        params,
        path,
        query,
    })
}

/// Reads one data source.
///
/// Steps run strictly in order: bind, build the URL, trace, dispatch,
/// classify, read the body, decode and flatten, then render the identity.
/// Any failure returns before attributes are produced, so a failed read
/// never yields partial state.
pub async fn read(
    client: &BitbucketClient,
    spec: &'static BindingSpec,
    inputs: &Inputs,
    options: &ReadOptions,
) -> Result<ReadOutcome, ReadError> {
    let prepared = prepare(spec, inputs)?;
    let url = client
        .resolve_url(&prepared.path, &prepared.query)
        .map_err(|e| classify_transport(spec, &e))?;
    let url_text = url.to_string();
    let fail = |error: ReadError| error.with_url(url_text.clone());

    info!(binding = spec.name, params = ?prepared.params.sanitized(), "reading data source");
    let started = Instant::now();

    let request = OutboundRequest::get(prepared.path.clone())
        .with_query(prepared.query.clone())
        .with_timeout(options.deadline);
    let response = client
        .send(request, &options.cancel)
        .await
        .map_err(|e| fail(classify_transport(spec, &e)))?;

    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = client
        .read_body(response, &options.cancel)
        .await
        .map_err(|e| fail(classify_transport(spec, &e)));

    if !status.is_success() {
        // The error body only enriches the detail; cancellation still wins.
        let body = match body {
            Ok(body) => body,
            Err(error) if error.kind.is_cancelled() => return Err(error),
            Err(_) => Vec::new(),
        };
        if let Some(error) = classify_status(spec, &prepared.params, status, retry_after, &body, |text| {
            client.redact_remote(text)
        }) {
            debug!(binding = spec.name, status = %status, "data source read failed");
            return Err(fail(error));
        }
        return Err(fail(ReadError::new(
            ErrorKind::UnexpectedStatus(status.as_u16()),
            spec.name,
            format!("unexpected status {status}"),
        )));
    }
    let body = body?;
    debug!(binding = spec.name, status = %status, bytes = body.len(), "response received");

    let value = decode(client, spec, status.as_u16(), &body).map_err(fail)?;
    let attributes = flatten(spec, &value).map_err(fail)?;
    let id = render_identity(spec, &prepared.params, &attributes).map_err(fail)?;

    info!(
        binding = spec.name,
        id = %id,
        duration_ms = started.elapsed().as_millis() as u64,
        "data source read"
    );
    Ok(ReadOutcome { id, attributes })
}

fn decode(client: &BitbucketClient, spec: &BindingSpec, status: u16, body: &[u8]) -> Result<Value, ReadError> {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return Err(ReadError::new(
            ErrorKind::EmptyResponse,
            spec.name,
            format!("{} returned an empty response body", spec.name),
        ));
    }
    let value = parse_response_json_strict(&text, Some(status)).map_err(|e| {
        ReadError::decode(
            spec.name,
            format!("decoder {}: {}", spec.decoder_name(), client.redact_remote(&e.to_string())),
        )
    })?;
    if value.is_null() {
        return Err(ReadError::contract(
            spec.name,
            "the response object was null; check that the provider credentials are configured",
        ));
    }
    Ok(value)
}

/// Renders the identity template; placeholders resolve against bound inputs
/// first and top-level scalar outputs second.
pub fn render_identity(spec: &BindingSpec, params: &BoundParams, attributes: &Attributes) -> Result<String, ReadError> {
    render_template(spec.identity, |name| {
        params.get(name).map(str::to_string).or_else(|| match attributes.get(name)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    })
    .map_err(|e| template_error(spec, "identity", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitbucket_api::{ClientSettings, Credentials};
    use bitbucket_types::{FieldSpec, ParamSpec, ResponseShape, TransportCause};
    use httpmock::prelude::*;
    use serde_json::json;

    static TAG: BindingSpec = BindingSpec {
        name: "bitbucket_tag",
        summary: "",
        path: "2.0/repositories/{workspace}/{repo_slug}/refs/tags/{tag_name}",
        params: &[
            ParamSpec::path("workspace"),
            ParamSpec::path("repo_slug"),
            ParamSpec::path("tag_name"),
        ],
        response: ResponseShape::Scalar {
            fields: &[
                FieldSpec::string("name").required(),
                FieldSpec::string("target_hash").from("target.hash"),
            ],
        },
        identity: "{workspace}/{repo_slug}/{tag_name}",
    };

    static REPOSITORY: BindingSpec = BindingSpec {
        name: "bitbucket_repository",
        summary: "",
        path: "2.0/repositories/{workspace}/{repo_slug}",
        params: &[ParamSpec::path("workspace"), ParamSpec::path("repo_slug")],
        response: ResponseShape::Scalar {
            fields: &[FieldSpec::string("uuid"), FieldSpec::string("full_name")],
        },
        identity: "{workspace}/{uuid}",
    };

    fn client(server: &MockServer) -> BitbucketClient {
        let settings = ClientSettings::default().with_base_url(&server.base_url()).unwrap();
        BitbucketClient::new(&Credentials::Unauthenticated, settings).unwrap()
    }

    fn inputs(value: Value) -> Inputs {
        serde_json::from_value(value).unwrap()
    }

    fn tag_inputs(tag: &str) -> Inputs {
        inputs(json!({"workspace": "w", "repo_slug": "r", "tag_name": tag}))
    }

    #[tokio::test]
    async fn scalar_read_flattens_and_sets_identity() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/v1");
            then.status(200)
                .body(r#"{"name":"v1","type":"tag","target":{"hash":"deadbeef","type":"commit"}}"#);
        });

        let outcome = read(&client(&server), &TAG, &tag_inputs("v1"), &ReadOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.id, "w/r/v1");
        assert_eq!(outcome.attributes["name"], "v1");
        assert_eq!(outcome.attributes["target_hash"], "deadbeef");
        mock.assert();
    }

    #[tokio::test]
    async fn path_values_are_percent_encoded_but_identity_is_verbatim() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/release%2F1.0");
            then.status(200).body(r#"{"name":"release/1.0"}"#);
        });

        let outcome = read(&client(&server), &TAG, &tag_inputs("release/1.0"), &ReadOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.id, "w/r/release/1.0");
        mock.assert();
    }

    #[tokio::test]
    async fn identity_falls_back_to_outputs() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r");
            then.status(200).body(r#"{"uuid":"{1234}","full_name":"w/r"}"#);
        });

        let outcome = read(
            &client(&server),
            &REPOSITORY,
            &inputs(json!({"workspace": "w", "repo_slug": "r"})),
            &ReadOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(outcome.id, "w/{1234}");
    }

    #[tokio::test]
    async fn unbound_identity_variable_is_a_contract_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r");
            then.status(200).body(r#"{"full_name":"w/r"}"#);
        });

        let err = read(
            &client(&server),
            &REPOSITORY,
            &inputs(json!({"workspace": "w", "repo_slug": "r"})),
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Contract);
        assert!(err.detail.contains("'uuid'"), "{}", err.detail);
    }

    #[tokio::test]
    async fn missing_required_input_sends_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("{}");
        });

        let err = read(
            &client(&server),
            &TAG,
            &inputs(json!({"workspace": "w", "repo_slug": "r"})),
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Contract);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn not_found_carries_inputs_and_url() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/v9");
            then.status(404).body(r#"{"type":"error","error":{"message":"Tag not found"}}"#);
        });

        let err = read(&client(&server), &TAG, &tag_inputs("v9"), &ReadOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.detail.contains("tag_name=\"v9\""), "{}", err.detail);
        assert!(err.detail.ends_with("Tag not found"));
        assert!(err.url.as_deref().unwrap().ends_with("/2.0/repositories/w/r/refs/tags/v9"));
    }

    #[tokio::test]
    async fn rate_limit_surfaces_retry_after() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/v1");
            then.status(429).header("retry-after", "120");
        });

        let err = read(&client(&server), &TAG, &tag_inputs("v1"), &ReadOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.retry_after.as_deref(), Some("120"));
    }

    #[tokio::test]
    async fn empty_and_null_bodies_are_distinguished() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/empty");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/null");
            then.status(200).body("null");
        });

        let client = client(&server);
        let err = read(&client, &TAG, &tag_inputs("empty"), &ReadOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyResponse);
        let err = read(&client, &TAG, &tag_inputs("null"), &ReadOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Contract);
        assert!(err.detail.contains("credentials"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/v1");
            then.status(200).body("<html>oops</html>");
        });

        let err = read(&client(&server), &TAG, &tag_inputs("v1"), &ReadOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.detail.contains("bitbucket_tag::scalar"));
    }

    #[tokio::test]
    async fn deadline_expiry_is_a_transport_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/2.0/repositories/w/r/refs/tags/v1");
            then.status(200).delay(Duration::from_secs(5)).body(r#"{"name":"v1"}"#);
        });

        let options = ReadOptions::default().with_deadline(Duration::from_millis(50));
        let err = read(&client(&server), &TAG, &tag_inputs("v1"), &options).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport(TransportCause::Timeout));
    }

    #[tokio::test]
    async fn cancelled_error_body_is_not_reported_as_the_status() {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\n\r\n{\"type\"");
                let _ = stream.flush();
                std::thread::sleep(Duration::from_secs(5));
            }
        });
        let settings = ClientSettings::default().with_base_url(&format!("http://{address}")).unwrap();
        let client = BitbucketClient::new(&Credentials::Unauthenticated, settings).unwrap();

        let cancel = CancellationToken::new();
        let trip = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trip.cancel();
        });
        let err = read(&client, &TAG, &tag_inputs("v1"), &ReadOptions::with_cancel(cancel))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport(TransportCause::Cancelled));
    }

    #[test]
    fn prepare_builds_path_without_sending() {
        let prepared = prepare(&TAG, &tag_inputs("a b")).unwrap();
        assert_eq!(prepared.path, "2.0/repositories/w/r/refs/tags/a%20b");
        assert!(prepared.query.is_empty());
    }
}
