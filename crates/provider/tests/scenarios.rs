//! End-to-end reads through the provider against a local Bitbucket double.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bitbucket_provider::{
    AuthMode, BitbucketProvider, ClientSettings, ErrorKind, ProviderService, ReadOptions, TransportCause,
};
use bitbucket_types::ParamType;
use bitbucket_util::build_path;
use futures_util::future::join_all;
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

fn settings(server: &MockServer) -> ClientSettings {
    ClientSettings::default()
        .with_base_url(&server.base_url())
        .unwrap()
        .with_token_url(&server.url("/site/oauth2/access_token"))
        .unwrap()
}

async fn configured(server: &MockServer, config: Value) -> BitbucketProvider {
    let provider = BitbucketProvider::new()
        .unwrap()
        .with_settings(settings(server))
        .with_env_lookup(|_| None);
    let diagnostics = provider.configure(&config).await;
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    provider
}

const COMMENTS_BODY: &str = r#"{"values":[{"id":1,"content":{"raw":"x"},"created_on":"2020","updated_on":"2020","user":{"name":"u"},"links":{}}],"page":1,"size":1,"next":""}"#;
const TAG_BODY: &str = r#"{"name":"v1","type":"tag","target":{"hash":"deadbeef","type":"commit"}}"#;

#[tokio::test]
async fn s1_basic_auth_collection_read() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/2.0/repositories/w/r/commits/abc/comments")
            .header("authorization", "Basic dTpw");
        then.status(200).header("content-type", "application/json").body(COMMENTS_BODY);
    });

    let provider = configured(&server, json!({"username": "u", "password": "p"})).await;
    assert_eq!(provider.config().unwrap().auth_mode(), AuthMode::Basic);
    let outcome = provider
        .read_data_source(
            "bitbucket_commit_comments",
            &json!({"workspace": "w", "repo_slug": "r", "commit": "abc"}),
            &ReadOptions::default(),
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(outcome.attributes["comments"][0]["id"], 1);
    assert_eq!(outcome.attributes["comments"][0]["content"]["raw"], "x");
    assert_eq!(outcome.attributes["comments"][0]["user"], json!({"name": "u"}));
    assert_eq!(outcome.attributes["page"], 1);
    assert_eq!(outcome.id, "w/r/commits/abc/comments");
}

#[tokio::test]
async fn s2_oauth_token_scalar_read() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/2.0/repositories/w/r/refs/tags/v1")
            .header("authorization", "Bearer T");
        then.status(200).body(TAG_BODY);
    });

    let provider = configured(&server, json!({"oauth_token": "T"})).await;
    let outcome = provider
        .read_data_source(
            "bitbucket_tag",
            &json!({"workspace": "w", "repo_slug": "r", "tag_name": "v1"}),
            &ReadOptions::default(),
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(outcome.attributes["name"], "v1");
    assert_eq!(outcome.attributes["target_hash"], "deadbeef");
    assert_eq!(outcome.id, "w/r/v1");
}

#[tokio::test]
async fn s3_conflicting_auth_fails_before_any_request() {
    let server = MockServer::start();
    let any = server.mock(|_, then| {
        then.status(200).body("{}");
    });

    let provider = BitbucketProvider::new()
        .unwrap()
        .with_settings(settings(&server))
        .with_env_lookup(|_| None);
    let diagnostics = provider
        .configure(&json!({"username": "u", "password": "p", "oauth_token": "T"}))
        .await;

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].summary, "invalid provider configuration");
    assert!(diagnostics[0].detail.contains("basic"), "{}", diagnostics[0].detail);
    assert!(diagnostics[0].detail.contains("oauth-token"), "{}", diagnostics[0].detail);
    assert!(provider.config().is_none());

    let failed = provider
        .read_data_source(
            "bitbucket_tag",
            &json!({"workspace": "w", "repo_slug": "r", "tag_name": "v1"}),
            &ReadOptions::default(),
        )
        .await;
    assert!(failed.is_err());
    assert_eq!(any.calls(), 0);
}

#[tokio::test]
async fn auth_exclusivity_holds_for_every_pair_of_modes() {
    let server = MockServer::start();
    let any = server.mock(|_, then| {
        then.status(200).body("{}");
    });
    let pairs = [
        (
            json!({"username": "u", "password": "p", "oauth_client_id": "id", "oauth_client_secret": "s"}),
            ["basic", "oauth-client-credentials"],
        ),
        (json!({"username": "u", "password": "p", "oauth_token": "T"}), ["basic", "oauth-token"]),
        (
            json!({"oauth_client_id": "id", "oauth_client_secret": "s", "oauth_token": "T"}),
            ["oauth-client-credentials", "oauth-token"],
        ),
    ];
    for (config, groups) in pairs {
        let provider = BitbucketProvider::new()
            .unwrap()
            .with_settings(settings(&server))
            .with_env_lookup(|_| None);
        let diagnostics = provider.configure(&config).await;
        assert_eq!(diagnostics.len(), 1, "{config}");
        for group in groups {
            assert!(diagnostics[0].detail.contains(group), "{}", diagnostics[0].detail);
        }
    }
    let incomplete = [
        json!({"username": "u"}),
        json!({"password": "p"}),
        json!({"oauth_client_id": "id"}),
        json!({"oauth_client_secret": "s"}),
    ];
    for config in incomplete {
        let provider = BitbucketProvider::new()
            .unwrap()
            .with_settings(settings(&server))
            .with_env_lookup(|_| None);
        assert_eq!(provider.configure(&config).await.len(), 1, "{config}");
    }
    assert_eq!(any.calls(), 0);
}

#[tokio::test]
async fn s4_not_found_names_the_inputs() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/2.0/repositories/w/r/issues/99");
        then.status(404).body(r#"{"type":"error","error":{"message":"Resource not found"}}"#);
    });

    let provider = configured(&server, json!({"oauth_token": "T"})).await;
    let diagnostics = provider
        .read_data_source(
            "bitbucket_issue",
            &json!({"workspace": "w", "repo_slug": "r", "issue_id": "99"}),
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.binding.as_deref(), Some("bitbucket_issue"));
    assert!(diagnostic.summary.contains("not found"), "{}", diagnostic.summary);
    for needle in ["99", "\"w\"", "\"r\""] {
        assert!(diagnostic.detail.contains(needle), "{needle} missing from {}", diagnostic.detail);
    }
}

#[tokio::test]
async fn short_credentials_leave_provider_text_intact() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/2.0/repositories/w/r/issues/99");
        then.status(404).body(r#"{"type":"error","error":{"message":"no issue for user u with p"}}"#);
    });

    let provider = configured(&server, json!({"username": "u", "password": "p"})).await;
    let diagnostics = provider
        .read_data_source(
            "bitbucket_issue",
            &json!({"workspace": "w", "repo_slug": "r", "issue_id": "99"}),
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();

    let detail = &diagnostics[0].detail;
    for needle in ["workspace=\"w\"", "repo_slug=\"r\"", "repositories/w/r/issues/99", "[GET http"] {
        assert!(detail.contains(needle), "{needle} missing from {detail}");
    }
    assert!(detail.contains("with <redacted>"), "{detail}");
}

#[tokio::test]
async fn s5_query_parameters_are_encoded() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/2.0/repositories/w/r/refs")
            .query_param("q", "name~main")
            .query_param("sort", "-name")
            .header_missing("authorization");
        then.status(200).body(r#"{"values":[{"name":"main","type":"branch"}],"page":1,"size":1}"#);
    });

    let provider = configured(&server, json!({})).await;
    assert_eq!(provider.config().unwrap().auth_mode(), AuthMode::Unauthenticated);
    let outcome = provider
        .read_data_source(
            "bitbucket_repository_refs",
            &json!({"workspace": "w", "repo_slug": "r", "q": "name~main", "sort": "-name"}),
            &ReadOptions::default(),
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(outcome.attributes["refs"][0]["name"], "main");
    assert_eq!(outcome.id, "w/r/refs");
}

#[tokio::test]
async fn s6_cancellation_mid_request_is_a_cancelled_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/2.0/repositories/w/r/refs/tags/v1");
        then.status(200).delay(Duration::from_secs(5)).body(TAG_BODY);
    });

    let provider = configured(&server, json!({"oauth_token": "T"})).await;
    let cancel = CancellationToken::new();
    let trip = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trip.cancel();
    });

    let diagnostics = provider
        .read_data_source(
            "bitbucket_tag",
            &json!({"workspace": "w", "repo_slug": "r", "tag_name": "v1"}),
            &ReadOptions::with_cancel(cancel),
        )
        .await
        .unwrap_err();
    let cancelled = ErrorKind::Transport(TransportCause::Cancelled).to_string();
    assert!(diagnostics[0].summary.ends_with(&cancelled), "{}", diagnostics[0].summary);
}

#[tokio::test]
async fn client_credentials_share_one_token_across_reads() {
    let server = MockServer::start();
    let token = server.mock(|when, then| {
        when.method(POST)
            .path("/site/oauth2/access_token")
            // base64("id:s3cret")
            .header("authorization", "Basic aWQ6czNjcmV0")
            .body("grant_type=client_credentials");
        then.status(200)
            .body(r#"{"access_token":"tok-1","token_type":"bearer","expires_in":3600,"scopes":"repository"}"#);
    });
    let api = server.mock(|when, then| {
        when.method(GET)
            .path("/2.0/repositories/w/r/refs/tags/v1")
            .header("authorization", "Bearer tok-1");
        then.status(200).body(TAG_BODY);
    });

    let provider = configured(&server, json!({"oauth_client_id": "id", "oauth_client_secret": "s3cret"})).await;
    let inputs = json!({"workspace": "w", "repo_slug": "r", "tag_name": "v1"});
    let options = ReadOptions::default();
    let reads = (0..4).map(|_| provider.read_data_source("bitbucket_tag", &inputs, &options));
    for outcome in join_all(reads).await {
        assert_eq!(outcome.unwrap().id, "w/r/v1");
    }

    assert_eq!(token.calls(), 1);
    assert_eq!(api.calls(), 4);
}

#[tokio::test]
async fn token_endpoint_rejection_is_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/site/oauth2/access_token");
        then.status(401).body(r#"{"error":"invalid_client","error_description":"Invalid OAuth client credentials"}"#);
    });

    let provider = configured(&server, json!({"oauth_client_id": "id", "oauth_client_secret": "wrong-secret"})).await;
    let diagnostics = provider
        .read_data_source("bitbucket_current_user", &json!({}), &ReadOptions::default())
        .await
        .unwrap_err();
    assert!(diagnostics[0].summary.ends_with(&ErrorKind::Unauthorized.to_string()), "{}", diagnostics[0].summary);
}

#[tokio::test]
async fn concurrent_reads_match_sequential_reads() {
    let server = MockServer::start();
    for index in 0..8 {
        server.mock(move |when, then| {
            when.method(GET).path(format!("/2.0/repositories/w/r/refs/tags/v{index}"));
            then.status(200)
                .delay(Duration::from_millis(20 * (8 - index)))
                .body(json!({"name": format!("v{index}"), "target": {"hash": format!("h{index}")}}).to_string());
        });
    }

    let provider = configured(&server, json!({"oauth_token": "T"})).await;
    let options = ReadOptions::default();
    let inputs: Vec<Value> = (0..8)
        .map(|index| json!({"workspace": "w", "repo_slug": "r", "tag_name": format!("v{index}")}))
        .collect();

    let mut sequential = Vec::new();
    for input in &inputs {
        sequential.push(provider.read_data_source("bitbucket_tag", input, &options).await.unwrap());
    }
    let concurrent: Vec<_> = join_all(inputs.iter().map(|input| provider.read_data_source("bitbucket_tag", input, &options)))
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert_eq!(concurrent, sequential);
    assert_eq!(concurrent[3].attributes["target_hash"], "h3");
}

#[tokio::test]
async fn every_binding_requests_its_rendered_path() {
    let server = MockServer::start();
    let not_found = server.mock(|when, then| {
        when.method(GET);
        then.status(404);
    });
    let provider = configured(&server, json!({"oauth_token": "T"})).await;

    let mut requests = 0;
    for spec in provider.registry().data_sources() {
        let inputs: serde_json::Map<String, Value> = spec
            .path_params()
            .map(|param| {
                let value = match param.param_type {
                    ParamType::Integer => json!(7),
                    ParamType::String => json!(format!("{} x/y", param.name)),
                };
                (param.name.to_string(), value)
            })
            .collect();
        let expected = build_path(spec.path, |name| {
            inputs.get(name).map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
        })
        .unwrap();
        assert!(!expected.contains(' ') && !expected.contains("x/y"), "{}: {expected}", spec.name);

        let diagnostics = provider
            .read_data_source(spec.name, &Value::Object(inputs), &ReadOptions::default())
            .await
            .unwrap_err();
        requests += 1;
        let diagnostic = &diagnostics[0];
        assert!(diagnostic.summary.ends_with("not found"), "{}: {}", spec.name, diagnostic.summary);
        let url = format!("{}/{expected}]", server.base_url());
        assert!(diagnostic.detail.ends_with(&url), "{}: {}", spec.name, diagnostic.detail);
        assert_eq!(not_found.calls(), requests, "{}", spec.name);
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn credentials_never_reach_logs_or_diagnostics() {
    const PASSWORD: &str = "app-pass-9f8e7d";
    const TOKEN: &str = "tok-5a4b3c2d1e";
    const SECRET: &str = "consumer-secret-0011";

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(captured.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let echoed = format!("{PASSWORD} {TOKEN} {SECRET}");
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/site/oauth2/access_token");
        then.status(200)
            .body(r#"{"access_token":"issued-access-token","token_type":"bearer","expires_in":3600}"#);
    });
    server.mock(|when, then| {
        when.method(GET).path("/2.0/repositories/w/r/refs/tags/missing");
        then.status(404)
            .body(json!({"type": "error", "error": {"message": format!("no tag; auth was {echoed}")}}).to_string());
    });
    server.mock(|when, then| {
        when.method(GET).path("/2.0/repositories/w/r/refs/tags/broken");
        then.status(200).body(json!({"name": 5, "echo": echoed}).to_string());
    });
    server.mock(|when, then| {
        when.method(GET).path("/2.0/user");
        then.status(400)
            .body(json!({"type": "error", "error": {"message": format!("bad credentials {echoed}")}}).to_string());
    });

    let configs = [
        (json!({"username": "u", "password": PASSWORD}), PASSWORD),
        (json!({"oauth_token": TOKEN}), TOKEN),
        (json!({"oauth_client_id": "id", "oauth_client_secret": SECRET}), SECRET),
    ];
    for (config, secret) in configs {
        let provider = configured(&server, config).await;
        let mut outputs = vec![format!("{provider:?}"), format!("{:?}", provider.config())];
        for (name, inputs) in [
            ("bitbucket_tag", json!({"workspace": "w", "repo_slug": "r", "tag_name": "missing"})),
            ("bitbucket_tag", json!({"workspace": "w", "repo_slug": "r", "tag_name": "broken"})),
            ("bitbucket_current_user", json!({})),
        ] {
            let diagnostics = provider
                .read_data_source(name, &inputs, &ReadOptions::default())
                .await
                .unwrap_err();
            outputs.extend(diagnostics.iter().map(|diagnostic| format!("{diagnostic} {diagnostic:?}")));
        }
        outputs.push(captured.text());
        for output in &outputs {
            assert!(!output.contains(secret), "{secret} leaked into: {output}");
        }
    }
    assert!(captured.text().contains("data source read failed"));
}

#[test]
fn transport_settings_come_from_the_environment_when_not_supplied() {
    temp_env::with_vars(
        [
            ("BITBUCKET_API_BASE", Some("https://api.example.com/")),
            ("BITBUCKET_OAUTH_TOKEN", None::<&str>),
        ],
        || {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let provider = BitbucketProvider::new().unwrap();
            let diagnostics = runtime.block_on(provider.configure(&json!({"oauth_token": "T"})));
            assert_eq!(diagnostics.len(), 1);
            assert!(diagnostics[0].detail.contains("api.example.com"), "{}", diagnostics[0].detail);
        },
    );
}
