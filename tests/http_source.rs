use std::{net::SocketAddr, time::Duration};

use ci_metrics::source::{Credentials, HttpSource, Source, SourceConfig};
use poem::{
    get, handler,
    listener::{Acceptor, Listener, TcpListener},
    web::Json,
    Request, Route, Server,
};
use serde_json::{json, Value};

#[handler]
fn computer(req: &Request) -> Json<Value> {
    let auth = req.header("Authorization").unwrap_or_default().to_string();
    Json(json!({
        "totalExecutors": 10,
        "busyExecutors": 3,
        "computer": [{"offline": true}],
        "auth": auth,
    }))
}

#[handler]
fn timeline(req: &Request) -> Json<Value> {
    let query = req.uri().query().unwrap_or_default().to_string();
    Json(json!({"events": [{}, {}], "query": query}))
}

#[handler]
fn not_json() -> &'static str {
    "<html>not json</html>"
}

async fn serve() -> SocketAddr {
    let app = Route::new()
        .at("/computer/api/json", get(computer))
        .at("/view/All/timeline/data", get(timeline))
        .at("/queue/api/json", get(not_json));
    let acceptor = TcpListener::bind("127.0.0.1:0")
        .into_acceptor()
        .await
        .unwrap();
    let addr = *acceptor.local_addr()[0].as_socket_addr().unwrap();
    tokio::spawn(Server::new_with_acceptor(acceptor).run(app));
    addr
}

fn source(addr: SocketAddr, user: Option<&str>, password: Option<&str>) -> HttpSource {
    HttpSource::new(&SourceConfig {
        base_url: format!("http://{addr}/"),
        credentials: Credentials {
            user: user.map(Into::into),
            password: password.map(Into::into),
        },
        timeout: Some(Duration::from_secs(5)),
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_json_with_basic_auth() {
    let addr = serve().await;
    let doc = tokio::task::spawn_blocking(move || {
        source(addr, Some("alice"), Some("secret")).fetch("computer")
    })
    .await
    .unwrap();
    assert_eq!(doc.number("totalExecutors"), 10.0);
    assert_eq!(doc.items("computer").len(), 1);
    assert_eq!(doc.str("auth"), Some("Basic YWxpY2U6c2VjcmV0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_fetch_keeps_query() {
    let addr = serve().await;
    let doc = tokio::task::spawn_blocking(move || {
        source(addr, None, None).fetch_raw("view/All/timeline/data?min=1&max=2")
    })
    .await
    .unwrap();
    assert_eq!(doc.len("events"), 2);
    assert_eq!(doc.str("query"), Some("min=1&max=2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn failures_become_empty_documents() {
    let addr = serve().await;
    let (missing, malformed) = tokio::task::spawn_blocking(move || {
        let source = source(addr, None, None);
        (source.fetch("job/nope"), source.fetch("queue"))
    })
    .await
    .unwrap();
    assert!(missing.is_empty());
    assert!(malformed.is_empty());
    assert_eq!(malformed.len("items"), 0);
}
