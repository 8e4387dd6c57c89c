//! End-to-end tests for `SolrClient` against a mocked Solr core.

use std::time::Duration;

use assert2::{check, let_assert};
use serde::Deserialize;
use serde_json::json;
use solrq::{Error, FieldTerms, Query, QuerySpec, SolrClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const SELECT: &str = "/solr/books/select";

fn books() -> serde_json::Value {
    json!({
        "responseHeader": {"status": 0, "QTime": 1},
        "response": {
            "numFound": 2,
            "start": 0,
            "docs": [
                {"id": "0553573403", "name": "A Game of Thrones", "price": 7.99},
                {"id": "0812521390", "name": "The Black Company", "price": 6.99}
            ]
        }
    })
}

fn solr_for(mock_server: &MockServer) -> SolrClient {
    let address = mock_server.address();
    SolrClient::builder()
        .host(address.ip().to_string())
        .port(address.port())
        .core("books")
        .build()
}

async fn mount_books(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SELECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(books()))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn fetch_body_sends_defaults_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELECT))
        .and(query_param("q", "name:game"))
        .and(query_param("defType", "edismax"))
        .and(query_param("debug", "all"))
        .and(query_param("wt", "json"))
        .and(query_param("indent", "true"))
        .and(query_param("fl", "*,[explain]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let solr = solr_for(&mock_server);

    let_assert!(Ok(body) = solr.fetch_body("name:game").await);
    check!(body == books());
}

#[tokio::test]
async fn fetch_body_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELECT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"msg": "undefined field nope", "code": 400}
        })))
        .mount(&mock_server)
        .await;

    let solr = solr_for(&mock_server);

    let_assert!(Err(err) = solr.fetch_body("nope:1").await);
    check!(err.status() == Some(400));

    let_assert!(Some(Ok(detail)) = err.decode_body::<serde_json::Value>());
    check!(detail["error"]["msg"] == "undefined field nope");
}

#[tokio::test]
async fn fetch_body_unknown_core_is_404() {
    let mock_server = MockServer::start().await;
    mount_books(&mock_server).await;

    let mut solr = solr_for(&mock_server);
    solr.server_mut().core = "films".to_string();

    let_assert!(Err(Error::Http { status, .. }) = solr.fetch_body("*:*").await);
    check!(status == 404);
}

#[tokio::test]
async fn fetch_docs_projects_documents() {
    let mock_server = MockServer::start().await;
    mount_books(&mock_server).await;

    let solr = solr_for(&mock_server);

    let_assert!(Ok(docs) = solr.fetch_docs("*:*").await);
    check!(docs.len() == 2);
    check!(docs[0]["id"] == "0553573403");
    check!(docs[1]["id"] == "0812521390");
}

#[tokio::test]
async fn fetch_docs_as_typed() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Book {
        id: String,
        name: String,
        price: f64,
    }

    let mock_server = MockServer::start().await;
    mount_books(&mock_server).await;

    let solr = solr_for(&mock_server);

    let_assert!(Ok(books) = solr.fetch_docs_as::<Book>("*:*").await);
    check!(
        books
            .iter()
            .map(|book| book.name.as_str())
            .collect::<Vec<_>>()
            == ["A Game of Thrones", "The Black Company"]
    );
}

#[tokio::test]
async fn fetch_docs_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"grouped": {}})))
        .mount(&mock_server)
        .await;

    let solr = solr_for(&mock_server);

    let_assert!(Err(Error::MalformedResponse { path }) = solr.fetch_docs("*:*").await);
    check!(path == "/response/docs");
}

#[tokio::test]
async fn structured_query_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELECT))
        .and(query_param("q", "name:game thrones"))
        .and(query_param("rows", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let solr = solr_for(&mock_server);
    let spec = QuerySpec::new()
        .q(FieldTerms::new().field("name", "game").term("thrones"))
        .param("rows", 1);

    let_assert!(Ok(_) = solr.fetch_body(spec).await);
}

#[tokio::test]
async fn repeated_filter_queries_in_order() {
    let mock_server = MockServer::start().await;
    mount_books(&mock_server).await;

    let solr = solr_for(&mock_server);
    let spec = QuerySpec::new()
        .q("*:*")
        .param("fq", ["inStock:true", "price:7.99"]);

    let_assert!(Ok(_) = solr.fetch_body(spec).await);

    let requests = mock_server.received_requests().await.expect("recording");
    let_assert!([request] = requests.as_slice());
    let filters: Vec<_> = request
        .url
        .query_pairs()
        .filter(|(name, _)| name == "fq")
        .map(|(_, value)| value.into_owned())
        .collect();
    check!(filters == ["inStock:true", "price:7.99"]);
}

#[tokio::test]
async fn json_query_spec() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELECT))
        .and(query_param("q", "name:black"))
        .and(query_param("wt", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let solr = solr_for(&mock_server);
    let query: Query = r#"{"q": {"name": "black"}, "wt": "json"}"#.parse().expect("query");

    let_assert!(Ok(docs) = solr.fetch_docs(query).await);
    check!(docs.len() == 2);
}

#[tokio::test]
async fn visit_docs_modes() {
    let mock_server = MockServer::start().await;
    mount_books(&mock_server).await;

    let solr = solr_for(&mock_server);

    let mut seen = 0;
    let_assert!(
        Ok(None) = solr
            .visit_docs("*:*", |_| {
                seen += 1;
                None::<f64>
            })
            .await
    );
    check!(seen == 2);

    let_assert!(
        Ok(Some(prices)) = solr
            .visit_docs("*:*", |doc| doc["price"].as_f64().filter(|p| *p > 7.0))
            .await
    );
    check!(prices == [Some(7.99), None]);
}

#[tokio::test]
async fn for_each_and_map_docs() {
    let mock_server = MockServer::start().await;
    mount_books(&mock_server).await;

    let solr = solr_for(&mock_server);

    let mut names = Vec::new();
    let_assert!(
        Ok(()) = solr
            .for_each_doc("*:*", |doc| names.push(doc["name"].to_string()))
            .await
    );
    check!(names.len() == 2);

    let_assert!(Ok(ids) = solr.map_docs("*:*", |doc| doc["id"].clone()).await);
    check!(ids == [json!("0553573403"), json!("0812521390")]);
}

#[tokio::test]
async fn fetch_body_with_timeout_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SELECT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(books())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let solr = solr_for(&mock_server);

    let_assert!(
        Err(Error::Timeout) = solr
            .fetch_body_with_timeout("*:*", Duration::from_millis(100))
            .await
    );
}

#[tokio::test]
async fn transport_failure_propagates() {
    let solr = SolrClient::builder().host("127.0.0.1").port(1).build();

    let_assert!(Err(err) = solr.fetch_body("*:*").await);
    check!(err.is_connection());
}
