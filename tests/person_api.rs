use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use newrest::{
    InMemoryPersonService, Person, PersonController, PersonService, Response, Router,
    ServiceError, Status, routes,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// Wraps the in-memory store and records which operations were invoked.
#[derive(Default)]
struct Recording {
    inner: InMemoryPersonService,
    calls: Mutex<Vec<&'static str>>,
}

impl Recording {
    fn seeded(people: impl IntoIterator<Item = Person>) -> Self {
        Self { inner: InMemoryPersonService::with_people(people), calls: Mutex::default() }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PersonService for Recording {
    async fn find_all(&self) -> Result<Vec<Person>, ServiceError> {
        self.calls.lock().push("find_all");
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, ServiceError> {
        self.calls.lock().push("find_by_id");
        self.inner.find_by_id(id).await
    }

    async fn create(&self, person: Person) -> Result<Person, ServiceError> {
        self.calls.lock().push("create");
        self.inner.create(person).await
    }

    async fn update(&self, person: Person) -> Result<Person, ServiceError> {
        self.calls.lock().push("update");
        self.inner.update(person).await
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.calls.lock().push("delete");
        self.inner.delete(id).await
    }
}

/// Every operation fails.
struct Broken;

#[async_trait]
impl PersonService for Broken {
    async fn find_all(&self) -> Result<Vec<Person>, ServiceError> {
        Err(ServiceError::Unavailable("connection refused".into()))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Person>, ServiceError> {
        Err(ServiceError::Unavailable("connection refused".into()))
    }

    async fn create(&self, _person: Person) -> Result<Person, ServiceError> {
        Err(ServiceError::Unavailable("connection refused".into()))
    }

    async fn update(&self, _person: Person) -> Result<Person, ServiceError> {
        Err(ServiceError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _id: i64) -> Result<(), ServiceError> {
        Err(ServiceError::Unavailable("connection refused".into()))
    }
}

fn ana() -> Person {
    Person {
        id: 1,
        first_name: "Ana".into(),
        last_name: "Souza".into(),
        address: "Recife".into(),
        gender: "Female".into(),
    }
}

fn app_with(people: Vec<Person>) -> (Router<PersonController>, Arc<Recording>) {
    let svc = Arc::new(Recording::seeded(people));
    (routes::app(svc.clone()), svc)
}

async fn send(app: &Router<PersonController>, method: http::Method, uri: &str, body: &str) -> Response {
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Bytes::copy_from_slice(body.as_bytes()))
        .unwrap();
    app.call(req).await
}

fn text(res: &Response) -> &str {
    std::str::from_utf8(res.body()).unwrap()
}

fn json_body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

#[tokio::test]
async fn list_returns_everyone() {
    let (app, _) = app_with(vec![ana()]);
    let res = send(&app, http::Method::GET, "/person/pessoa", "").await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(
        json_body(&res),
        json!([{ "id": 1, "firstName": "Ana", "lastName": "Souza", "address": "Recife", "gender": "Female" }])
    );
}

#[tokio::test]
async fn list_of_empty_store_is_empty_array() {
    let (app, _) = app_with(vec![]);
    let res = send(&app, http::Method::GET, "/person/pessoa", "").await;
    assert_eq!((res.status_code(), text(&res)), (Status::Ok, "[]"));
}

#[tokio::test]
async fn get_by_id() {
    let (app, _) = app_with(vec![ana()]);
    let res = send(&app, http::Method::GET, "/person/pessoa/1", "").await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res)["firstName"], "Ana");
}

#[tokio::test]
async fn get_unknown_id_is_bad_request_not_404() {
    let (app, _) = app_with(vec![ana()]);
    let res = send(&app, http::Method::GET, "/person/pessoa/77", "").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(text(&res), "Ooops! Nenhuma pessoa encontrada...");
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let (app, svc) = app_with(vec![]);
    let res = send(&app, http::Method::GET, "/person/pessoa/abc", "").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(text(&res), "The value 'abc' is not valid.");
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn create_stores_and_answers_201() {
    let (app, svc) = app_with(vec![]);
    let res = send(
        &app,
        http::Method::POST,
        "/person/pessoa/cadastrar",
        r#"{"firstName":"Bia","lastName":"Lima"}"#,
    )
    .await;
    assert_eq!(res.status_code(), Status::Created);
    assert_eq!(res.headers()["location"], "/person/pessoa/1");

    let body = json_body(&res);
    assert_eq!(body["message"], "Pessoa cadastrada com sucesso!");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["firstName"], "Bia");
    assert_eq!(svc.calls(), ["create"]);
}

#[tokio::test]
async fn create_with_empty_first_name_lists_one_error() {
    let (app, svc) = app_with(vec![]);
    let res = send(&app, http::Method::POST, "/person/pessoa/cadastrar", r#"{"firstName":""}"#).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(
        json_body(&res),
        json!([{ "code": 400, "message": "O primeiro nome deve ser informado para cadastro!" }])
    );
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn create_with_null_first_name_lists_one_error() {
    let (app, svc) = app_with(vec![]);
    let res = send(&app, http::Method::POST, "/person/pessoa/cadastrar", r#"{"firstName":null}"#).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(
        json_body(&res),
        json!([{ "code": 400, "message": "O primeiro nome deve ser informado para cadastro!" }])
    );
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn null_optional_fields_are_accepted() {
    let (app, _) = app_with(vec![ana()]);

    let res = send(
        &app,
        http::Method::POST,
        "/person/pessoa/cadastrar",
        r#"{"firstName":"Bia","lastName":null}"#,
    )
    .await;
    assert_eq!(res.status_code(), Status::Created);
    assert_eq!(json_body(&res)["data"]["lastName"], "");

    let res = send(
        &app,
        http::Method::PUT,
        "/person/pessoa/atualizar",
        r#"{"id":1,"firstName":"A","gender":null}"#,
    )
    .await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res)["gender"], "");
}

#[tokio::test]
async fn repeated_invalid_creates_do_not_accumulate_errors() {
    let (app, _) = app_with(vec![]);
    for _ in 0..3 {
        let res = send(&app, http::Method::POST, "/person/pessoa/cadastrar", "{}").await;
        assert_eq!(json_body(&res).as_array().map(Vec::len), Some(1));
    }
}

#[tokio::test]
async fn create_without_payload_never_reaches_service() {
    let (app, svc) = app_with(vec![]);
    for body in ["", "null"] {
        let res = send(&app, http::Method::POST, "/person/pessoa/cadastrar", body).await;
        assert_eq!(res.status_code(), Status::BadRequest);
        assert_eq!(text(&res), "Ooops! Nenhum dado foi informado para cadastro...");
    }
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, svc) = app_with(vec![]);
    let res = send(&app, http::Method::POST, "/person/pessoa/cadastrar", "{firstName").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn update_replaces_record() {
    let (app, svc) = app_with(vec![ana()]);
    let res = send(
        &app,
        http::Method::PUT,
        "/person/pessoa/atualizar",
        r#"{"id":1,"firstName":"Ana Maria"}"#,
    )
    .await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res)["firstName"], "Ana Maria");
    assert_eq!(svc.calls(), ["update"]);
}

#[tokio::test]
async fn update_needs_payload_and_positive_id() {
    let (app, svc) = app_with(vec![ana()]);

    let res = send(&app, http::Method::PUT, "/person/pessoa/atualizar", "").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(text(&res), "Ooops! Ao menos algum dado deve ser informado para a atualização.");

    for body in [r#"{"firstName":"X"}"#, r#"{"id":-3,"firstName":"X"}"#] {
        let res = send(&app, http::Method::PUT, "/person/pessoa/atualizar", body).await;
        assert_eq!(res.status_code(), Status::BadRequest);
        assert_eq!(text(&res), "Ooops! É preciso informar o id da pessoa para atualização...");
    }
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn delete_zero_is_refused() {
    let (app, svc) = app_with(vec![ana()]);
    let res = send(&app, http::Method::DELETE, "/person/pessoa/deletar/0", "").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(text(&res), "Ooops! É necessário informado o identificador para exclusão...");
    assert!(svc.calls().is_empty());
}

#[tokio::test]
async fn delete_confirms_even_when_nothing_was_there() {
    let (app, svc) = app_with(vec![]);
    let res = send(&app, http::Method::DELETE, "/person/pessoa/deletar/42", "").await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(text(&res), "Pessoa de identificador 42 excluída com sucesso!");
    assert_eq!(svc.calls(), ["delete"]);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (app, _) = app_with(vec![ana()]);
    send(&app, http::Method::DELETE, "/person/pessoa/deletar/1", "").await;
    let res = send(&app, http::Method::GET, "/person/pessoa/1", "").await;
    assert_eq!(res.status_code(), Status::BadRequest);
}

#[tokio::test]
async fn service_failures_become_500_with_message() {
    let app = routes::app(Arc::new(Broken));
    let cases = [
        (http::Method::GET, "/person/pessoa", ""),
        (http::Method::GET, "/person/pessoa/1", ""),
        (http::Method::POST, "/person/pessoa/cadastrar", r#"{"firstName":"Ana"}"#),
        (http::Method::PUT, "/person/pessoa/atualizar", r#"{"id":1,"firstName":"Ana"}"#),
        (http::Method::DELETE, "/person/pessoa/deletar/1", ""),
    ];
    for (method, uri, body) in cases {
        let res = send(&app, method.clone(), uri, body).await;
        assert_eq!(res.status_code(), Status::InternalServerError, "{method} {uri}");
        assert_eq!(text(&res), "person store unavailable: connection refused");
    }
}

#[tokio::test]
async fn readiness_follows_the_service() {
    let (app, _) = app_with(vec![]);
    assert_eq!(text(&send(&app, http::Method::GET, "/readyz", "").await), "ready");
    assert_eq!(text(&send(&app, http::Method::GET, "/healthz", "").await), "ok");

    let broken = routes::app(Arc::new(Broken));
    let res = send(&broken, http::Method::GET, "/readyz", "").await;
    assert_eq!(res.status_code(), Status::ServiceUnavailable);
    assert_eq!(text(&res), "not ready");
}

#[tokio::test]
async fn wrong_method_on_known_path_is_405() {
    let (app, _) = app_with(vec![]);
    let res = send(&app, http::Method::POST, "/person/pessoa", "").await;
    assert_eq!(res.status_code(), Status::MethodNotAllowed);
}
