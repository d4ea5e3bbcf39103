use crate::Result;
use crate::api::resources::{
    Concepts, Equations, Images, Problems, RequestPayload, Resource, ResourceKind, Tags,
    Variants,
};
use crate::api::transport::{
    DEFAULT_TIMEOUT_SECS, HttpRequest, ReqwestTransport, Transport, fetch_empty, fetch_json,
};
use crate::core::result::ResultExt;
use crate::error::{CustomError, ErrorKind};
use crate::schema::inputs::{Identified, SearchQuery};
use crate::utils::validation::{
    validate_schema, validate_schema_array, validate_url, validate_uuid,
};
use reqwest::{Method, Url};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";

/// Connection settings, fixed when the client is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub version: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port: 10105,
            version: "v1".to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/api/{}/",
            self.protocol, self.host, self.port, self.version
        )
    }
}

/// Entry point to the backend API.
///
/// Cheap to clone; every clone shares the same transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Build a client that talks HTTP through reqwest.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let transport = ReqwestTransport::new(timeout)
            .map_err(|e| CustomError::from_error(ErrorKind::Generic, e))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client on top of a caller-supplied transport.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let raw = config.base_url();
        validate_url(&raw)?;
        let base_url = Url::parse(&raw).map_err(|e| {
            CustomError::from_error(ErrorKind::Generic, e)
                .with_extra("baseUrl", Value::String(raw.clone()))
        })?;

        let mut headers = Vec::new();
        if let Some(key) = config.api_key.filter(|k| !k.is_empty()) {
            headers.push((API_KEY_HEADER.to_string(), key));
        }

        Ok(Self {
            base_url,
            headers,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CustomError::from_error(ErrorKind::Generic, e))
    }

    fn request(&self, method: Method, url: Url) -> HttpRequest {
        self.headers
            .iter()
            .fold(HttpRequest::new(method, url), |request, (name, value)| {
                request.header(name.as_str(), value.as_str())
            })
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient {
            api: self.clone(),
            _resource: PhantomData,
        }
    }

    pub fn tags(&self) -> ResourceClient<Tags> {
        self.resource()
    }

    pub fn equations(&self) -> ResourceClient<Equations> {
        self.resource()
    }

    pub fn images(&self) -> ResourceClient<Images> {
        self.resource()
    }

    pub fn concepts(&self) -> ResourceClient<Concepts> {
        self.resource()
    }

    pub fn problems(&self) -> ResourceClient<Problems> {
        self.resource()
    }

    pub fn variants(&self) -> ResourceClient<Variants> {
        self.resource()
    }

    /// `GET health`, answered with 204 when the backend is up.
    pub async fn health_check(&self) -> Result<()> {
        let url = self.url("health")?;
        fetch_empty(self.transport.as_ref(), self.request(Method::GET, url)).await
    }
}

/// Operations on one resource.
///
/// Each call validates its input locally, sends the request, then validates
/// the response against the resource model. Local failures never reach the
/// network; response mismatches come back as `ApiModel` errors.
pub struct ResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn local_error(&self, stage: &str, error: CustomError) -> CustomError {
        let label = self.kind().label();
        let mut messages = vec![format!("{} {} schema error", label, stage.to_lowercase())];
        if error.messages() != [ErrorKind::Validation.default_message()] {
            messages.extend(error.messages().iter().cloned());
        }
        CustomError::validation_with(error.field_errors(), messages)
            .with_name(format!("{}{}SchemaError", label, stage))
            .with_resource(self.kind())
    }

    fn check_id(&self, id: &str) -> Result<uuid::Uuid> {
        let message = format!("{} id is invalid", self.kind().label());
        validate_uuid(&Value::String(id.to_string()), &message).with_resource(self.kind())
    }

    fn entity_url(&self, id: &uuid::Uuid) -> Result<Url> {
        self.api
            .url(&format!("{}/id/{}", self.kind().segment(), id))
    }

    /// Transport, JSON and API failures are logged here; schema drift is
    /// logged where it is promoted.
    async fn fetch(&self, request: HttpRequest) -> Result<Value> {
        fetch_json(self.api.transport.as_ref(), request)
            .await
            .log_err(&format!("{} request failed", self.kind().label()))
    }

    async fn send_for_model(&self, request: HttpRequest) -> Result<R::Model> {
        let raw = self.fetch(request).await?;
        validate_schema::<R::Model>(&raw)
            .with_resource(self.kind())
            .into_api_model(format!("{} model out of sync", self.kind().label()))
    }

    /// Search by free text. Tags search by tag name.
    pub async fn search(&self, query: &Value) -> Result<Vec<R::Summary>> {
        let query: SearchQuery =
            validate_schema(query).map_err(|e| self.local_error("Search", e))?;

        let mut url = self.api.url(self.kind().segment())?;
        url.query_pairs_mut()
            .append_pair(R::SEARCH_PARAM, query.search.as_str());

        let raw = self.fetch(self.api.request(Method::GET, url)).await?;
        validate_schema_array::<R::Summary>(&raw)
            .with_resource(self.kind())
            .into_api_model(format!("{} array model out of sync", self.kind().label()))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<R::Model> {
        let id = self.check_id(id)?;
        let url = self.entity_url(&id)?;
        self.send_for_model(self.api.request(Method::GET, url)).await
    }

    pub async fn create(&self, input: &Value) -> Result<R::Model> {
        let input: R::Create =
            validate_schema(input).map_err(|e| self.local_error("Create", e))?;
        let body = input.to_body()?;

        let url = self.api.url(self.kind().segment())?;
        self.send_for_model(self.api.request(Method::POST, url).body(body))
            .await
    }

    pub async fn update(&self, input: &Value) -> Result<R::Model> {
        let input: R::Update =
            validate_schema(input).map_err(|e| self.local_error("Update", e))?;
        let body = input.to_body()?;

        let url = self.entity_url(&input.id())?;
        self.send_for_model(self.api.request(Method::PATCH, url).body(body))
            .await
    }

    /// Delete a record; the backend answers with the removed record.
    pub async fn delete_by_id(&self, id: &str) -> Result<R::Model> {
        let id = self.check_id(id)?;
        let url = self.entity_url(&id)?;
        self.send_for_model(self.api.request(Method::DELETE, url))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::api::transport::{RequestBody, TransportError};
    use serde_json::json;

    const ID: &str = "0191b6a4-2c4b-7cc1-9a57-3c1f36c2e5f1";

    fn client(transport: &Arc<MockTransport>) -> ApiClient {
        let config = ApiConfig {
            api_key: Some("secret".to_string()),
            ..ApiConfig::default()
        };
        ApiClient::with_transport(config, transport.clone()).expect("client")
    }

    #[test]
    fn test_base_url() {
        let config = ApiConfig {
            protocol: "https".to_string(),
            host: "cms.example.com".to_string(),
            port: 443,
            version: "v2".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(config.base_url(), "https://cms.example.com:443/api/v2/");
    }

    #[test]
    fn test_client_creation() {
        assert!(ApiClient::new(ApiConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let config = ApiConfig {
            host: "bad host".to_string(),
            ..ApiConfig::default()
        };
        let error = ApiClient::new(config).err().expect("invalid base url");
        assert_eq!(error.kind(), ErrorKind::Generic);

        let config = ApiConfig {
            protocol: "ftp".to_string(),
            ..ApiConfig::default()
        };
        let error = ApiClient::new(config).err().expect("unsupported protocol");
        assert!(error.message().contains("must start with http://"));
    }

    #[tokio::test]
    async fn test_create_tag_success() {
        let transport =
            Arc::new(MockTransport::new().respond(201, json!({ "id": ID, "title": "x" })));

        let tag = client(&transport)
            .tags()
            .create(&json!({ "title": "  xyz " }))
            .await
            .expect("created tag");
        assert_eq!(tag.title, "x");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.as_str(), "http://localhost:10105/api/v1/tags");
        assert_eq!(requests[0].body, RequestBody::Json(json!({ "title": "xyz" })));
        assert!(
            requests[0]
                .headers
                .contains(&("x-api-key".to_string(), "secret".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_invalid_input_skips_network() {
        let transport = Arc::new(MockTransport::new());

        let error = client(&transport)
            .tags()
            .create(&json!({ "title": "" }))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.name(), Some("TagCreateSchemaError"));
        assert_eq!(error.resource(), Some(ResourceKind::Tag));
        assert!(!error.field_errors()["title"].is_empty());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_rejects_bad_uuid() {
        let transport = Arc::new(MockTransport::new());

        let error = client(&transport)
            .equations()
            .get_by_id("../../admin")
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.name(), Some("UuidSchemaError"));
        assert_eq!(error.resource(), Some(ResourceKind::Equation));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_response_drift_is_api_model() {
        let transport = Arc::new(
            MockTransport::new().respond(200, json!({ "id": "not-a-uuid", "title": "x" })),
        );

        let error = client(&transport).tags().get_by_id(ID).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ApiModel);
        assert_eq!(error.message(), "Tag model out of sync");
        assert!(!error.field_errors()["id"].is_empty());
        assert_eq!(error.resource(), Some(ResourceKind::Tag));
    }

    #[tokio::test]
    async fn test_search_uses_resource_param() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(200, json!([{ "id": ID, "title": "kinematics" }]))
                .respond(200, json!([])),
        );
        let api = client(&transport);

        let tags = api
            .tags()
            .search(&json!({ "search": " kin " }))
            .await
            .expect("tags");
        assert_eq!(tags.len(), 1);
        let concepts = api
            .concepts()
            .search(&json!({ "search": "" }))
            .await
            .expect("concepts");
        assert!(concepts.is_empty());

        let requests = transport.requests();
        assert_eq!(
            requests[0].url.as_str(),
            "http://localhost:10105/api/v1/tags?tagName=kin"
        );
        assert_eq!(
            requests[1].url.as_str(),
            "http://localhost:10105/api/v1/concepts?search="
        );
    }

    #[tokio::test]
    async fn test_search_array_drift() {
        let transport = Arc::new(MockTransport::new().respond(200, json!({ "id": ID })));

        let error = client(&transport)
            .tags()
            .search(&json!({ "search": "a" }))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ApiModel);
        assert_eq!(error.message(), "Tag array model out of sync");
    }

    #[tokio::test]
    async fn test_search_requires_text() {
        let transport = Arc::new(MockTransport::new());

        let error = client(&transport)
            .tags()
            .search(&json!({}))
            .await
            .unwrap_err();
        assert_eq!(error.name(), Some("TagSearchSchemaError"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_patches_entity_url() {
        let transport =
            Arc::new(MockTransport::new().respond(200, json!({ "id": ID, "title": "renamed" })));

        let tag = client(&transport)
            .tags()
            .update(&json!({ "id": ID, "title": "renamed" }))
            .await
            .expect("updated");
        assert_eq!(tag.title, "renamed");

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(
            request.url.as_str(),
            format!("http://localhost:10105/api/v1/tags/id/{ID}")
        );
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let transport =
            Arc::new(MockTransport::new().respond(200, json!({ "id": ID, "title": "gone" })));

        let tag = client(&transport)
            .tags()
            .delete_by_id(ID)
            .await
            .expect("deleted");
        assert_eq!(tag.title, "gone");
        assert_eq!(transport.requests()[0].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_transport_failure_is_fetch() {
        let transport = Arc::new(
            MockTransport::new().fail(TransportError::Other("network unreachable".to_string())),
        );

        let error = client(&transport).tags().get_by_id(ID).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Fetch);
        assert!(error.cause().is_some());
    }

    #[tokio::test]
    async fn test_logged_api_error_is_returned_unchanged() {
        let transport = Arc::new(MockTransport::new().respond(
            503,
            json!({ "httpCode": 503, "errorCode": 7, "title": "t", "error": "maintenance", "href": "" }),
        ));

        let error = client(&transport)
            .problems()
            .search(&json!({ "search": "" }))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status(), Some(503));
        assert_eq!(error.messages(), ["maintenance"]);
    }

    #[tokio::test]
    async fn test_health_check() {
        let transport = Arc::new(MockTransport::new().respond_raw(204, ""));
        client(&transport).health_check().await.expect("healthy");
        assert_eq!(
            transport.requests()[0].url.as_str(),
            "http://localhost:10105/api/v1/health"
        );
    }
}
