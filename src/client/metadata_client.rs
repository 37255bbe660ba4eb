use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::auth::{request_access_token, url_from_jwt, AuthSession};
use crate::client::fetch_key::FetchKey;
use crate::config::settings::ClientSettings;
use crate::credentials::{load_credential, Credential};
use crate::error::{ClientError, Result};
use crate::table::{json_to_table, Table};
use crate::utils::constants::{DATA_FIELD, DEFAULT_API_VERSION};

/// Per-call knobs for [`MetadataClient::fetch_data`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Overrides the client's api version for this call.
    pub api_version: Option<String>,
    /// Hand the payload back to the caller instead of only storing it.
    pub return_data: bool,
}

impl FetchOptions {
    pub fn returning() -> Self {
        Self { return_data: true, ..Self::default() }
    }
}

/// Client for the submission export API.
///
/// Holds one credential path, at most one bearer session, and the raw and
/// flattened payloads fetched so far. All mutating calls take `&mut self`,
/// so a single client never runs two fetches at once.
#[derive(Debug)]
pub struct MetadataClient {
    key_file_path: PathBuf,
    api_url: Option<String>,
    api_version: String,
    http: Client,
    session: Option<AuthSession>,
    data_store: HashMap<FetchKey, Value>,
    table_store: HashMap<FetchKey, Table>,
}

impl MetadataClient {
    /// Client that derives the api url from the api key issuer.
    pub fn new(key_file_path: impl Into<PathBuf>) -> Self {
        Self {
            key_file_path: key_file_path.into(),
            api_url: None,
            api_version: DEFAULT_API_VERSION.to_owned(),
            http: Client::new(),
            session: None,
            data_store: HashMap::new(),
            table_store: HashMap::new(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder.build()?;

        let mut client = Self::new(&settings.credentials_path).with_http_client(http);
        client.api_version = settings.api_version.clone();
        if let Some(url) = &settings.api_url {
            client = client.with_api_url(url.clone());
        }
        Ok(client)
    }

    /// Use a fixed api url instead of reading it from the api key.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into().trim_end_matches('/').to_owned());
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn key_file_path(&self) -> &Path {
        &self.key_file_path
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Authorization header of the current session.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.session.as_ref().map(AuthSession::headers)
    }

    pub fn data_store(&self) -> &HashMap<FetchKey, Value> {
        &self.data_store
    }

    pub fn table_store(&self) -> &HashMap<FetchKey, Table> {
        &self.table_store
    }

    pub fn table(&self, key: &FetchKey) -> Option<&Table> {
        self.table_store.get(key)
    }

    async fn load_api_key(&self) -> Result<Credential> {
        load_credential(&self.key_file_path).await
    }

    /// Configured api url, or the one carried by the api key.
    pub fn resolve_api_url(&self, credential: &Credential) -> Result<String> {
        match &self.api_url {
            Some(url) => Ok(url.clone()),
            None => url_from_jwt(credential)
                .inspect_err(|e| error!(error = %e, "cannot derive api url from api key")),
        }
    }

    /// Exchange the api key for a bearer token, replacing any prior session.
    pub async fn authenticate(&mut self) -> Result<()> {
        let credential = self.load_api_key().await?;
        let api_url = self.resolve_api_url(&credential)?;
        let session = request_access_token(&self.http, &api_url, &credential).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Export one node of a project and store it under `program/project/node`.
    ///
    /// Reuses the current session; authenticates first only when there is none.
    pub async fn fetch_data(
        &mut self,
        program_name: &str,
        project_code: &str,
        node_label: &str,
        options: &FetchOptions,
    ) -> Result<Option<&Value>> {
        if self.session.is_none() {
            debug!("no session yet, authenticating before fetch");
            self.authenticate().await?;
        }

        let credential = self.load_api_key().await?;
        let api_url = self.resolve_api_url(&credential)?;
        let api_version = options.api_version.as_deref().unwrap_or(&self.api_version);
        let url = format!(
            "{}/api/{}/submission/{}/{}/export/?node_label={}&format=json",
            api_url, api_version, program_name, project_code, node_label
        );

        let mut request = self.http.get(&url);
        if let Some(headers) = self.headers() {
            request = request.headers(headers.clone());
        }
        let response = request
            .send()
            .await
            .inspect_err(|e| error!(url = %url, error = %e, "request error during fetch"))?;

        let status = response.status();
        info!(status = status.as_u16(), url = %url, "export response");
        if !status.is_success() {
            error!(url = %url, status = status.as_u16(), "HTTP error during fetch");
            return Err(ClientError::Http { status, url });
        }

        let body = response
            .text()
            .await
            .inspect_err(|e| error!(url = %url, error = %e, "failed to read export body"))?;
        let data: Value = serde_json::from_str(&body)
            .map_err(ClientError::from)
            .inspect_err(|e| error!(url = %url, error = %e, "export body is not JSON"))?;

        let key = FetchKey::new(program_name, project_code, node_label);
        self.data_store.insert(key.clone(), data);

        if options.return_data {
            Ok(self.data_store.get(&key))
        } else {
            info!(key = %key, "data has been fetched and stored");
            Ok(None)
        }
    }

    /// Flatten the `data` field of every stored payload into the table store.
    ///
    /// Nothing is written unless every payload converts.
    pub fn data_to_tables(&mut self) -> Result<()> {
        let mut converted = Vec::with_capacity(self.data_store.len());
        for (key, payload) in &self.data_store {
            info!(key = %key, "converting payload to table");
            let records = payload
                .get(DATA_FIELD)
                .ok_or(ClientError::MissingField(DATA_FIELD))
                .inspect_err(|_| error!(key = %key, "payload has no data field"))?;
            let table = json_to_table(records)
                .inspect_err(|e| error!(key = %key, error = %e, "payload cannot be flattened"))?;
            converted.push((key.clone(), table));
        }
        self.table_store.extend(converted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_data_to_tables() {
        let mut client = MetadataClient::new("unused.json");
        let key = FetchKey::new("program1", "project1", "subject");
        client.data_store.insert(
            key.clone(),
            json!({"data": [
                {"project_id": "project1", "submitter_id": "subject_bdf5291449"},
                {"project_id": "project1", "submitter_id": "subject_acf4281442"}
            ]}),
        );

        client.data_to_tables().unwrap();

        let table = client.table(&key).unwrap();
        assert_eq!(table.columns(), ["project_id", "submitter_id"]);
        assert_eq!(
            table.column("submitter_id").unwrap(),
            vec![&json!("subject_bdf5291449"), &json!("subject_acf4281442")]
        );
        assert_eq!(table.column("project_id").unwrap(), vec![&json!("project1"), &json!("project1")]);
    }

    #[test]
    fn test_data_to_tables_overwrites_stale_table() {
        let mut client = MetadataClient::new("unused.json");
        let key = FetchKey::new("p", "c", "n");
        client.data_store.insert(key.clone(), json!({"data": [{"id": 1}]}));
        client.data_to_tables().unwrap();
        assert_eq!(client.table(&key).unwrap().len(), 1);

        client.data_store.insert(key.clone(), json!({"data": [{"id": 1}, {"id": 2}]}));
        client.data_to_tables().unwrap();
        assert_eq!(client.table(&key).unwrap().len(), 2);
        assert_eq!(client.table_store().len(), 1);
    }

    #[test]
    fn test_data_to_tables_missing_data_field_writes_nothing() {
        let mut client = MetadataClient::new("unused.json");
        client.data_store.insert(FetchKey::new("p", "c", "ok"), json!({"data": [{"id": 1}]}));
        client.data_store.insert(FetchKey::new("p", "c", "bad"), json!({"message": "no data"}));

        let res = client.data_to_tables();
        assert!(matches!(res, Err(ClientError::MissingField("data"))));
        assert!(client.table_store().is_empty());
    }

    #[test]
    fn test_configured_api_url_wins() {
        let client = MetadataClient::new("unused.json").with_api_url("https://example-gen3.com/");
        let credential = Credential::new("mock_api_key", "mock_key_id");
        assert_eq!(client.resolve_api_url(&credential).unwrap(), "https://example-gen3.com");
    }
}
