use rapper_core::{Error, Result};
use rapper_ir::RawInterface;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::{
    Catalog,
    rap::{Envelope, Repository},
};

/// Catalog backed by a Rap server.
///
/// `api_url` is the repository endpoint, e.g.
/// `http://rap2api.taobao.org/repository/get?id=3`. Templates are served
/// from the same origin.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    api_url: String,
    origin: String,
}

impl HttpCatalog {
    pub fn new(api_url: &str) -> Result<Self> {
        let url = Url::parse(api_url)
            .map_err(|e| Error::validation(format!("invalid api_url '{}': {}", api_url, e)))?;
        Ok(Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            origin: url.origin().ascii_serialization(),
        })
    }

    fn template_url(&self, interface_id: u64) -> String {
        format!("{}/app/mock/template/{}", self.origin, interface_id)
    }

    async fn get<T: DeserializeOwned>(&self, what: &'static str, url: &str) -> Result<T> {
        debug!(what, url, "Requesting catalog.");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(what, url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(what, url, format!("server answered {}", status)));
        }

        response.json().await.map_err(|e| Error::network(what, url, e))
    }
}

impl Catalog for HttpCatalog {
    async fn interfaces(&self) -> Result<Vec<RawInterface>> {
        let envelope: Envelope<Repository> = self.get("interfaces", &self.api_url).await?;
        let repository = envelope
            .into_data()
            .map_err(|message| Error::network("interfaces", &self.api_url, message))?;

        let interfaces = repository.into_interfaces();
        info!(count = interfaces.len(), "Fetched interfaces.");
        Ok(interfaces)
    }

    async fn template(&self, interface_id: u64) -> Result<Value> {
        self.get("template", &self.template_url(interface_id)).await
    }
}
