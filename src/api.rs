// API client module: contains a small blocking HTTP client that talks to
// the coffee-shop backend. It is intentionally small and synchronous to
// keep the command flow easy to follow.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request timeout for the interactive session. The probe binary uses its
/// own, shorter timeout (see `probe`).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Simple API client that holds a reqwest blocking client and the base
/// URL of the coffee-shop backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// One coffee on the menu. Fields mirror the backend response; extra
/// fields (e.g. `available`) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub description: String,
    pub price: f64,
}

/// Shop information as returned by `GET /api/info`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShopInfo {
    pub name: String,
    pub description: String,
    pub location: String,
    pub hours: String,
    pub philosophy: String,
}

/// Payload for placing an order. Fields mirror the backend expectations.
#[derive(Serialize, Deserialize, Debug)]
pub struct OrderRequest {
    pub customer_name: String,
    pub coffee_id: String,
    pub quantity: u32,
}

/// An order as returned by the backend. The timestamp is a naive ISO-8601
/// datetime (the backend serializes UTC without an offset) and may be
/// absent, so we keep it optional.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Order {
    pub id: String,
    pub coffee_name: String,
    pub total_price: f64,
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `COFFEE_API_URL` or fallback to `http://localhost:8001`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("COFFEE_API_URL").unwrap_or_else(|_| "http://localhost:8001".into());
        Self::new(base_url)
    }

    /// Create an ApiClient for an explicit base URL.
    pub fn new(base_url: String) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create an ApiClient with a custom request timeout.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, base_url })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the welcome message from `GET /api/`. Used by the
    /// connectivity probe.
    pub fn welcome(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct Root {
            message: String,
        }
        let url = format!("{}/api/", &self.base_url);
        debug!(%url, "fetching API root");
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to reach API root")?;
        let root: Root = parse(res, "welcome message")?;
        Ok(root.message)
    }

    /// Fetch the menu listing from `GET /api/menu`.
    pub fn menu(&self) -> Result<Vec<MenuItem>> {
        let url = format!("{}/api/menu", &self.base_url);
        debug!(%url, "fetching menu");
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to fetch menu")?;
        parse(res, "menu")
    }

    /// Fetch shop information from `GET /api/info`.
    pub fn info(&self) -> Result<ShopInfo> {
        let url = format!("{}/api/info", &self.base_url);
        debug!(%url, "fetching shop info");
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to fetch shop info")?;
        parse(res, "shop info")
    }

    /// Place an order by POSTing to `/api/orders`.
    pub fn place_order(&self, req: &OrderRequest) -> Result<Order> {
        let url = format!("{}/api/orders", &self.base_url);
        debug!(%url, coffee_id = %req.coffee_id, "placing order");
        let res = self
            .client
            .post(&url)
            .json(req)
            .send()
            .context("Failed to submit order")?;
        parse(res, "order confirmation")
    }

    /// Fetch a single order by id from `GET /api/orders/{id}`.
    pub fn order(&self, id: &str) -> Result<Order> {
        let url = format!("{}/api/orders/{}", &self.base_url, id);
        debug!(%url, "fetching order");
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to fetch order")?;
        parse(res, "order")
    }
}

/// Turn a response into `T`. On a non-success status the backend's
/// structured `detail` field is preferred over the raw status line.
fn parse<T: serde::de::DeserializeOwned>(res: Response, what: &str) -> Result<T> {
    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().unwrap_or_else(|_| "".into());
        if let Some(detail) = extract_detail(&txt) {
            anyhow::bail!("{}", detail);
        }
        anyhow::bail!("Request failed: {} - {}", status, txt);
    }
    res.json().with_context(|| format!("Parsing {what} json"))
}

/// The backend reports failures as `{"detail": "..."}`.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(|s| s.to_string())
}
