//! Steam app catalog for name search
//!
//! The full AppID/name list is fetched once and kept for the life of the
//! `AppCatalog`. Nothing expires it; call `invalidate()` to force a refetch.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

pub const APP_LIST_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";

/// Search results are capped to keep the list usable
pub const SEARCH_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogApp {
    pub appid: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct AppListResponse {
    applist: AppList,
}

#[derive(Debug, Deserialize)]
struct AppList {
    apps: Vec<CatalogApp>,
}

pub struct AppCatalog {
    url: String,
    apps: Option<Vec<CatalogApp>>,
}

impl AppCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            apps: None,
        }
    }

    /// A catalog that already holds `apps` and never touches the network until invalidated
    pub fn with_apps(url: impl Into<String>, apps: Vec<CatalogApp>) -> Self {
        Self {
            url: url.into(),
            apps: Some(apps),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.apps.is_some()
    }

    pub fn invalidate(&mut self) {
        self.apps = None;
    }

    /// The cached list, fetching it on first use
    pub fn apps(&mut self) -> Result<&[CatalogApp]> {
        if self.apps.is_none() {
            let fetched = fetch_app_list(&self.url)?;
            info!("Loaded {} Steam apps", fetched.len());
            self.apps = Some(fetched);
        }
        Ok(self.apps.as_deref().unwrap_or_default())
    }

    /// Case-insensitive substring match on the app name, first `SEARCH_LIMIT` hits
    pub fn search(&mut self, query: &str) -> Result<Vec<CatalogApp>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .apps()?
            .iter()
            .filter(|app| app.name.to_lowercase().contains(&query))
            .take(SEARCH_LIMIT)
            .cloned()
            .collect())
    }
}

fn fetch_app_list(url: &str) -> Result<Vec<CatalogApp>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;

    let response = client.get(url).send()?.error_for_status()?;
    let body: AppListResponse = response.json()?;
    Ok(body.applist.apps)
}
