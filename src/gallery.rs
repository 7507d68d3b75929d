use crate::domain::constants::{
    DETAIL_METHOD, DEVELOPER_ENTRY_NAME, INTEGRATION_TYPE, INTERFACE_CODE_HEADER,
    LAYOUT_DETAIL_CARD, LAYOUT_TEXT_LIST_CARD,
};
use crate::domain::models::AppRecord;
use serde_json::{Map, Value};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(thiserror::Error, Debug)]
pub enum GalleryError {
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("malformed upstream response: {0}")]
    Protocol(String),
    #[error("app {0} not found in response")]
    NotFound(String),
}

impl GalleryError {
    pub fn kind(&self) -> &'static str {
        match self {
            GalleryError::Upstream(_) => "upstream",
            GalleryError::Protocol(_) => "protocol",
            GalleryError::NotFound(_) => "not_found",
        }
    }
}

/// A failed lookup, tagged with the identifier that was asked for.
#[derive(thiserror::Error, Debug)]
#[error("lookup for {app_id} failed: {error}")]
pub struct LookupError {
    pub app_id: String,
    pub error: GalleryError,
}

impl LookupError {
    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}

/// Receives lookup lifecycle events. Passed into the core so callers decide
/// where (and whether) anything gets logged.
pub trait LookupObserver: Sync {
    fn started(&self, _app_id: &str) {}
    fn succeeded(&self, _record: &AppRecord) {}
    fn failed(&self, _err: &LookupError) {}
}

impl<A: LookupObserver, B: LookupObserver> LookupObserver for (A, B) {
    fn started(&self, app_id: &str) {
        self.0.started(app_id);
        self.1.started(app_id);
    }

    fn succeeded(&self, record: &AppRecord) {
        self.0.succeeded(record);
        self.1.succeeded(record);
    }

    fn failed(&self, err: &LookupError) {
        self.0.failed(err);
        self.1.failed(err);
    }
}

/// The two upstream calls the extractor needs.
pub trait Transport: Sync {
    /// POST with an empty body; returns the response text.
    fn post_empty(&self, url: &str) -> Result<String, GalleryError>;
    /// GET with query parameters and one extra header; returns the response text.
    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        header: (&str, &str),
    ) -> Result<String, GalleryError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

fn upstream(e: reqwest::Error) -> GalleryError {
    GalleryError::Upstream(e.to_string())
}

impl Transport for HttpTransport {
    fn post_empty(&self, url: &str) -> Result<String, GalleryError> {
        let resp = self
            .client
            .post(url)
            .send()
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;
        resp.text().map_err(upstream)
    }

    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        header: (&str, &str),
    ) -> Result<String, GalleryError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .header(header.0, header.1)
            .send()
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;
        resp.text().map_err(upstream)
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub interface_url: String,
    pub detail_url: String,
    pub download_url: String,
}

/// Per-request `Interface-Code` value: `<code>_<timestamp>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader(String);

impl AuthorizationHeader {
    /// Timestamp is epoch milliseconds written as bare digits.
    pub fn compose(code: &str, now: SystemTime) -> Self {
        let millis = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self(format!("{}_{}", code, millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_interface_code(body: &str) -> Result<String, GalleryError> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| GalleryError::Protocol(format!("interface code is not JSON: {}", e)))?;
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(GalleryError::Protocol(format!(
            "unexpected interface code: {}",
            other
        ))),
    }
}

/// What a pass over `layoutData` found.
#[derive(Debug, Default)]
pub struct LayoutScan {
    pub app_item: Option<Map<String, Value>>,
    pub developer: Option<String>,
}

fn layout_id(element: &Value) -> Option<i64> {
    let raw = element.get("layoutId")?;
    if let Some(id) = raw.as_i64() {
        return Some(id);
    }
    raw.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
}

/// Walk every layout element once.
///
/// Layout 49: the first data item whose `appid` equals `app_id` is kept; later
/// layout-49 elements are skipped once a candidate exists.
/// Layout 59: every nested `list` entry named "Developer" overwrites the
/// developer, so the last one scanned wins.
pub fn scan_layout(response: &Value, app_id: &str) -> Result<LayoutScan, GalleryError> {
    let Some(root) = response.as_object() else {
        return Err(GalleryError::Protocol(
            "detail response is not a JSON object".to_string(),
        ));
    };

    let elements = root
        .get("layoutData")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut scan = LayoutScan::default();
    for element in elements {
        let Some(items) = element.get("dataList").and_then(Value::as_array) else {
            continue;
        };
        match layout_id(element) {
            Some(LAYOUT_DETAIL_CARD) if scan.app_item.is_none() => {
                scan.app_item = items
                    .iter()
                    .filter_map(Value::as_object)
                    .find(|item| item.get("appid").and_then(Value::as_str) == Some(app_id))
                    .cloned();
            }
            Some(LAYOUT_TEXT_LIST_CARD) => {
                for item in items {
                    let Some(entries) = item.get("list").and_then(Value::as_array) else {
                        continue;
                    };
                    for entry in entries {
                        if entry.get("name").and_then(Value::as_str) == Some(DEVELOPER_ENTRY_NAME) {
                            scan.developer =
                                entry.get("text").and_then(Value::as_str).map(str::to_string);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(scan)
}

/// First key holding a non-empty string or a number.
fn text_field(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match item.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First key holding a positive size, as a number or numeric string.
fn size_field(item: &Map<String, Value>, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|k| {
            let v = item.get(*k)?;
            let size = match v {
                Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            }?;
            (size > 0).then_some(size)
        })
        .unwrap_or(0)
}

pub fn build_record(
    app_id: &str,
    mut item: Map<String, Value>,
    developer: Option<String>,
    download_base: &str,
) -> AppRecord {
    item.insert(
        "integration_type".to_string(),
        Value::String(INTEGRATION_TYPE.to_string()),
    );
    if let Some(dev) = developer.as_ref().filter(|d| !d.is_empty()) {
        item.insert("developer".to_string(), Value::String(dev.clone()));
    }

    AppRecord {
        app_id: text_field(&item, &["appid"]).unwrap_or_else(|| app_id.to_string()),
        name: text_field(&item, &["name"]),
        version: text_field(&item, &["versionName", "version"]),
        size_bytes: size_field(&item, &["size", "fullSize"]),
        developer: text_field(&item, &["developer"]),
        package: text_field(&item, &["package", "package_name"]),
        sha256: text_field(&item, &["sha256"]),
        portal_url: text_field(&item, &["portalUrl"]),
        description: text_field(&item, &["editorDescribe", "description"])
            .map(|d| d.trim().to_string()),
        download_url: format!("{}/{}", download_base.trim_end_matches('/'), app_id),
        integration_type: INTEGRATION_TYPE.to_string(),
        raw: item,
    }
}

/// Parse a detail-lookup body and pull out the record for `app_id`.
pub fn parse_app_record(
    body: &str,
    app_id: &str,
    download_base: &str,
) -> Result<AppRecord, GalleryError> {
    let response: Value = serde_json::from_str(body)
        .map_err(|e| GalleryError::Protocol(format!("detail response is not JSON: {}", e)))?;
    let scan = scan_layout(&response, app_id)?;
    let item = scan
        .app_item
        .ok_or_else(|| GalleryError::NotFound(app_id.to_string()))?;
    Ok(build_record(app_id, item, scan.developer, download_base))
}

pub struct Gallery<T: Transport = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> Gallery<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Fetch a fresh interface code; never cached.
    pub fn build_header(&self) -> Result<AuthorizationHeader, GalleryError> {
        let body = self.transport.post_empty(&self.endpoints.interface_url)?;
        let code = parse_interface_code(&body)?;
        Ok(AuthorizationHeader::compose(&code, SystemTime::now()))
    }

    pub fn extract(&self, app_id: &str) -> Result<AppRecord, GalleryError> {
        let header = self.build_header()?;
        let query = [
            ("method", DETAIL_METHOD.to_string()),
            ("uri", format!("app|{}", app_id)),
        ];
        let body = self.transport.get(
            &self.endpoints.detail_url,
            &query,
            (INTERFACE_CODE_HEADER, header.as_str()),
        )?;
        parse_app_record(&body, app_id, &self.endpoints.download_url)
    }

    pub fn fetch_single_app(
        &self,
        app_id: &str,
        observer: &dyn LookupObserver,
    ) -> Result<AppRecord, LookupError> {
        observer.started(app_id);
        match self.extract(app_id) {
            Ok(record) => {
                observer.succeeded(&record);
                Ok(record)
            }
            Err(error) => {
                let err = LookupError {
                    app_id: app_id.to_string(),
                    error,
                };
                observer.failed(&err);
                Err(err)
            }
        }
    }
}
