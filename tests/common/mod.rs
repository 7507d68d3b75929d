#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const INTERFACE_PATH: &str = "/webedge/getInterfaceCode";
pub const DETAIL_PATH: &str = "/uowap/index";

/// Isolated home and working directory plus a fake AppGallery upstream.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
    pub upstream: MockServer,
}

impl TestEnv {
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");

        Self {
            _tmp: tmp,
            home,
            work,
            upstream: MockServer::start().await,
        }
    }

    /// Upstream that hands out an interface code and knows the given apps.
    pub async fn with_apps(apps: &[(&str, &str, &str)]) -> Self {
        let env = Self::new().await;
        env.mount_interface_code("code-1").await;
        for (app_id, name, developer) in apps {
            env.mount_app(app_id, name, developer).await;
        }
        env.mount_empty_detail().await;
        env
    }

    pub fn cmd(&self) -> Command {
        let uri = self.upstream.uri();
        let mut cmd = cargo_bin_cmd!("appgallery");
        cmd.env("HOME", &self.home)
            .env_remove("RUST_LOG")
            .env("APPGALLERY_INTERFACE_URL", format!("{}{}", uri, INTERFACE_PATH))
            .env("APPGALLERY_DETAIL_URL", format!("{}{}", uri, DETAIL_PATH))
            .env("APPGALLERY_DOWNLOAD_URL", format!("{}/appdl", uri))
            .env("APPGALLERY_TIMEOUT_SECS", "5")
            .current_dir(&self.work);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn summary_csv(&self) -> String {
        fs::read_to_string(self.work.join("results/summary.csv")).expect("summary csv written")
    }

    pub fn failure_log(&self) -> String {
        fs::read_to_string(self.work.join("logs/cli_failures.log")).unwrap_or_default()
    }

    pub fn write_ids(&self, name: &str, ids: &[&str]) -> PathBuf {
        let file = self.work.join(name);
        fs::write(&file, ids.join("\n")).expect("write id list");
        file
    }

    pub async fn mount_interface_code(&self, code: &str) {
        Mock::given(method("POST"))
            .and(path(INTERFACE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(code))
            .mount(&self.upstream)
            .await;
    }

    pub async fn mount_app(&self, app_id: &str, name: &str, developer: &str) {
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .and(query_param("uri", format!("app|{}", app_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(
                app_id, name, developer,
            )))
            .mount(&self.upstream)
            .await;
    }

    /// Fallback for ids nobody registered: a valid page without the app.
    pub async fn mount_empty_detail(&self) {
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"layoutData": []})))
            .mount(&self.upstream)
            .await;
    }

    pub async fn detail_requests(&self) -> Vec<String> {
        self.upstream
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == DETAIL_PATH)
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "uri")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }
}

pub fn detail_body(app_id: &str, name: &str, developer: &str) -> Value {
    json!({
        "layoutData": [
            {"layoutId": 12, "dataList": [{"title": "banner"}]},
            {"layoutId": 49, "dataList": [{
                "appid": app_id,
                "name": name,
                "versionName": "2.1.0",
                "size": 52428800,
                "package": format!("com.example.{}", app_id.to_lowercase()),
                "sha256": "ab12cd34",
                "portalUrl": format!("https://appgallery.huawei.com/app/{}", app_id),
                "editorDescribe": "  A sample app.  "
            }]},
            {"layoutId": 59, "dataList": [{"list": [
                {"name": "Category", "text": "Tools"},
                {"name": "Developer", "text": developer}
            ]}]}
        ]
    })
}
