pub const DEFAULT_INTERFACE_URL: &str =
    "https://web-drru.hispace.dbankcloud.ru/webedge/getInterfaceCode";
pub const DEFAULT_DETAIL_URL: &str = "https://web-drru.hispace.dbankcloud.ru/uowap/index";
pub const DEFAULT_DOWNLOAD_URL: &str = "https://appgallery.cloud.huawei.com/appdl";

pub const DETAIL_METHOD: &str = "internal.getTabDetail";
pub const INTERFACE_CODE_HEADER: &str = "Interface-Code";

/// "detailhiddencard": carries the app record itself.
pub const LAYOUT_DETAIL_CARD: i64 = 49;
/// "textlistcard": carries name/text pairs, one of them the developer.
pub const LAYOUT_TEXT_LIST_CARD: i64 = 59;
pub const DEVELOPER_ENTRY_NAME: &str = "Developer";

pub const INTEGRATION_TYPE: &str = "appgallery";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_THREADS: usize = 4;
pub const DEFAULT_SUMMARY_PATH: &str = "results/summary.csv";
pub const DEFAULT_FAILURE_LOG: &str = "logs/cli_failures.log";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

pub const NOT_AVAILABLE: &str = "N/A";
