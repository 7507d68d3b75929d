use crate::domain::constants::NOT_AVAILABLE;
use crate::domain::models::{AppRecord, JsonOut};
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

fn field(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Human-readable block for one record.
pub fn render_summary(r: &AppRecord) -> String {
    [
        "App Summary:".to_string(),
        format!("  Name        : {}", field(&r.name)),
        format!("  Version     : {}", field(&r.version)),
        format!(
            "  Size        : {:.2} MB ({} bytes)",
            r.size_mb(),
            r.size_bytes
        ),
        format!("  App ID      : {}", r.app_id),
        format!("  Developer   : {}", field(&r.developer)),
        format!("  Package     : {}", field(&r.package)),
        format!("  SHA256      : {}", field(&r.sha256)),
        format!("  Portal URL  : {}", field(&r.portal_url)),
        format!("  Download URL: {}", r.download_url),
        format!("  Description : {}", field(&r.description)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn summary_shows_na_for_missing_fields() {
        let r = AppRecord {
            app_id: "C7".to_string(),
            name: Some("Seven".to_string()),
            version: None,
            size_bytes: 12_345_678,
            developer: Some("Acme Inc".to_string()),
            package: None,
            sha256: None,
            portal_url: None,
            description: None,
            download_url: "https://dl/C7".to_string(),
            integration_type: "appgallery".to_string(),
            raw: Map::new(),
        };
        let text = render_summary(&r);
        assert!(text.contains("Name        : Seven"));
        assert!(text.contains("Version     : N/A"));
        assert!(text.contains("Size        : 11.77 MB (12345678 bytes)"));
        assert!(text.contains("Developer   : Acme Inc"));
        assert!(text.contains("Download URL: https://dl/C7"));
    }
}
