use std::path::Path;

use serde_json::Value;

/// Overwrites the audit log with the pretty-printed raw provider batch.
///
/// Diagnostic only; the file is never read back by the gateway. Callers
/// treat failures as non-fatal.
pub async fn write_raw_batch(path: &str, batch: &[Value]) -> std::io::Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let body = serde_json::to_vec_pretty(batch)?;
    tokio::fs::write(path, body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log/tweets.json");
        let path = path.to_str().unwrap();

        write_raw_batch(path, &[json!({"first": true})]).await.unwrap();
        write_raw_batch(path, &[json!({"second": true})]).await.unwrap();

        let content = tokio::fs::read_to_string(path).await.unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![json!({"second": true})]);
        // Pretty-printed, not a single line.
        assert!(content.contains('\n'));
    }
}
