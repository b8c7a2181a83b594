use std::path::Path;

use anyhow::Context as _;
use bedrock_domain::FileInfra;

#[derive(Default)]
pub struct FileWriter;

#[async_trait::async_trait]
impl FileInfra for FileWriter {
    async fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".env.example");

        FileWriter.write(&path, "AWS_REGION=us-east-1\n").await.unwrap();

        let actual = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(actual, "AWS_REGION=us-east-1\n");
    }
}
