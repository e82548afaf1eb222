use anyhow::Context;
use libgraphql_prune::CacheValue;
use libgraphql_prune::VariableBindings;
use std::path::Path;

pub(crate) fn read_content<P: AsRef<Path>>(file_path: P) -> anyhow::Result<String> {
    let file_path = file_path.as_ref();
    if !file_path.is_file() {
        anyhow::bail!("{file_path:#?} is not a file");
    }

    let bytes = std::fs::read(file_path)
        .with_context(|| format!("Failed to read {file_path:#?}"))?;

    String::from_utf8(bytes)
        .with_context(|| format!("{file_path:#?} is not valid UTF-8"))
}

pub(crate) fn read_cache<P: AsRef<Path>>(file_path: P) -> anyhow::Result<CacheValue> {
    let file_path = file_path.as_ref();
    let content = read_content(file_path)?;
    let cache: CacheValue = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse the cache snapshot at {file_path:#?}"))?;

    if !cache.is_object() {
        anyhow::bail!(
            "The cache snapshot at {file_path:#?} must be a JSON object",
        );
    }
    Ok(cache)
}

pub(crate) fn read_variables<P: AsRef<Path>>(
    file_path: P,
) -> anyhow::Result<VariableBindings> {
    let file_path = file_path.as_ref();
    let content = read_content(file_path)?;
    serde_json::from_str(&content)
        .with_context(|| format!(
            "Failed to parse variable bindings at {file_path:#?} (expected a \
            JSON object)",
        ))
}
