use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use plan_common::{diff_stacks, CloudAssembly, DiffOptions, MANIFEST_FILE};
use plan_defs::{errors::DiffError, RemoteFetchGateway};
use serde_json::Value;

/// Runs `function_to_test` against a fresh assembly directory.
pub async fn test_scaffold<F, Fut>(function_to_test: F)
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: Future<Output = ()>,
{
    let dir = tempfile::tempdir().unwrap();
    function_to_test(dir.path().to_path_buf()).await;
}

pub fn write_json(dir: &Path, file: &str, value: &Value) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

pub fn write_manifest(dir: &Path, stacks: Value) {
    write_json(dir, MANIFEST_FILE, &serde_json::json!({ "stacks": stacks }));
}

pub fn nested_stack(locator: &str) -> Value {
    serde_json::json!({
        "Type": "AWS::CloudFormation::Stack",
        "Metadata": {"aws:asset:path": locator}
    })
}

pub async fn run_diff(
    dir: &Path,
    gateway: &dyn RemoteFetchGateway,
    names: &[&str],
    options: DiffOptions,
) -> (Result<i32, DiffError>, String) {
    let assembly = CloudAssembly::from_directory(dir).unwrap();
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut out = Vec::new();
    let result = diff_stacks(&assembly, gateway, &names, &options, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}
