mod utils;
use utils::{run_diff, test_scaffold, write_json, write_manifest};

#[cfg(test)]
mod diff_tests {
    use super::*;
    use plan_common::{DeployedStateGateway, DiffOptions, NoBackendGateway};
    use plan_utils::{parse_diff_count, NO_DIFFERENCES};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn write_fixture(dir: &std::path::Path) {
        write_json(dir, "A.template.json", &json!({"resource": "A"}));
        write_json(dir, "B.template.json", &json!({"resource": "B"}));
        write_manifest(
            dir,
            json!([
                {"stackName": "A", "templateFile": "A.template.json"},
                {"stackName": "B", "templateFile": "B.template.json", "dependencies": ["A"]},
                {
                    "stackName": "C",
                    "template": {"resource": "C"},
                    "dependencies": ["A"],
                    "metadata": {
                        "/resource": [{"type": "aws:cdk:error", "data": "this is an error"}]
                    }
                },
                {"stackName": "D", "template": {"resource": "D"}}
            ]),
        );
    }

    #[tokio::test]
    async fn test_diff_against_empty_backend() {
        test_scaffold(|dir| async move {
            write_fixture(&dir);

            let (result, output) =
                run_diff(&dir, &NoBackendGateway, &["B"], DiffOptions::default()).await;

            assert_eq!(result.unwrap(), 0);
            assert_eq!(
                output,
                "Stack A\n[+] resource: A\n\nStack B\n[+] resource: B\n\n\n✨  Number of stacks with differences: 2\n"
            );
        })
        .await;
    }

    #[tokio::test]
    async fn test_diff_against_deployed_state_file() {
        test_scaffold(|dir| async move {
            write_fixture(&dir);
            let state_path = write_json(
                &dir,
                "deployed.json",
                &json!({
                    "stacks": {
                        "A": {"template": {"resource": "A"}},
                        "D": {"template": {"resource": "old-D"}}
                    }
                }),
            );
            let gateway = DeployedStateGateway::from_file(&state_path).unwrap();

            let (result, output) = run_diff(
                &dir,
                &gateway,
                &["A", "D"],
                DiffOptions {
                    fail: true,
                    ..Default::default()
                },
            )
            .await;

            assert_eq!(result.unwrap(), 1);
            assert!(output.contains(&format!("Stack A\n{}\n", NO_DIFFERENCES)));
            assert!(output.contains("Stack D\n[~] resource\n ├─ [-] old-D\n └─ [+] D\n"));
            assert_eq!(parse_diff_count(&output), Some(1));
        })
        .await;
    }

    #[tokio::test]
    async fn test_synthesis_error_stops_the_diff() {
        test_scaffold(|dir| async move {
            write_fixture(&dir);

            let (result, output) =
                run_diff(&dir, &NoBackendGateway, &["C"], DiffOptions::default()).await;

            assert!(result.unwrap_err().to_string().starts_with("Found errors"));
            assert_eq!(output, "");
        })
        .await;
    }

    #[tokio::test]
    async fn test_unknown_stack_names() {
        test_scaffold(|dir| async move {
            write_fixture(&dir);

            let (result, _) =
                run_diff(&dir, &NoBackendGateway, &["X", "Y", "Z"], DiffOptions::default()).await;

            assert_eq!(
                result.unwrap_err().to_string(),
                "No stacks match the name(s) X,Y,Z"
            );
        })
        .await;
    }

    #[tokio::test]
    async fn test_quiet_with_repeated_stack() {
        test_scaffold(|dir| async move {
            write_fixture(&dir);
            let gateway = DeployedStateGateway::from_file(&write_json(
                &dir,
                "deployed.json",
                &json!({"stacks": {"A": {"template": {"resource": "A"}}}}),
            ))
            .unwrap();

            let (result, output) = run_diff(
                &dir,
                &gateway,
                &["A", "A"],
                DiffOptions {
                    quiet: true,
                    ..Default::default()
                },
            )
            .await;

            assert_eq!(result.unwrap(), 0);
            assert_eq!(output, "\n✨  Number of stacks with differences: 0\n");
        })
        .await;
    }

    #[tokio::test]
    async fn test_exclusively_and_glob_selection() {
        test_scaffold(|dir| async move {
            write_fixture(&dir);

            let (result, output) = run_diff(
                &dir,
                &NoBackendGateway,
                &["B*"],
                DiffOptions {
                    exclusively: true,
                    ..Default::default()
                },
            )
            .await;

            assert_eq!(result.unwrap(), 0);
            assert!(!output.contains("Stack A"));
            assert!(output.contains("Stack B\n"));
            assert_eq!(parse_diff_count(&output), Some(1));
        })
        .await;
    }
}
