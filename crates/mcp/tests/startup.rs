use std::process::{Command, Stdio};

#[test]
fn test_missing_token_exits_with_code_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_raindrop-mcp"))
        .env_remove("RAINDROP_ACCESS_TOKEN")
        .env_remove("RAINDROP_API_BASE_URL")
        .env("RUST_LOG", "error")
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout must carry protocol frames only");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RAINDROP_ACCESS_TOKEN"), "{}", stderr);
}

#[test]
fn test_closed_stdin_exits_cleanly() {
    let output = Command::new(env!("CARGO_BIN_EXE_raindrop-mcp"))
        .env("RAINDROP_ACCESS_TOKEN", "test-token")
        .env("RAINDROP_API_BASE_URL", "http://127.0.0.1:9")
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}
