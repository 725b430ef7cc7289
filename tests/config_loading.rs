//! Loading configuration files into a working client.

use std::fs;
use std::time::Duration;

use cancel_task::config::{load_config, ConfigError};
use cancel_task::{Client, Outcome};

#[tokio::test(start_paused = true)]
async fn test_client_from_config_file() {
    let path = std::env::temp_dir().join(format!("cancel-task-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[client]\ntimeout_ms = 10000\n\n[steps]\ndelays_ms = [1000, 2000]\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let client = Client::from_config(&config);
    assert_eq!(client.timeout(), Duration::from_secs(10));
    assert_eq!(client.invoke(None).await.unwrap(), Outcome::Completed { steps: 2 });
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = std::env::temp_dir().join(format!("cancel-task-invalid-{}.toml", std::process::id()));
    fs::write(&path, "[client]\ntimeout_ms = 0\n").unwrap();

    let err = load_config(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, ConfigError::Validation(_)));
}
