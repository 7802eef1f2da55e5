use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use voicelink::{Config, ResetPolicy};

#[test]
fn test_load_full_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("voicelink.toml");
    fs::write(
        &path,
        r#"
[service]
name = "voicelink-test"

[service.http]
bind = "0.0.0.0"
port = 9000

[nats]
enabled = false
url = "nats://nats:4222"
subject = "rtvi.>"
message_subject = "rtvi.client"

[session]
reset_policy = "on_ready"
event_log_capacity = 250
event_denylist = ["localAudioLevel"]
"#,
    )?;

    let cfg = Config::load(path.with_extension("").to_str().unwrap())?;
    assert_eq!(cfg.service.name, "voicelink-test");
    assert_eq!(cfg.service.http.port, 9000);
    assert!(!cfg.nats.enabled);
    assert_eq!(cfg.nats.subject, "rtvi.>");
    assert_eq!(cfg.nats.message_subject, "rtvi.client");
    assert_eq!(cfg.session.reset_policy, ResetPolicy::OnReady);
    assert_eq!(cfg.session.event_log_capacity, 250);
    assert_eq!(cfg.session.event_denylist, vec!["localAudioLevel".to_string()]);
    Ok(())
}

#[test]
fn test_session_and_nats_sections_are_optional() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("minimal.toml");
    fs::write(
        &path,
        r#"
[service]
name = "minimal"

[service.http]
bind = "127.0.0.1"
port = 7861
"#,
    )?;

    let cfg = Config::load(path.with_extension("").to_str().unwrap())?;
    assert_eq!(cfg.session.reset_policy, ResetPolicy::OnNewAttempt);
    assert_eq!(cfg.session.event_log_capacity, 100);
    assert_eq!(cfg.session.event_denylist.len(), 2);
    assert!(cfg.nats.enabled);
    assert_eq!(cfg.nats.message_subject, "voice.client.messages");
    Ok(())
}

#[test]
fn test_missing_config_is_an_error() {
    assert!(Config::load("/nonexistent/voicelink").is_err());
}
