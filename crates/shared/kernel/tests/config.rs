use relay_kernel::config::load_config;
use relay_kernel::domain::config::RelayConfig;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn loads_values_from_file() {
    let file = write_config(
        r#"
        [server]
        port = 8181

        [target]
        base_url = "http://127.0.0.1:9999"
        cookie = "ipb_member_id=1; ipb_pass_hash=abc"
        timeout_secs = 3

        [resolver]
        enable_gp_cost = false
        "#,
    );

    let cfg: RelayConfig = load_config(Some(file.path())).expect("config should load");
    assert_eq!(cfg.server.port, 8181);
    assert_eq!(cfg.target.base_url, "http://127.0.0.1:9999");
    assert_eq!(cfg.target.cookie, "ipb_member_id=1; ipb_pass_hash=abc");
    assert_eq!(cfg.target.timeout_secs, 3);
    assert!(!cfg.resolver.enable_gp_cost);
    assert_eq!(cfg.resolver.canary_token, "928605fbbd");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let result = load_config::<RelayConfig>(Some("definitely/not/here.toml"));
    assert!(result.is_err(), "an explicit config path must exist");
}
