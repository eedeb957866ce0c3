//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# KodeSesh Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[relay]
url = "ws://localhost:5000/ws"
# connect_timeout = 15       # seconds, 1-120
# heartbeat_interval = 25    # seconds, 5-300

[execution]
url = "https://emkc.org/api/v2/piston"
# compile_timeout_ms = 10000 # 100-60000
# run_timeout_ms = 10000     # 100-60000
# request_timeout = 30       # seconds, 1-300

[session]
# default_session_id = "demo-session"
# initial_language = "javascript"   # javascript, python

[identity]
# path = "/path/to/identity.json"
# default_name = "Anonymous"

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
