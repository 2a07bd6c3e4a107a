//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Techxy Talks configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# model = "gemini-2.0-flash"
# Name of the environment variable holding the API key.
# The key itself never belongs in this file.
# api_key_env = "GEMINI_API_KEY"
# temperature = 0.7          # 0.0-2.0, omitted when unset
# max_output_tokens = 2048   # omitted when unset
# connect_timeout_secs = 10  # 1-120
# request_timeout_secs = 0   # 0 = wait for the reply indefinitely

[transport]
# mode = "direct"            # direct, relay

[relay]
# url = "ws://127.0.0.1:8787"
# port = 8787                # 1024-65535, used by techxy-relay

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
