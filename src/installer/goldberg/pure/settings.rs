//! steam_settings file contents

use super::super::types::GoldbergOptions;

fn flag(value: bool) -> u8 {
    if value { 1 } else { 0 }
}

pub fn render_user_ini(opts: &GoldbergOptions) -> String {
    format!(
        "[user::general]\naccount_name={}\naccount_steamid={}\nlanguage={}\n",
        opts.account_name, opts.steam_id, opts.language
    )
}

pub fn render_main_ini(opts: &GoldbergOptions) -> String {
    format!(
        r#"[main::general]
new_app_ticket=1
gc_token=1
matchmaking_server_list_actual_type=0
matchmaking_server_details_via_source_query=0

[main::connectivity]
disable_lan_only=0
disable_networking={}
listen_port={}
offline={}
disable_lobby_creation=0
disable_source_query=0
share_leaderboards_over_network=0
"#,
        flag(opts.disable_networking),
        opts.listen_port,
        flag(opts.offline_mode)
    )
}

pub fn render_overlay_ini(opts: &GoldbergOptions) -> String {
    format!(
        "[overlay::general]\nenable_experimental_overlay={}\n",
        flag(opts.enable_overlay)
    )
}

/// Every DLC reported as owned
pub fn render_app_ini() -> String {
    "[app::dlcs]\nunlock_all=1\n".to_string()
}

/// `custom_broadcasts.txt`, only when an address was given
pub fn render_broadcasts(opts: &GoldbergOptions) -> Option<String> {
    opts.custom_broadcast_ip
        .as_deref()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(|ip| format!("{}\n", ip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_ini_flags() {
        let opts = GoldbergOptions {
            disable_networking: true,
            offline_mode: true,
            listen_port: 50000,
            ..Default::default()
        };
        let ini = render_main_ini(&opts);
        assert!(ini.contains("disable_networking=1\n"));
        assert!(ini.contains("offline=1\n"));
        assert!(ini.contains("listen_port=50000\n"));
    }

    #[test]
    fn test_user_ini_defaults() {
        let ini = render_user_ini(&GoldbergOptions::default());
        assert!(ini.contains("account_name=Goldberg\n"));
        assert!(ini.contains("account_steamid=76561197960287930\n"));
        assert!(ini.contains("language=english\n"));
    }

    #[test]
    fn test_broadcasts_only_with_address() {
        assert_eq!(render_broadcasts(&GoldbergOptions::default()), None);
        let opts = GoldbergOptions {
            custom_broadcast_ip: Some(" 10.0.0.5 ".to_string()),
            ..Default::default()
        };
        assert_eq!(render_broadcasts(&opts), Some("10.0.0.5\n".to_string()));
        let blank = GoldbergOptions {
            custom_broadcast_ip: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(render_broadcasts(&blank), None);
    }
}
