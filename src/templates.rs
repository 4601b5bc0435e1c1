//! Builders for the payload formats shown as placeholders.
//!
//! Scanners recognise `WIFI:`, `mailto:` and `tel:` payloads and offer to join
//! the network, compose a message or dial. These helpers produce well-formed
//! strings; the validator does not require them.

use std::fmt;

/// Wi-Fi authentication type as written in the `T:` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    Open,
}

impl WifiSecurity {
    fn as_field(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::Open => "nopass",
        }
    }
}

/// Credentials for a `WIFI:T:...;S:...;P:...;;` payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WifiNetwork {
    pub ssid: String,
    pub password: String,
    pub security: WifiSecurity,
    pub hidden: bool,
}

impl WifiNetwork {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn security(mut self, security: WifiSecurity) -> Self {
        self.security = security;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl fmt::Display for WifiNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WIFI:T:{};S:{};", self.security.as_field(), escape_wifi_field(&self.ssid))?;
        if self.security != WifiSecurity::Open {
            write!(f, "P:{};", escape_wifi_field(&self.password))?;
        }
        if self.hidden {
            f.write_str("H:true;")?;
        }
        f.write_str(";")
    }
}

/// Backslash-escapes the characters reserved by the Wi-Fi payload format.
fn escape_wifi_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if matches!(c, '\\' | ';' | ',' | '"' | ':') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `mailto:` link for `address`.
pub fn mailto(address: &str) -> String {
    format!("mailto:{}", address.trim())
}

/// `tel:` link for `number`, keeping only a leading `+` and the digits.
pub fn tel(number: &str) -> String {
    let trimmed = number.trim();
    let mut out = String::from("tel:");
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wifi_matches_placeholder_shape() {
        let payload = WifiNetwork::new("NetworkName", "NetworkPassword").to_string();
        assert_eq!(payload, "WIFI:T:WPA;S:NetworkName;P:NetworkPassword;;");
    }

    #[test]
    fn test_wifi_escaping() {
        let payload = WifiNetwork::new(r#"My;Net"#, r#"p\a,s:s"#).to_string();
        assert_eq!(payload, r#"WIFI:T:WPA;S:My\;Net;P:p\\a\,s\:s;;"#);
    }

    #[test]
    fn test_open_hidden_network() {
        let payload = WifiNetwork::new("Cafe", "ignored")
            .security(WifiSecurity::Open)
            .hidden(true)
            .to_string();
        assert_eq!(payload, "WIFI:T:nopass;S:Cafe;H:true;;");
    }

    #[test]
    fn test_mailto_and_tel() {
        assert_eq!(mailto(" contact@example.com "), "mailto:contact@example.com");
        assert_eq!(tel("+55 (11) 99999-9999"), "tel:+5511999999999");
        assert_eq!(tel("555 0100"), "tel:5550100");
    }
}
