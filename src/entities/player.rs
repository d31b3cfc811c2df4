//! Player snapshot DTO.

use serde::{Deserialize, Serialize};

/// Account name the game server reports for players not logged into a
/// server account.
pub const ANONYMOUS_ACCOUNT: &str = "<annonymous>";

/// A snapshot of one connected player, as streamed to Gateway subscribers.
///
/// `location` is the world identifier string the server reports
/// (e.g. `ClientShipWorld:b37ac1ec7e4e7c1874c78a7433737943`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub connection: i32,
    pub username: String,
    pub nickname: Option<String>,
    pub account_name: Option<String>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    #[serde(rename = "IP")]
    pub ip: Option<String>,
    pub is_admin: bool,
    #[serde(rename = "IsVPN")]
    pub is_vpn: bool,
    pub location: Option<String>,
}

impl Player {
    /// A player is anonymous when they have no server account, or only the
    /// placeholder account the server assigns to guests.
    pub fn is_anonymous(&self) -> bool {
        match self.account_name.as_deref() {
            None => true,
            Some(name) => name.trim().is_empty() || name == ANONYMOUS_ACCOUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn wire_field_names() {
        let player = Player {
            connection: 7,
            username: "Esther".to_string(),
            uuid: Some("b37ac1ec7e4e7c1874c78a7433737943".to_string()),
            ..Player::default()
        };

        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["Connection"], 7);
        assert_eq!(json["Username"], "Esther");
        assert_eq!(json["UUID"], "b37ac1ec7e4e7c1874c78a7433737943");
        assert!(json.get("IP").is_some());
        assert!(json.get("IsVPN").is_some());
        assert!(json.get("Location").is_some());
    }

    #[test]
    fn anonymity() {
        let mut player = Player::default();
        assert!(player.is_anonymous());

        player.account_name = Some(ANONYMOUS_ACCOUNT.to_string());
        assert!(player.is_anonymous());

        player.account_name = Some("esther".to_string());
        assert!(!player.is_anonymous());
    }
}
