//! Player entity.

use serde::{Deserialize, Serialize};

use super::{nullable, validate_name, DomainError};

/// A player as stored. `value` is free-form text such as `"100 million euro"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub value: Option<String>,
    pub club_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub club_id: Option<i64>,
}

impl NewPlayer {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name("player", &self.name)
    }
}

/// Partial update. `"club_id": null` detaches the player; omitting it keeps the club.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub value: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub club_id: Option<Option<i64>>,
}

impl PlayerPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.name {
            Some(Some(name)) => validate_name("player", name),
            Some(None) => Err(DomainError::BlankName { entity: "player" }),
            None => Ok(()),
        }
    }

    pub fn apply(&self, player: &mut Player) {
        if let Some(Some(name)) = &self.name {
            player.name = name.clone();
        }
        if let Some(value) = &self.value {
            player.value = value.clone();
        }
        if let Some(club_id) = self.club_id {
            player.club_id = club_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player {
            id: 8,
            name: "Marcus Rashford".to_string(),
            value: Some("70 million euro".to_string()),
            club_id: Some(3),
        }
    }

    #[test]
    fn test_club_id_absent_vs_null() {
        let keep: PlayerPatch = serde_json::from_str(r#"{"value": "60 million euro"}"#).unwrap();
        assert_eq!(keep.club_id, None);

        let detach: PlayerPatch = serde_json::from_str(r#"{"club_id": null}"#).unwrap();
        assert_eq!(detach.club_id, Some(None));

        let transfer: PlayerPatch = serde_json::from_str(r#"{"club_id": 2}"#).unwrap();
        assert_eq!(transfer.club_id, Some(Some(2)));
    }

    #[test]
    fn test_patch_detach_from_club() {
        let patch: PlayerPatch = serde_json::from_str(r#"{"club_id": null}"#).unwrap();
        let mut p = player();
        patch.apply(&mut p);
        assert_eq!(p.club_id, None);
        assert_eq!(p.name, "Marcus Rashford");
    }

    #[test]
    fn test_patch_null_name_rejected() {
        let patch: PlayerPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(
            patch.validate(),
            Err(DomainError::BlankName { entity: "player" })
        );

        let rename: PlayerPatch = serde_json::from_str(r#"{"name": "Bruno"}"#).unwrap();
        assert!(rename.validate().is_ok());
        let mut p = player();
        rename.apply(&mut p);
        assert_eq!(p.name, "Bruno");
    }

    #[test]
    fn test_new_player_blank_name_rejected() {
        let new_player = NewPlayer {
            name: "\t".to_string(),
            value: None,
            club_id: Some(1),
        };
        assert_eq!(
            new_player.validate(),
            Err(DomainError::BlankName { entity: "player" })
        );
    }

    #[test]
    fn test_player_serialization_keeps_nulls() {
        let p = Player {
            club_id: None,
            value: None,
            ..player()
        };
        let json = serde_json::to_value(&p).unwrap();
        assert!(json["club_id"].is_null());
        assert!(json["value"].is_null());
        assert_eq!(json["id"], 8);
    }
}
