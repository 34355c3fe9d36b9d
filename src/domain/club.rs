//! Club entity.

use serde::{Deserialize, Serialize};

use super::{nullable, validate_name, DomainError};

/// A club as stored. `asset` is display text such as `"$7,500,000,000"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub asset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewClub {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
}

impl NewClub {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name("club", &self.name)
    }
}

/// Partial update. Absent fields are left untouched; `null` clears an optional column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClubPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub asset: Option<Option<String>>,
}

impl ClubPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.name {
            Some(Some(name)) => validate_name("club", name),
            Some(None) => Err(DomainError::BlankName { entity: "club" }),
            None => Ok(()),
        }
    }

    pub fn apply(&self, club: &mut Club) {
        if let Some(Some(name)) = &self.name {
            club.name = name.clone();
        }
        if let Some(category) = &self.category {
            club.category = category.clone();
        }
        if let Some(asset) = &self.asset {
            club.asset = asset.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club() -> Club {
        Club {
            id: 1,
            name: "Real Madrid".to_string(),
            category: Some("La Liga".to_string()),
            asset: Some("$6,070,000,000".to_string()),
        }
    }

    #[test]
    fn test_new_club_blank_name_rejected() {
        let new_club: NewClub = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert_eq!(
            new_club.validate(),
            Err(DomainError::BlankName { entity: "club" })
        );
    }

    #[test]
    fn test_new_club_optional_fields_default() {
        let new_club: NewClub = serde_json::from_str(r#"{"name": "Ajax"}"#).unwrap();
        assert!(new_club.validate().is_ok());
        assert_eq!(new_club.category, None);
        assert_eq!(new_club.asset, None);
    }

    #[test]
    fn test_patch_absent_fields_untouched() {
        let patch: ClubPatch = serde_json::from_str(r#"{"asset": "$7,500,000,000"}"#).unwrap();
        let mut c = club();
        patch.apply(&mut c);
        assert_eq!(c.name, "Real Madrid");
        assert_eq!(c.category.as_deref(), Some("La Liga"));
        assert_eq!(c.asset.as_deref(), Some("$7,500,000,000"));
    }

    #[test]
    fn test_patch_null_clears() {
        let patch: ClubPatch = serde_json::from_str(r#"{"category": null}"#).unwrap();
        let mut c = club();
        patch.apply(&mut c);
        assert_eq!(c.category, None);
        assert_eq!(c.asset.as_deref(), Some("$6,070,000,000"));
    }

    #[test]
    fn test_patch_blank_name_rejected() {
        let patch = ClubPatch {
            name: Some(Some(String::new())),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_patch_null_name_rejected() {
        let patch: ClubPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(patch.name, Some(None));
        assert_eq!(
            patch.validate(),
            Err(DomainError::BlankName { entity: "club" })
        );
    }
}
