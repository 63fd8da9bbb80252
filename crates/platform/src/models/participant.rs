use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Medal {
    #[serde(rename = "GOLD_MEDAL")]
    Gold,
    #[serde(rename = "SILVER_MEDAL")]
    Silver,
    #[serde(rename = "BRONZE_MEDAL")]
    Bronze,
    #[serde(rename = "NO_MEDAL")]
    NoMedal,
}

impl Medal {
    /// Parses a medal column value. Anything other than gold, silver or bronze
    /// (in any letter case) is treated as no medal.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "GOLD" => Self::Gold,
            "SILVER" => Self::Silver,
            "BRONZE" => Self::Bronze,
            _ => Self::NoMedal,
        }
    }
}

/// Fields of a participant that an update may touch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantField {
    Name,
    Medal,
    MemberId,
}

/// A contest participant. The same shape is used for listings and as the write
/// payload; on writes only fields named in the accompanying patch list are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub ghost: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
}

impl Participant {
    pub fn ghost(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ghost: true,
            ..Default::default()
        }
    }

    pub fn for_member(member_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_id: Some(member_id.into()),
            ..Default::default()
        }
    }

    /// Fields carrying a value in this payload.
    pub fn present_fields(&self) -> Vec<ParticipantField> {
        let mut fields = Vec::new();
        if !self.name.is_empty() {
            fields.push(ParticipantField::Name);
        }
        if self.medal.is_some() {
            fields.push(ParticipantField::Medal);
        }
        if self.member_id.is_some() {
            fields.push(ParticipantField::MemberId);
        }
        fields
    }
}
