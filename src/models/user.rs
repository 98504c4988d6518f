// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in the durable user file.
///
/// Field names on disk match the existing user file layout, so a store
/// written by an earlier deployment loads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Intra user ID (primary key)
    pub id: u64,
    /// Intra login
    pub login: String,
    /// First name
    pub first_name: String,
    /// Display name (usually "First Last")
    pub displayname: String,
    /// OAuth access token, replaced on every login
    #[serde(rename = "accessToken")]
    pub access_token: String,
    /// OAuth refresh token, replaced on every login
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    /// Primary campus ID
    #[serde(rename = "campusID")]
    pub campus_id: u64,
    /// Primary campus name
    #[serde(rename = "campusName")]
    pub campus_name: String,
    /// IANA time zone of the primary campus
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Public view of a user, safe to return from the API (no tokens).
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: u64,
    pub login: String,
    pub first_name: String,
    pub displayname: String,
    pub campus_id: u64,
    pub campus_name: String,
    pub time_zone: String,
}

impl From<&UserProfile> for PublicUser {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            first_name: user.first_name.clone(),
            displayname: user.displayname.clone(),
            campus_id: user.campus_id,
            campus_name: user.campus_name.clone(),
            time_zone: user.time_zone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_file_field_names() {
        let user = UserProfile {
            id: 7,
            login: "jdoe".to_string(),
            first_name: "John".to_string(),
            displayname: "John Doe".to_string(),
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            campus_id: 1,
            campus_name: "Paris".to_string(),
            time_zone: "Europe/Paris".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["first_name"], "John");
        assert_eq!(value["accessToken"], "at");
        assert_eq!(value["refreshToken"], "rt");
        assert_eq!(value["campusID"], 1);
        assert_eq!(value["campusName"], "Paris");
        assert_eq!(value["timeZone"], "Europe/Paris");
    }

    #[test]
    fn test_public_user_omits_tokens() {
        let raw = r#"{"id":3,"login":"x","first_name":"X","displayname":"X Y",
            "accessToken":"secret","refreshToken":"secret2",
            "campusID":9,"campusName":"Lyon","timeZone":"Europe/Paris"}"#;
        let user: UserProfile = serde_json::from_str(raw).unwrap();

        let public = serde_json::to_string(&PublicUser::from(&user)).unwrap();
        assert!(!public.contains("secret"));
        assert!(public.contains("\"campus_name\":\"Lyon\""));
    }
}
