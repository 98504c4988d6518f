// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile resolution: turn OAuth tokens into a normalized [`UserProfile`].

use crate::models::UserProfile;
use crate::services::intra::{IntraCampus, IntraCampusUser, IntraClient, IntraMe};

/// Campus assigned when the identity payload lists no campus at all.
pub const DEFAULT_CAMPUS_ID: u64 = 42;
pub const DEFAULT_CAMPUS_NAME: &str = "Paris";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Paris";

/// Why a profile could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Transport failure, including timeouts.
    #[error("identity request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("identity endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body is not a valid identity payload.
    #[error("malformed identity payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Location attributes derived from the campus lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusAssignment {
    pub campus_id: u64,
    pub campus_name: String,
    pub time_zone: String,
}

impl CampusAssignment {
    fn default_campus() -> Self {
        Self {
            campus_id: DEFAULT_CAMPUS_ID,
            campus_name: DEFAULT_CAMPUS_NAME.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

impl From<&IntraCampus> for CampusAssignment {
    fn from(campus: &IntraCampus) -> Self {
        Self {
            campus_id: campus.id,
            campus_name: campus.name.clone(),
            time_zone: campus.time_zone.clone(),
        }
    }
}

/// Pick the user's campus.
///
/// The first membership flagged primary wins if its campus is listed;
/// otherwise the first listed campus, otherwise the default campus. Only
/// the first primary membership is considered.
pub fn select_campus(
    campuses: &[IntraCampus],
    memberships: &[IntraCampusUser],
) -> CampusAssignment {
    memberships
        .iter()
        .find(|membership| membership.is_primary)
        .and_then(|primary| campuses.iter().find(|c| c.id == primary.campus_id))
        .or_else(|| campuses.first())
        .map(CampusAssignment::from)
        .unwrap_or_else(CampusAssignment::default_campus)
}

/// Build the stored profile from an identity payload and the login's tokens.
pub fn build_profile(me: IntraMe, access_token: &str, refresh_token: &str) -> UserProfile {
    let campus = select_campus(&me.campus, &me.campus_users);

    UserProfile {
        id: me.id,
        login: me.login,
        first_name: me.first_name,
        displayname: me.displayname,
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        campus_id: campus.campus_id,
        campus_name: campus.campus_name,
        time_zone: campus.time_zone,
    }
}

/// Resolves the profile of the user who owns an access token.
#[derive(Clone)]
pub struct ProfileResolver {
    client: IntraClient,
}

impl ProfileResolver {
    pub fn new(client: IntraClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &IntraClient {
        &self.client
    }

    /// Fetch and normalize the profile, reporting why it failed.
    pub async fn resolve(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<UserProfile, ResolveError> {
        let me = self.client.get_me(access_token).await?;
        Ok(build_profile(me, access_token, refresh_token))
    }

    /// Fetch and normalize the profile; any failure yields `None`.
    pub async fn resolve_profile(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Option<UserProfile> {
        match self.resolve(access_token, refresh_token).await {
            Ok(profile) => {
                tracing::debug!(
                    user_id = profile.id,
                    campus_id = profile.campus_id,
                    "Profile resolved"
                );
                Some(profile)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve profile");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campus(id: u64, name: &str, tz: &str) -> IntraCampus {
        IntraCampus {
            id,
            name: name.to_string(),
            time_zone: tz.to_string(),
        }
    }

    fn membership(campus_id: u64, is_primary: bool) -> IntraCampusUser {
        IntraCampusUser {
            campus_id,
            is_primary,
        }
    }

    #[test]
    fn test_primary_campus_wins_over_first() {
        let campuses = [
            campus(1, "Paris", "Europe/Paris"),
            campus(2, "Lyon", "Europe/Paris"),
        ];
        let picked = select_campus(&campuses, &[membership(2, true)]);

        assert_eq!(picked.campus_id, 2);
        assert_eq!(picked.campus_name, "Lyon");
        assert_eq!(picked.time_zone, "Europe/Paris");
    }

    #[test]
    fn test_primary_campus_independent_of_order() {
        let campuses = [
            campus(7, "Tokyo", "Asia/Tokyo"),
            campus(3, "Berlin", "Europe/Berlin"),
            campus(5, "Quebec", "America/Toronto"),
        ];
        let memberships = [
            membership(7, false),
            membership(5, true),
            membership(3, false),
        ];

        let picked = select_campus(&campuses, &memberships);
        assert_eq!(picked, CampusAssignment::from(&campuses[2]));
    }

    #[test]
    fn test_no_primary_uses_first_campus() {
        let campuses = [
            campus(9, "Madrid", "Europe/Madrid"),
            campus(2, "Lyon", "Europe/Paris"),
        ];
        let picked = select_campus(&campuses, &[membership(2, false)]);

        assert_eq!(picked.campus_id, 9);
        assert_eq!(picked.campus_name, "Madrid");
        assert_eq!(picked.time_zone, "Europe/Madrid");
    }

    #[test]
    fn test_empty_campus_list_uses_default() {
        let picked = select_campus(&[], &[membership(2, true)]);

        assert_eq!(picked.campus_id, 42);
        assert_eq!(picked.campus_name, "Paris");
        assert_eq!(picked.time_zone, "Europe/Paris");
    }

    #[test]
    fn test_unknown_primary_campus_keeps_first() {
        let campuses = [campus(1, "Paris", "Europe/Paris")];
        let picked = select_campus(&campuses, &[membership(99, true)]);
        assert_eq!(picked.campus_id, 1);
    }

    #[test]
    fn test_only_first_primary_membership_counts() {
        // The second primary flag is ignored even though its campus exists.
        let campuses = [
            campus(1, "Paris", "Europe/Paris"),
            campus(2, "Lyon", "Europe/Paris"),
        ];
        let memberships = [membership(99, true), membership(2, true)];

        let picked = select_campus(&campuses, &memberships);
        assert_eq!(picked.campus_id, 1);
    }

    #[test]
    fn test_build_profile_carries_tokens() {
        let me = IntraMe {
            id: 123,
            login: "jdoe".to_string(),
            first_name: "John".to_string(),
            displayname: "John Doe".to_string(),
            campus: vec![],
            campus_users: vec![],
        };

        let profile = build_profile(me, "access", "refresh");
        assert_eq!(profile.id, 123);
        assert_eq!(profile.access_token, "access");
        assert_eq!(profile.refresh_token, "refresh");
        assert_eq!(profile.campus_id, DEFAULT_CAMPUS_ID);
    }
}
