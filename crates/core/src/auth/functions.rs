use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Claims, Identity};

/// Lifetime of a session token in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Generate a new server-side user identifier.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Build the claims for a token issued at `now`.
pub fn claims_for(identity: &Identity, now: DateTime<Utc>) -> Claims {
    let iat = now.timestamp();
    Claims {
        user_id: identity.user_id.clone(),
        email: identity.email.clone(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    }
}

/// Check if a token has expired. A token is still valid at exactly `exp`.
///
/// `now` is compared at full precision, so sub-second time past `exp` counts
/// as expired. A token never outlives `TOKEN_TTL_SECS` from its issue instant.
pub fn is_token_expired(claims: &Claims, now: DateTime<Utc>) -> bool {
    DateTime::from_timestamp(claims.exp, 0).is_none_or(|exp| now > exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn identity() -> Identity {
        Identity {
            user_id: "user-1".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_user_id_is_unique_uuid() {
        let a = generate_user_id();
        let b = generate_user_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_claims_expire_one_hour_after_issue() {
        let claims = claims_for(&identity(), t0());
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.identity(), identity());
    }

    #[test]
    fn test_token_valid_until_exact_expiry() {
        let claims = claims_for(&identity(), t0());
        assert!(!is_token_expired(&claims, t0()));
        assert!(!is_token_expired(&claims, t0() + Duration::seconds(3600)));
    }

    #[test]
    fn test_token_expired_one_second_after_expiry() {
        let claims = claims_for(&identity(), t0());
        assert!(is_token_expired(&claims, t0() + Duration::seconds(3601)));
    }

    #[test]
    fn test_token_expires_within_ttl_of_fractional_issue_instant() {
        let issued = t0() + Duration::milliseconds(700);
        let claims = claims_for(&identity(), issued);

        let just_past_ttl = issued + Duration::seconds(TOKEN_TTL_SECS) + Duration::milliseconds(1);
        assert!(is_token_expired(&claims, just_past_ttl));
        assert!(is_token_expired(&claims, t0() + Duration::milliseconds(3_600_200)));
        assert!(!is_token_expired(&claims, issued + Duration::seconds(TOKEN_TTL_SECS - 1)));
    }

    #[test]
    fn test_out_of_range_expiry_is_expired() {
        let mut claims = claims_for(&identity(), t0());
        claims.exp = i64::MAX;
        assert!(is_token_expired(&claims, t0()));
    }
}
