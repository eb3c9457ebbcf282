//! Token record model and validity helpers.

// self
use crate::{_prelude::*, auth::SecretString};

/// Bearer token issued by the identity endpoint, paired with its absolute expiry.
///
/// Records are never mutated in place; a refresh replaces the whole value. Validity is a
/// two-state check: the record is usable iff its expiry lies strictly in the future.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Opaque token identifier attached as `X-Auth-Token` to every storage request.
	pub id: SecretString,
	/// Absolute expiry instant reported by the identity endpoint.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
}
impl TokenRecord {
	/// Creates a record from a raw token id and its expiry instant.
	pub fn new(id: impl Into<SecretString>, expires_at: OffsetDateTime) -> Self {
		Self { id: id.into(), expires_at }
	}

	/// Returns `true` if the record is usable at the provided instant.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at > instant
	}

	/// Convenience helper that checks validity against the current UTC instant.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		!self.is_valid_at(instant)
	}

	/// Returns `true` if the record is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		!self.is_valid()
	}

	/// Lifetime left at the provided instant; negative once the record has expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn validity_is_strict_on_the_expiry_instant() {
		let record = TokenRecord::new("token-id", macros::datetime!(2026-01-01 00:00 UTC));

		assert!(record.is_valid_at(macros::datetime!(2025-12-31 23:59 UTC)));
		assert!(record.is_expired_at(macros::datetime!(2026-01-01 00:00 UTC)));
		assert!(record.is_expired_at(macros::datetime!(2026-01-01 00:01 UTC)));
	}

	#[test]
	fn remaining_lifetime_goes_negative_after_expiry() {
		let record = TokenRecord::new("token-id", macros::datetime!(2026-01-01 00:00 UTC));

		assert_eq!(
			record.remaining_at(macros::datetime!(2025-12-31 23:00 UTC)),
			Duration::hours(1)
		);
		assert!(record.remaining_at(macros::datetime!(2026-01-01 01:00 UTC)).is_negative());
	}

	#[test]
	fn expiry_serializes_as_rfc3339() {
		let record = TokenRecord::new("token-id", macros::datetime!(2026-01-01 09:00 UTC));
		let payload =
			serde_json::to_string(&record).expect("Token record should serialize to JSON.");

		assert!(payload.contains("2026-01-01T09:00:00Z"));

		let round_trip: TokenRecord =
			serde_json::from_str(&payload).expect("Serialized record should deserialize.");

		assert_eq!(round_trip.expires_at, record.expires_at);
		assert_eq!(round_trip.id.expose(), "token-id");
	}

	#[test]
	fn debug_output_redacts_the_token_id() {
		let record = TokenRecord::new("token-id", macros::datetime!(2026-01-01 00:00 UTC));

		assert!(!format!("{record:?}").contains("token-id"));
	}
}
