//! Strongly typed Ads API identifiers.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 64;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (account, entity).
		kind: &'static str,
	},
	/// The identifier contains characters that cannot appear in an API path segment.
	#[error("{kind} identifier contains a character outside [A-Za-z0-9_-].")]
	InvalidCharacter {
		/// Kind of identifier (account, entity).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (account, entity).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { AdAccountId, "Identifier of an Ads API account (e.g. `18ce54d4x5t`).", "AdAccount" }
def_id! { EntityId, "Identifier of an Ads API entity such as a campaign.", "Entity" }

// Identifiers are spliced into URL paths, so keep them to a path-safe alphabet.
fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if !view.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
		return Err(IdentifierError::InvalidCharacter { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert!(AdAccountId::new(" 18ce54d4x5t").is_err(), "Leading whitespace must be rejected.");
		assert!(AdAccountId::new("18ce54d4x5t/..").is_err(), "Path separators must be rejected.");

		let account =
			AdAccountId::new("18ce54d4x5t").expect("Account fixture should be considered valid.");

		assert_eq!(account.as_ref(), "18ce54d4x5t");
		assert_eq!(format!("{account:?}"), "AdAccount(18ce54d4x5t)");
		assert!(EntityId::new("").is_err());
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let entity: EntityId =
			serde_json::from_str("\"8wku2\"").expect("Entity should deserialize successfully.");

		assert_eq!(entity.as_ref(), "8wku2");
		assert!(serde_json::from_str::<EntityId>("\"with space\"").is_err());
	}

	#[test]
	fn keyed_maps_look_up_by_str() {
		let spend = HashMap::from([
			(EntityId::new("8wku2").expect("Entity fixture should be valid."), 12_340_000_i64),
			(EntityId::new("9xlv3").expect("Entity fixture should be valid."), 0),
		]);

		assert_eq!(spend.get("8wku2"), Some(&12_340_000));
		assert_eq!(spend.get("missing"), None);
	}

	#[test]
	fn length_limits() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		EntityId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert_eq!(
			EntityId::new(&too_long),
			Err(IdentifierError::TooLong { kind: "Entity", max: IDENTIFIER_MAX_LEN })
		);
	}
}
