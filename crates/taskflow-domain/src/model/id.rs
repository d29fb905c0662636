//! Identifiers - positive integer value objects
//!
//! Every entity in the business application is keyed by a database-style
//! positive integer. Each gets its own type so a `UserId` can never be
//! passed where a `TaskId` is expected.

use serde::Serialize;

use super::validation::InvalidValueObject;

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Build from a raw integer; fails unless `value > 0`
            pub fn from_int(value: i64) -> Result<Self, InvalidValueObject> {
                if value <= 0 {
                    return Err(InvalidValueObject::new(
                        $label,
                        format!("must be positive, got {}", value),
                    ));
                }
                Ok(Self(value))
            }

            pub fn as_int(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = InvalidValueObject;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::from_int(value)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(
    /// Identity of the Task aggregate
    TaskId,
    "task id"
);
positive_id!(
    /// Identity of a user (creator, assignee, or acting user)
    UserId,
    "user id"
);
positive_id!(ClientId, "client id");
positive_id!(DealId, "deal id");
positive_id!(CommentId, "comment id");
positive_id!(CategoryId, "category id");
positive_id!(TagId, "tag id");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_is_rejected() {
        let err = TaskId::from_int(0).unwrap_err();
        assert_eq!(err.value_object, "task id");
        assert!(err.reason.contains("positive"));
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(UserId::from_int(3).unwrap(), UserId::from_int(3).unwrap());
        assert_ne!(UserId::from_int(3).unwrap(), UserId::from_int(4).unwrap());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let id = TaskId::from_int(42).unwrap();
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(42));
        assert_eq!(id.to_string(), "42");
    }

    proptest! {
        #[test]
        fn prop_non_positive_ids_are_rejected(value in i64::MIN..=0) {
            prop_assert!(TaskId::from_int(value).is_err());
            prop_assert!(UserId::try_from(value).is_err());
        }

        #[test]
        fn prop_positive_ids_round_trip(value in 1..=i64::MAX) {
            let id = TaskId::from_int(value).unwrap();
            prop_assert_eq!(id.as_int(), value);
        }
    }
}
