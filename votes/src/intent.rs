//! Decoding of the raw `{up_vote, down_vote}` flag pair.

use crate::error::VoteError;
use weft_types::Polarity;

/// A well-formed vote intent.
///
/// The inbound payload carries two optional booleans. Exactly one
/// direction may be addressed: a `true` casts that direction, a `false`
/// retracts it. Both-unset and equal-set combinations are malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteIntent {
    Cast(Polarity),
    Retract(Polarity),
}

impl VoteIntent {
    pub fn from_flags(
        up_vote: Option<bool>,
        down_vote: Option<bool>,
    ) -> Result<Self, VoteError> {
        match (up_vote, down_vote) {
            (None, None) => Err(VoteError::EmptyIntent),
            (Some(up), Some(down)) if up == down => Err(VoteError::ContradictoryIntent),
            (Some(true), _) => Ok(Self::Cast(Polarity::Up)),
            (_, Some(true)) => Ok(Self::Cast(Polarity::Down)),
            (Some(false), _) => Ok(Self::Retract(Polarity::Up)),
            (_, Some(false)) => Ok(Self::Retract(Polarity::Down)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_decodes() {
        assert_eq!(
            VoteIntent::from_flags(Some(true), None).unwrap(),
            VoteIntent::Cast(Polarity::Up)
        );
        assert_eq!(
            VoteIntent::from_flags(None, Some(true)).unwrap(),
            VoteIntent::Cast(Polarity::Down)
        );
        assert_eq!(
            VoteIntent::from_flags(Some(false), None).unwrap(),
            VoteIntent::Retract(Polarity::Up)
        );
        assert_eq!(
            VoteIntent::from_flags(None, Some(false)).unwrap(),
            VoteIntent::Retract(Polarity::Down)
        );
    }

    #[test]
    fn test_opposed_flags_act_on_the_true_direction() {
        assert_eq!(
            VoteIntent::from_flags(Some(true), Some(false)).unwrap(),
            VoteIntent::Cast(Polarity::Up)
        );
        assert_eq!(
            VoteIntent::from_flags(Some(false), Some(true)).unwrap(),
            VoteIntent::Cast(Polarity::Down)
        );
    }

    #[test]
    fn test_malformed_combinations_are_rejected() {
        assert!(matches!(
            VoteIntent::from_flags(None, None),
            Err(VoteError::EmptyIntent)
        ));
        assert!(matches!(
            VoteIntent::from_flags(Some(true), Some(true)),
            Err(VoteError::ContradictoryIntent)
        ));
        assert!(matches!(
            VoteIntent::from_flags(Some(false), Some(false)),
            Err(VoteError::ContradictoryIntent)
        ));
    }
}
