//! Intents the skill understands.

use std::fmt;

use crate::error::ChatError;

pub const GET_FIRST_EVENT: &str = "GetFirstEventIntent";
pub const GET_NEXT_EVENT: &str = "GetNextEventIntent";
pub const HELP: &str = "AMAZON.HelpIntent";
pub const STOP: &str = "AMAZON.StopIntent";
pub const CANCEL: &str = "AMAZON.CancelIntent";

/// A recognised intent with the slot values it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Start narrating a date's asteroids. `day` is the raw slot value.
    GetFirstEvent { day: Option<String> },
    GetNextEvent,
    Help,
    Stop,
    Cancel,
}

impl Intent {
    /// Map a host intent name onto an [`Intent`].
    ///
    /// The `day` slot is only kept for [`Intent::GetFirstEvent`].
    pub fn from_name(name: &str, day: Option<String>) -> Result<Self, ChatError> {
        match name {
            GET_FIRST_EVENT => Ok(Intent::GetFirstEvent { day }),
            GET_NEXT_EVENT => Ok(Intent::GetNextEvent),
            HELP => Ok(Intent::Help),
            STOP => Ok(Intent::Stop),
            CANCEL => Ok(Intent::Cancel),
            other => Err(ChatError::UnknownIntent(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::GetFirstEvent { .. } => GET_FIRST_EVENT,
            Intent::GetNextEvent => GET_NEXT_EVENT,
            Intent::Help => HELP,
            Intent::Stop => STOP,
            Intent::Cancel => CANCEL,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(
            Intent::from_name("GetFirstEventIntent", Some("2024-03-05".to_string())).unwrap(),
            Intent::GetFirstEvent {
                day: Some("2024-03-05".to_string())
            }
        );
        assert_eq!(
            Intent::from_name("GetNextEventIntent", None).unwrap(),
            Intent::GetNextEvent
        );
        assert_eq!(Intent::from_name("AMAZON.HelpIntent", None).unwrap(), Intent::Help);
        assert_eq!(Intent::from_name("AMAZON.StopIntent", None).unwrap(), Intent::Stop);
        assert_eq!(Intent::from_name("AMAZON.CancelIntent", None).unwrap(), Intent::Cancel);
    }

    #[test]
    fn test_day_slot_dropped_for_other_intents() {
        assert_eq!(
            Intent::from_name("GetNextEventIntent", Some("2024-03-05".to_string())).unwrap(),
            Intent::GetNextEvent
        );
    }

    #[test]
    fn test_unknown_name_is_error() {
        let err = Intent::from_name("AMAZON.FallbackIntent", None).unwrap_err();
        assert!(matches!(err, ChatError::UnknownIntent(ref n) if n == "AMAZON.FallbackIntent"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(Intent::from_name("getfirsteventintent", None).is_err());
    }

    #[test]
    fn test_name_round_trip() {
        for intent in [
            Intent::GetFirstEvent { day: None },
            Intent::GetNextEvent,
            Intent::Help,
            Intent::Stop,
            Intent::Cancel,
        ] {
            assert_eq!(Intent::from_name(intent.name(), None).unwrap(), intent);
            assert_eq!(intent.to_string(), intent.name());
        }
    }
}
