//! The closed list of in-place mutators and their rejection.
//!
//! [`ImmutableDate`](crate::ImmutableDate) has no mutating API. The named
//! entry points below exist so code written against a mutable date API fails
//! loudly instead of silently doing something else; every one of them routes
//! to [`reject_mutation`].

use std::str::FromStr;

use crate::error::DateError;

/// Every in-place mutator name the wrapper refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutator {
    AddDuration,
    SubtractDuration,
    Truncate,
    Set,
    SetYear,
    SetMonth,
    SetDay,
    SetHour,
    SetMinute,
    SetSecond,
    SetNanosecond,
    SetTimeZone,
    SetLocale,
    SetFormatter,
}

impl Mutator {
    pub const ALL: [Mutator; 14] = [
        Mutator::AddDuration,
        Mutator::SubtractDuration,
        Mutator::Truncate,
        Mutator::Set,
        Mutator::SetYear,
        Mutator::SetMonth,
        Mutator::SetDay,
        Mutator::SetHour,
        Mutator::SetMinute,
        Mutator::SetSecond,
        Mutator::SetNanosecond,
        Mutator::SetTimeZone,
        Mutator::SetLocale,
        Mutator::SetFormatter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mutator::AddDuration => "add_duration",
            Mutator::SubtractDuration => "subtract_duration",
            Mutator::Truncate => "truncate",
            Mutator::Set => "set",
            Mutator::SetYear => "set_year",
            Mutator::SetMonth => "set_month",
            Mutator::SetDay => "set_day",
            Mutator::SetHour => "set_hour",
            Mutator::SetMinute => "set_minute",
            Mutator::SetSecond => "set_second",
            Mutator::SetNanosecond => "set_nanosecond",
            Mutator::SetTimeZone => "set_time_zone",
            Mutator::SetLocale => "set_locale",
            Mutator::SetFormatter => "set_formatter",
        }
    }
}

impl std::fmt::Display for Mutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by [`Mutator::from_str`] for a name outside the list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mutator: '{0}'")]
pub struct UnknownMutator(pub String);

impl FromStr for Mutator {
    type Err = UnknownMutator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mutator::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMutator(s.to_string()))
    }
}

/// Refuse an in-place mutation. Never succeeds and never reads any state.
pub fn reject_mutation<T>(mutator: Mutator) -> Result<T, DateError> {
    tracing::debug!(operation = mutator.name(), "rejected in-place mutation");
    Err(DateError::MutationForbidden {
        operation: mutator.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MUTATION_FORBIDDEN_PREFIX;

    #[test]
    fn test_every_mutator_is_rejected() {
        for m in Mutator::ALL {
            let err = reject_mutation::<()>(m).unwrap_err();
            assert!(err.is_mutation_forbidden());
            assert!(
                err.to_string().starts_with(MUTATION_FORBIDDEN_PREFIX),
                "got: {err}"
            );
            assert!(err.to_string().contains(m.name()));
        }
    }

    #[test]
    fn test_names_resolve_back_to_mutators() {
        for m in Mutator::ALL {
            assert_eq!(m.name().parse::<Mutator>().unwrap(), m);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Mutator::ALL.iter().map(|m| m.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Mutator::ALL.len());
    }

    #[test]
    fn test_unknown_name() {
        let err = "set_weekday".parse::<Mutator>().unwrap_err();
        assert_eq!(err.to_string(), "unknown mutator: 'set_weekday'");
    }
}
