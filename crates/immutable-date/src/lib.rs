//! # immutable-date
//!
//! Immutable date values with capability-checked arithmetic.
//!
//! Dates built by this crate never change after construction. Adding or
//! subtracting produces a new value; every legacy in-place mutator is present
//! only to fail with [`DateError::MutationForbidden`]. What `date + x` and
//! `date - x` mean is decided by what `x` can do (report itself as seconds,
//! or as an epoch offset), and every other combination is rejected with its
//! own error.
//!
//! ## Modules
//!
//! - [`date`] — [`ImmutableDate`]: construction, wrapping, accessors, rejected mutators
//! - [`arith`] — `+` / `-` dispatch and the [`Temporal`] `interval_factory` hook
//! - [`operand`] — operand capabilities and classification
//! - [`mutation`] — the closed list of refused mutator names
//! - [`calendar`] — field/epoch construction, timezones and month lengths via `chrono`
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use immutable_date::{DateError, DateFields, Difference, ImmutableDate};
//!
//! let t = ImmutableDate::from_fields(&DateFields::ymd(2026, 3, 15).hms(14, 0, 0)).unwrap();
//! let later = (t + 100_i64).unwrap();
//!
//! assert_eq!((later - t).unwrap(), Difference::Interval(100));
//! assert_eq!((100_i64 - t).unwrap_err(), DateError::ForbiddenOrder);
//! assert!(t.set_hour(9).unwrap_err().is_mutation_forbidden());
//! ```

pub mod arith;
pub mod calendar;
pub mod date;
pub mod error;
pub mod mutation;
pub mod operand;

pub use arith::{add, subtract, DateDifference, Difference, Temporal};
pub use calendar::{ConstructOptions, DateFields, TruncateUnit};
pub use date::{DateSpec, ImmutableDate};
pub use error::{DateError, ErrorKind, UnsupportedReason, MUTATION_FORBIDDEN_PREFIX};
pub use mutation::{reject_mutation, Mutator};
pub use operand::{classify, Capabilities, Classification, DateLike, IntervalLike, Operand};
