//! # Railway: Optional and Fallible Values
//!
//! Express "a value that may be absent" or "a computation that may fail" as a first-class
//! value with one combinator vocabulary, and keep using that vocabulary across `.await`.
//!
//! ## Core Types
//!
//! - **[`Optional<T>`]**: [`Present`] or [`Absent`]
//! - **[`Fallible<T, E>`]**: [`Success`] or [`Failure`], with a caller-chosen error type
//! - **[`AsyncOptional`] / [`AsyncFallible`]**: a pending `Optional` / `Fallible` exposing the same combinators
//!
//! ## Key Features
//!
//! - **Handler-centric**: `match_with` is the primitive, everything else derives from it
//! - **Chainable**: `map`, `and_then`, `or_then`, `unwrap_or` and their `*_async` mirrors
//! - **Sequential validation**: [`validate()`], [`validate_async`] and [`validate!`] stop at the first failure
//!
//! ## Example
//!
//! ```
//! use railway::*;
//!
//! let number = futures::executor::block_on(
//!     Optional::<i32>::Absent
//!         .or_then_async(|| async { Present(1) })
//!         .map(|n| n + 1)
//!         .unwrap_or(|| 0),
//! );
//! assert_eq!(number, 2);
//! ```
//!
//! ## Misuse
//!
//! [`Optional::unwrap`] on [`Absent`], [`Fallible::unwrap`] on [`Failure`] and
//! [`Fallible::unwrap_err`] on [`Success`] are programmer errors and panic with an
//! [`UnwrapError`] message. Use the `try_unwrap*` accessors to get the error as a value.

mod error;
mod fallible;
pub mod future;
mod optional;
pub mod prelude;
mod validation;

pub use error::*;
pub use fallible::*;
pub use future::*;
pub use optional::*;
pub use validation::*;
