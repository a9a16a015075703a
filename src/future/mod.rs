//! Asynchronous counterparts of [`Optional`](crate::Optional) and [`Fallible`](crate::Fallible).
//!
//! An [`AsyncOptional`] or [`AsyncFallible`] holds exactly one pending computation and exposes
//! the same combinators as the value it resolves to. Each combinator awaits the wrapped
//! computation, delegates to the resolved value and, where the synchronous combinator returns a
//! new wrapped value, wraps the result again. Both wrappers can be awaited directly.
//!
//! ```rust
//! use railway::{AsyncOptional, Present};
//!
//! let resolved = futures::executor::block_on(async {
//!     AsyncOptional::present(1).map(|n| n + 1).await
//! });
//! assert_eq!(resolved, Present(2));
//! ```
mod fallible;
mod optional;

pub use fallible::*;
pub use optional::*;
