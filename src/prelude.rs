//! Commonly used imports
//!
//! Use `use railway::prelude::*;` for quick access to the wrapper types, their variants and
//! the validators.

// Core types
pub use crate::{Fallible, Optional};

// Variants
pub use crate::{Absent, Failure, Present, Success};

// Pending values
pub use crate::future::{AsyncFallible, AsyncOptional, IntoAsyncFallible, IntoAsyncOptional};

// Validation
pub use crate::{validate, validate_async, Record};
