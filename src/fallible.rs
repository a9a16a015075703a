use std::future::Future;

use futures::future::{self, Either, FutureExt};

use crate::error::UnwrapError;
use crate::future::AsyncFallible;
use crate::optional::{Absent, Optional, Present};

pub use self::Fallible::{Failure, Success};

/// The outcome of a computation that may fail.
///
/// `Fallible` is a closed sum of [`Success`] and [`Failure`]. The error type `E` is chosen by the
/// caller and is never wrapped or replaced by the combinators: a failure flowing through
/// [`and_then`](Fallible::and_then) or [`map_ok`](Fallible::map_ok) comes out exactly as it went in.
///
/// # Examples
///
/// ```rust
/// use railway::{Failure, Fallible, Success};
///
/// fn parse(input: &str) -> Fallible<i32, String> {
///     input.parse::<i32>().map_err(|e| e.to_string()).into()
/// }
///
/// assert_eq!(parse("4").map_ok(|n| n * 2), Success(8));
/// assert!(parse("four").and_then(|n| Success(n * 2)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fallible<T, E> {
    /// The computation succeeded
    Success(T),
    /// The computation failed with a caller-defined error
    Failure(E),
}

impl<T, E> Fallible<T, E> {
    /// Calls exactly one handler: `on_success` with the value, or `on_failure` with the error.
    #[inline]
    pub fn match_with<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(E) -> U,
    {
        match self {
            Success(value) => on_success(value),
            Failure(error) => on_failure(error),
        }
    }

    /// Returns `true` on a [`Success`].
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.as_ref().match_with(|_| true, |_| false)
    }

    /// Returns `true` on a [`Failure`].
    #[inline]
    pub fn is_err(&self) -> bool {
        self.as_ref().match_with(|_| false, |_| true)
    }

    /// Converts from `&Fallible<T, E>` to `Fallible<&T, &E>`.
    #[inline]
    pub const fn as_ref(&self) -> Fallible<&T, &E> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(error),
        }
    }

    /// Converts from `&mut Fallible<T, E>` to `Fallible<&mut T, &mut E>`.
    #[inline]
    pub fn as_mut(&mut self) -> Fallible<&mut T, &mut E> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(error),
        }
    }

    /// Calls `f` with the success value for its side effect only.
    #[inline]
    pub fn if_ok<F>(self, f: F)
    where
        F: FnOnce(T),
    {
        self.match_with(f, |_| ())
    }

    /// Calls `f` with the error for its side effect only.
    #[inline]
    pub fn if_err<F>(self, f: F)
    where
        F: FnOnce(E),
    {
        self.match_with(|_| (), f)
    }

    /// Transforms the success value, leaving a failure untouched.
    #[inline]
    pub fn map_ok<U, F>(self, f: F) -> Fallible<U, E>
    where
        F: FnOnce(T) -> U,
    {
        self.match_with(|value| Success(f(value)), Failure)
    }

    /// Transforms the error, leaving a success untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Failure, Fallible};
    ///
    /// let x: Fallible<i32, &str> = Failure("timeout");
    /// assert_eq!(x.map_err(str::len), Failure(7));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Fallible<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        self.match_with(Success, |error| Failure(f(error)))
    }

    /// Transforms whichever side is present.
    #[inline]
    pub fn map<U, E2, FO, FE>(self, on_success: FO, on_failure: FE) -> Fallible<U, E2>
    where
        FO: FnOnce(T) -> U,
        FE: FnOnce(E) -> E2,
    {
        self.match_with(
            |value| Success(on_success(value)),
            |error| Failure(on_failure(error)),
        )
    }

    /// Returns the success value.
    ///
    /// The error payload is dropped; use [`unwrap_err`](Fallible::unwrap_err) or
    /// [`match_with`](Fallible::match_with) to inspect it.
    ///
    /// # Panics
    ///
    /// Panics if the value is a [`Failure`].
    ///
    /// ```should_panic
    /// use railway::{Failure, Fallible};
    ///
    /// let x: Fallible<i32, &str> = Failure("bad");
    /// x.unwrap(); // panics
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics if the value is a [`Success`].
    #[inline]
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self.try_unwrap_err() {
            Ok(error) => error,
            Err(misuse) => panic!("{}", misuse),
        }
    }

    /// Returns the success value, or [`UnwrapError::FailureValue`] instead of panicking.
    #[inline]
    pub fn try_unwrap(self) -> Result<T, UnwrapError> {
        self.match_with(Ok, |_| Err(UnwrapError::FailureValue))
    }

    /// Returns the error, or [`UnwrapError::SuccessValue`] instead of panicking.
    #[inline]
    pub fn try_unwrap_err(self) -> Result<E, UnwrapError> {
        self.match_with(|_| Err(UnwrapError::SuccessValue), Ok)
    }

    /// Returns the success value, panicking with `msg` on a [`Failure`].
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(_) => panic!("{}", msg),
        }
    }

    /// Returns the error, panicking with `msg` on a [`Success`].
    #[inline]
    #[track_caller]
    pub fn expect_err(self, msg: &str) -> E {
        match self.try_unwrap_err() {
            Ok(error) => error,
            Err(_) => panic!("{}", msg),
        }
    }

    /// Returns the success value or recovers one from the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Failure, Fallible, Success};
    ///
    /// let ok: Fallible<usize, &str> = Success(2);
    /// let err: Fallible<usize, &str> = Failure("four");
    /// assert_eq!(ok.unwrap_or(str::len), 2);
    /// assert_eq!(err.unwrap_or(str::len), 4);
    /// ```
    #[inline]
    pub fn unwrap_or<F>(self, on_failure: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.match_with(|value| value, on_failure)
    }

    /// Chains a dependent fallible computation.
    ///
    /// A [`Failure`] short-circuits: `on_success` is not invoked and the same error is returned.
    #[inline]
    pub fn and_then<U, F>(self, on_success: F) -> Fallible<U, E>
    where
        F: FnOnce(T) -> Fallible<U, E>,
    {
        self.match_with(on_success, Failure)
    }

    /// Recovers from a failure with another fallible computation.
    #[inline]
    pub fn or_then<E2, F>(self, on_failure: F) -> Fallible<T, E2>
    where
        F: FnOnce(E) -> Fallible<T, E2>,
    {
        self.match_with(Success, on_failure)
    }

    /// Projects the success value into an [`Optional`], discarding the error.
    #[inline]
    pub fn ok(self) -> Optional<T> {
        self.match_with(Present, |_| Absent)
    }

    /// Projects the error into an [`Optional`], discarding the success value.
    #[inline]
    pub fn err(self) -> Optional<E> {
        self.match_with(|_| Absent, Present)
    }

    /// Converts into a standard [`Result`].
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        self.match_with(Ok, Err)
    }

    /// Lifts an already resolved value into an [`AsyncFallible`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::Fallible;
    ///
    /// let pending = Fallible::<u8, &str>::Failure("denied").into_async().map_err(str::len);
    /// assert_eq!(futures::executor::block_on(pending.unwrap_err()), 6);
    /// ```
    pub fn into_async<'a>(self) -> AsyncFallible<'a, T, E>
    where
        T: 'a,
        E: 'a,
    {
        AsyncFallible::new(self)
    }

    /// Calls exactly one handler and returns the pending value it produced.
    pub fn match_async<U, S, F, FutS, FutF>(
        self,
        on_success: S,
        on_failure: F,
    ) -> impl Future<Output = U>
    where
        S: FnOnce(T) -> FutS,
        F: FnOnce(E) -> FutF,
        FutS: Future<Output = U>,
        FutF: Future<Output = U>,
    {
        self.match_with(
            |value| Either::Left(on_success(value)),
            |error| Either::Right(on_failure(error)),
        )
    }

    /// Calls `f` with the success value and returns its pending side effect.
    pub fn if_ok_async<F, Fut>(self, f: F) -> impl Future<Output = ()>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.match_async(f, |_| future::ready(()))
    }

    /// Calls `f` with the error and returns its pending side effect.
    pub fn if_err_async<F, Fut>(self, f: F) -> impl Future<Output = ()>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.match_async(|_| future::ready(()), f)
    }

    /// Transforms the success value with an asynchronous function.
    pub fn map_ok_async<'a, U, F, Fut>(self, f: F) -> AsyncFallible<'a, U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + 'a,
        U: 'a,
        E: 'a,
    {
        self.match_with(
            |value| AsyncFallible::new(f(value).map(Fallible::<U, E>::Success)),
            AsyncFallible::failure,
        )
    }

    /// Transforms the error with an asynchronous function.
    pub fn map_err_async<'a, E2, F, Fut>(self, f: F) -> AsyncFallible<'a, T, E2>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = E2> + 'a,
        T: 'a,
        E2: 'a,
    {
        self.match_with(AsyncFallible::success, |error| {
            AsyncFallible::new(f(error).map(Fallible::<T, E2>::Failure))
        })
    }

    /// Transforms whichever side is present with an asynchronous function.
    pub fn map_async<'a, U, E2, FO, FE, FutO, FutE>(
        self,
        on_success: FO,
        on_failure: FE,
    ) -> AsyncFallible<'a, U, E2>
    where
        FO: FnOnce(T) -> FutO,
        FE: FnOnce(E) -> FutE,
        FutO: Future<Output = U> + 'a,
        FutE: Future<Output = E2> + 'a,
        U: 'a,
        E2: 'a,
    {
        self.match_with(
            |value| AsyncFallible::new(on_success(value).map(Fallible::<U, E2>::Success)),
            |error| AsyncFallible::new(on_failure(error).map(Fallible::<U, E2>::Failure)),
        )
    }

    /// Chains a dependent asynchronous fallible computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Failure, Fallible, Success};
    ///
    /// let fetched = futures::executor::block_on(async {
    ///     Fallible::<u32, String>::Success(7)
    ///         .and_then_async(|id| async move { Success::<_, String>(format!("user-{id}")) })
    ///         .await
    /// });
    /// assert_eq!(fetched, Success("user-7".to_string()));
    /// ```
    pub fn and_then_async<'a, U, F, Fut>(self, on_success: F) -> AsyncFallible<'a, U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Fallible<U, E>> + 'a,
        U: 'a,
        E: 'a,
    {
        self.match_with(
            |value| AsyncFallible::new(on_success(value)),
            AsyncFallible::failure,
        )
    }

    /// Recovers from a failure with an asynchronous fallible computation.
    pub fn or_then_async<'a, E2, F, Fut>(self, on_failure: F) -> AsyncFallible<'a, T, E2>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Fallible<T, E2>> + 'a,
        T: 'a,
        E2: 'a,
    {
        self.match_with(AsyncFallible::success, |error| {
            AsyncFallible::new(on_failure(error))
        })
    }
}

impl<T, E> From<Result<T, E>> for Fallible<T, E> {
    #[inline]
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Success(value),
            Err(error) => Failure(error),
        }
    }
}

impl<T, E> From<Fallible<T, E>> for Result<T, E> {
    #[inline]
    fn from(value: Fallible<T, E>) -> Self {
        value.into_result()
    }
}
