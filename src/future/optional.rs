use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::UnwrapError;
use crate::optional::{Absent, Optional, Present};

/// A pending [`Optional`].
///
/// Await it to obtain the resolved `Optional`, or keep chaining: every combinator returns
/// either a new `AsyncOptional` or a future of the plain result.
///
/// # Examples
///
/// ```rust
/// use railway::{Absent, AsyncOptional, Present};
///
/// let resolved = futures::executor::block_on(async {
///     AsyncOptional::new(async { Present(3) })
///         .and_then(|n| if n > 5 { Present(n) } else { Absent })
///         .or_then(|| Present(0))
///         .await
/// });
/// assert_eq!(resolved, Present(0));
/// ```
#[must_use = "an AsyncOptional does nothing unless awaited"]
pub struct AsyncOptional<'a, T> {
    inner: LocalBoxFuture<'a, Optional<T>>,
}

/// Conversion into an [`AsyncOptional`].
///
/// Implemented for every future resolving to an [`Optional`], for a resolved `Optional`, and
/// for `AsyncOptional` itself, which converts to itself without re-wrapping.
pub trait IntoAsyncOptional<'a, T> {
    /// Wraps `self` as a pending `Optional`.
    fn into_async_optional(self) -> AsyncOptional<'a, T>;
}

impl<'a, T, F> IntoAsyncOptional<'a, T> for F
where
    F: Future<Output = Optional<T>> + 'a,
{
    fn into_async_optional(self) -> AsyncOptional<'a, T> {
        AsyncOptional {
            inner: self.boxed_local(),
        }
    }
}

impl<'a, T> IntoAsyncOptional<'a, T> for AsyncOptional<'a, T> {
    #[inline]
    fn into_async_optional(self) -> AsyncOptional<'a, T> {
        self
    }
}

impl<'a, T> IntoAsyncOptional<'a, T> for Optional<T>
where
    T: 'a,
{
    fn into_async_optional(self) -> AsyncOptional<'a, T> {
        future::ready(self).into_async_optional()
    }
}

impl<'a, T> AsyncOptional<'a, T>
where
    T: 'a,
{
    /// Wraps a pending `Optional`. Passing an `AsyncOptional` returns it unchanged.
    pub fn new(value: impl IntoAsyncOptional<'a, T>) -> Self {
        value.into_async_optional()
    }

    /// An already resolved [`Present`].
    pub fn present(value: T) -> Self {
        Self::new(Present(value))
    }

    /// An already resolved [`Absent`].
    pub fn absent() -> Self {
        Self::new(Absent)
    }

    /// Resolves the value, then calls exactly one of the handlers.
    pub async fn match_with<U, P, A>(self, on_present: P, on_absent: A) -> U
    where
        P: FnOnce(T) -> U,
        A: FnOnce() -> U,
    {
        self.inner.await.match_with(on_present, on_absent)
    }

    /// Resolves to `true` if the value is [`Present`].
    pub async fn is_present(self) -> bool {
        self.inner.await.is_present()
    }

    /// Resolves to `true` if the value is [`Absent`].
    pub async fn is_absent(self) -> bool {
        self.inner.await.is_absent()
    }

    /// Calls `f` with the resolved value if it is present.
    pub async fn if_present<F>(self, f: F)
    where
        F: FnOnce(T),
    {
        self.inner.await.if_present(f)
    }

    /// Calls `f` if the resolved value is absent.
    pub async fn if_absent<F>(self, f: F)
    where
        F: FnOnce(),
    {
        self.inner.await.if_absent(f)
    }

    /// Resolves to the contained value.
    ///
    /// # Panics
    ///
    /// The returned future panics when polled to completion on an [`Absent`] value.
    pub async fn unwrap(self) -> T {
        self.inner.await.unwrap()
    }

    /// Resolves to the contained value, or to [`UnwrapError::AbsentValue`].
    pub async fn try_unwrap(self) -> Result<T, UnwrapError> {
        self.inner.await.try_unwrap()
    }

    /// Resolves to the contained value.
    ///
    /// # Panics
    ///
    /// The returned future panics with `msg` when the value is [`Absent`].
    pub async fn expect(self, msg: &str) -> T {
        self.inner.await.expect(msg)
    }

    /// Resolves to the contained value or the result of `on_absent`.
    pub async fn unwrap_or<F>(self, on_absent: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.inner.await.unwrap_or(on_absent)
    }

    /// Resolves into a standard [`Option`].
    pub async fn into_option(self) -> Option<T> {
        self.inner.await.into_option()
    }

    /// Transforms the contained value once it resolves.
    pub fn map<U, F>(self, f: F) -> AsyncOptional<'a, U>
    where
        F: FnOnce(T) -> U + 'a,
        U: 'a,
    {
        AsyncOptional::new(async move { self.inner.await.map(f) })
    }

    /// Chains a dependent optional computation, short-circuiting on [`Absent`].
    pub fn and_then<U, F>(self, on_present: F) -> AsyncOptional<'a, U>
    where
        F: FnOnce(T) -> Optional<U> + 'a,
        U: 'a,
    {
        AsyncOptional::new(async move { self.inner.await.and_then(on_present) })
    }

    /// Keeps a present value, otherwise falls back to the `Optional` from `on_absent`.
    pub fn or_then<F>(self, on_absent: F) -> AsyncOptional<'a, T>
    where
        F: FnOnce() -> Optional<T> + 'a,
    {
        AsyncOptional::new(async move { self.inner.await.or_then(on_absent) })
    }

    /// Resolves the value, then awaits whichever asynchronous handler applies.
    pub async fn match_async<U, P, A, FutP, FutA>(self, on_present: P, on_absent: A) -> U
    where
        P: FnOnce(T) -> FutP,
        A: FnOnce() -> FutA,
        FutP: Future<Output = U>,
        FutA: Future<Output = U>,
    {
        self.inner.await.match_async(on_present, on_absent).await
    }

    /// Awaits `f` with the resolved value if it is present.
    pub async fn if_present_async<F, Fut>(self, f: F)
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.inner.await.if_present_async(f).await
    }

    /// Awaits `f` if the resolved value is absent.
    pub async fn if_absent_async<F, Fut>(self, f: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.inner.await.if_absent_async(f).await
    }

    /// Transforms the contained value with an asynchronous function.
    pub fn map_async<U, F, Fut>(self, f: F) -> AsyncOptional<'a, U>
    where
        F: FnOnce(T) -> Fut + 'a,
        Fut: Future<Output = U> + 'a,
        U: 'a,
    {
        AsyncOptional::new(async move { self.inner.await.map_async(f).await })
    }

    /// Chains a dependent asynchronous optional computation.
    pub fn and_then_async<U, F, Fut>(self, on_present: F) -> AsyncOptional<'a, U>
    where
        F: FnOnce(T) -> Fut + 'a,
        Fut: Future<Output = Optional<U>> + 'a,
        U: 'a,
    {
        AsyncOptional::new(async move { self.inner.await.and_then_async(on_present).await })
    }

    /// Keeps a present value, otherwise falls back to the pending `Optional` from `on_absent`.
    pub fn or_then_async<F, Fut>(self, on_absent: F) -> AsyncOptional<'a, T>
    where
        F: FnOnce() -> Fut + 'a,
        Fut: Future<Output = Optional<T>> + 'a,
    {
        AsyncOptional::new(async move { self.inner.await.or_then_async(on_absent).await })
    }

    #[cfg(test)]
    fn future_addr(&self) -> *const () {
        let pending: *const (dyn Future<Output = Optional<T>> + 'a) = &*self.inner;
        pending.cast()
    }
}

impl<'a, T> IntoFuture for AsyncOptional<'a, T> {
    type Output = Optional<T>;
    type IntoFuture = LocalBoxFuture<'a, Optional<T>>;

    fn into_future(self) -> Self::IntoFuture {
        self.inner
    }
}

impl<T> fmt::Debug for AsyncOptional<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOptional").finish_non_exhaustive()
    }
}
