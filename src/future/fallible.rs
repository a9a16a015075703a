use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::UnwrapError;
use crate::fallible::{Failure, Fallible, Success};
use crate::future::AsyncOptional;

/// A pending [`Fallible`].
///
/// Awaiting an `AsyncFallible` yields the resolved `Fallible`. The combinators mirror those of
/// `Fallible` and run their handlers only after the wrapped computation has resolved.
///
/// # Examples
///
/// ```rust
/// use railway::{AsyncFallible, Failure, Success};
///
/// let outcome = futures::executor::block_on(async {
///     AsyncFallible::<u32, String>::success(2)
///         .and_then(|n| if n > 1 { Success(n * 2) } else { Failure("too small".to_string()) })
///         .map_err(|e| e.len())
///         .await
/// });
/// assert_eq!(outcome, Success(4));
/// ```
#[must_use = "an AsyncFallible does nothing unless awaited"]
pub struct AsyncFallible<'a, T, E> {
    inner: LocalBoxFuture<'a, Fallible<T, E>>,
}

/// Conversion into an [`AsyncFallible`].
///
/// An `AsyncFallible` converts to itself without re-wrapping.
pub trait IntoAsyncFallible<'a, T, E> {
    /// Wraps `self` as a pending `Fallible`.
    fn into_async_fallible(self) -> AsyncFallible<'a, T, E>;
}

impl<'a, T, E, F> IntoAsyncFallible<'a, T, E> for F
where
    F: Future<Output = Fallible<T, E>> + 'a,
{
    fn into_async_fallible(self) -> AsyncFallible<'a, T, E> {
        AsyncFallible {
            inner: self.boxed_local(),
        }
    }
}

impl<'a, T, E> IntoAsyncFallible<'a, T, E> for AsyncFallible<'a, T, E> {
    #[inline]
    fn into_async_fallible(self) -> AsyncFallible<'a, T, E> {
        self
    }
}

impl<'a, T, E> IntoAsyncFallible<'a, T, E> for Fallible<T, E>
where
    T: 'a,
    E: 'a,
{
    fn into_async_fallible(self) -> AsyncFallible<'a, T, E> {
        future::ready(self).into_async_fallible()
    }
}

impl<'a, T, E> AsyncFallible<'a, T, E>
where
    T: 'a,
    E: 'a,
{
    /// Wraps a pending `Fallible`. Passing an `AsyncFallible` returns it unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{AsyncFallible, Fallible};
    ///
    /// let pending = AsyncFallible::new(async { Fallible::<u8, ()>::Success(1) });
    /// let same = AsyncFallible::new(pending);
    /// assert_eq!(futures::executor::block_on(same.unwrap()), 1);
    /// ```
    pub fn new(value: impl IntoAsyncFallible<'a, T, E>) -> Self {
        value.into_async_fallible()
    }

    /// An already resolved [`Success`].
    pub fn success(value: T) -> Self {
        Self::new(Success(value))
    }

    /// An already resolved [`Failure`].
    pub fn failure(error: E) -> Self {
        Self::new(Failure(error))
    }

    /// Resolves the value, then calls exactly one of the handlers.
    pub async fn match_with<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(E) -> U,
    {
        self.inner.await.match_with(on_success, on_failure)
    }

    /// Resolves to `true` on a [`Success`].
    pub async fn is_ok(self) -> bool {
        self.inner.await.is_ok()
    }

    /// Resolves to `true` on a [`Failure`].
    pub async fn is_err(self) -> bool {
        self.inner.await.is_err()
    }

    /// Calls `f` with the success value once resolved.
    pub async fn if_ok<F>(self, f: F)
    where
        F: FnOnce(T),
    {
        self.inner.await.if_ok(f)
    }

    /// Calls `f` with the error once resolved.
    pub async fn if_err<F>(self, f: F)
    where
        F: FnOnce(E),
    {
        self.inner.await.if_err(f)
    }

    /// Transforms the success value, leaving a failure untouched.
    pub fn map_ok<U, F>(self, f: F) -> AsyncFallible<'a, U, E>
    where
        F: FnOnce(T) -> U + 'a,
        U: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.map_ok(f) })
    }

    /// Transforms the error, leaving a success untouched.
    pub fn map_err<E2, F>(self, f: F) -> AsyncFallible<'a, T, E2>
    where
        F: FnOnce(E) -> E2 + 'a,
        E2: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.map_err(f) })
    }

    /// Transforms whichever side the value resolves to.
    pub fn map<U, E2, FO, FE>(self, on_success: FO, on_failure: FE) -> AsyncFallible<'a, U, E2>
    where
        FO: FnOnce(T) -> U + 'a,
        FE: FnOnce(E) -> E2 + 'a,
        U: 'a,
        E2: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.map(on_success, on_failure) })
    }

    /// Resolves to the success value.
    ///
    /// # Panics
    ///
    /// The returned future panics when polled to completion on a [`Failure`].
    pub async fn unwrap(self) -> T {
        self.inner.await.unwrap()
    }

    /// Resolves to the error.
    ///
    /// # Panics
    ///
    /// The returned future panics when polled to completion on a [`Success`].
    pub async fn unwrap_err(self) -> E {
        self.inner.await.unwrap_err()
    }

    /// Resolves to the success value, or to [`UnwrapError::FailureValue`].
    pub async fn try_unwrap(self) -> Result<T, UnwrapError> {
        self.inner.await.try_unwrap()
    }

    /// Resolves to the error, or to [`UnwrapError::SuccessValue`].
    pub async fn try_unwrap_err(self) -> Result<E, UnwrapError> {
        self.inner.await.try_unwrap_err()
    }

    /// Resolves to the success value, panicking with `msg` on a [`Failure`].
    pub async fn expect(self, msg: &str) -> T {
        self.inner.await.expect(msg)
    }

    /// Resolves to the error, panicking with `msg` on a [`Success`].
    pub async fn expect_err(self, msg: &str) -> E {
        self.inner.await.expect_err(msg)
    }

    /// Resolves to the success value or recovers one from the error.
    pub async fn unwrap_or<F>(self, on_failure: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.inner.await.unwrap_or(on_failure)
    }

    /// Resolves into a standard [`Result`].
    pub async fn into_result(self) -> Result<T, E> {
        self.inner.await.into_result()
    }

    /// Projects the success value into a pending [`Optional`](crate::Optional).
    pub fn ok(self) -> AsyncOptional<'a, T> {
        AsyncOptional::new(async move { self.inner.await.ok() })
    }

    /// Projects the error into a pending [`Optional`](crate::Optional).
    pub fn err(self) -> AsyncOptional<'a, E> {
        AsyncOptional::new(async move { self.inner.await.err() })
    }

    /// Chains a dependent fallible computation; a failure short-circuits unchanged.
    pub fn and_then<U, F>(self, on_success: F) -> AsyncFallible<'a, U, E>
    where
        F: FnOnce(T) -> Fallible<U, E> + 'a,
        U: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.and_then(on_success) })
    }

    /// Recovers from a failure with another fallible computation.
    pub fn or_then<E2, F>(self, on_failure: F) -> AsyncFallible<'a, T, E2>
    where
        F: FnOnce(E) -> Fallible<T, E2> + 'a,
        E2: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.or_then(on_failure) })
    }

    /// Resolves the value, then awaits whichever asynchronous handler applies.
    pub async fn match_async<U, S, F, FutS, FutF>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> FutS,
        F: FnOnce(E) -> FutF,
        FutS: Future<Output = U>,
        FutF: Future<Output = U>,
    {
        self.inner.await.match_async(on_success, on_failure).await
    }

    /// Awaits `f` with the success value once resolved.
    pub async fn if_ok_async<F, Fut>(self, f: F)
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.inner.await.if_ok_async(f).await
    }

    /// Awaits `f` with the error once resolved.
    pub async fn if_err_async<F, Fut>(self, f: F)
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.inner.await.if_err_async(f).await
    }

    /// Transforms the success value with an asynchronous function.
    pub fn map_ok_async<U, F, Fut>(self, f: F) -> AsyncFallible<'a, U, E>
    where
        F: FnOnce(T) -> Fut + 'a,
        Fut: Future<Output = U> + 'a,
        U: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.map_ok_async(f).await })
    }

    /// Transforms the error with an asynchronous function.
    pub fn map_err_async<E2, F, Fut>(self, f: F) -> AsyncFallible<'a, T, E2>
    where
        F: FnOnce(E) -> Fut + 'a,
        Fut: Future<Output = E2> + 'a,
        E2: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.map_err_async(f).await })
    }

    /// Transforms whichever side the value resolves to with an asynchronous function.
    pub fn map_async<U, E2, FO, FE, FutO, FutE>(
        self,
        on_success: FO,
        on_failure: FE,
    ) -> AsyncFallible<'a, U, E2>
    where
        FO: FnOnce(T) -> FutO + 'a,
        FE: FnOnce(E) -> FutE + 'a,
        FutO: Future<Output = U> + 'a,
        FutE: Future<Output = E2> + 'a,
        U: 'a,
        E2: 'a,
    {
        AsyncFallible::new(async move {
            self.inner.await.map_async(on_success, on_failure).await
        })
    }

    /// Chains a dependent asynchronous fallible computation.
    pub fn and_then_async<U, F, Fut>(self, on_success: F) -> AsyncFallible<'a, U, E>
    where
        F: FnOnce(T) -> Fut + 'a,
        Fut: Future<Output = Fallible<U, E>> + 'a,
        U: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.and_then_async(on_success).await })
    }

    /// Recovers from a failure with an asynchronous fallible computation.
    pub fn or_then_async<E2, F, Fut>(self, on_failure: F) -> AsyncFallible<'a, T, E2>
    where
        F: FnOnce(E) -> Fut + 'a,
        Fut: Future<Output = Fallible<T, E2>> + 'a,
        E2: 'a,
    {
        AsyncFallible::new(async move { self.inner.await.or_then_async(on_failure).await })
    }

    #[cfg(test)]
    fn future_addr(&self) -> *const () {
        let pending: *const (dyn Future<Output = Fallible<T, E>> + 'a) = &*self.inner;
        pending.cast()
    }
}

impl<'a, T, E> IntoFuture for AsyncFallible<'a, T, E> {
    type Output = Fallible<T, E>;
    type IntoFuture = LocalBoxFuture<'a, Fallible<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        self.inner
    }
}

impl<T, E> fmt::Debug for AsyncFallible<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFallible").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optional::{Absent, Present};
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    enum FetchError {
        NotFound(u32),
        Unauthorized,
    }

    fn lookup(id: u32) -> AsyncFallible<'static, String, FetchError> {
        AsyncFallible::new(async move {
            match id {
                0 => Failure(FetchError::Unauthorized),
                1..=9 => Success(format!("user-{id}")),
                _ => Failure(FetchError::NotFound(id)),
            }
        })
    }

    #[test]
    fn test_awaiting_yields_resolved_value() {
        assert_eq!(block_on(lookup(3).into_future()), Success("user-3".to_string()));
        assert_eq!(block_on(lookup(42).into_future()), Failure(FetchError::NotFound(42)));
    }

    #[test]
    fn test_wrapping_a_wrapper_returns_it_unchanged() {
        let wrapped = lookup(1);
        let addr = wrapped.future_addr();

        let rewrapped = AsyncFallible::new(wrapped);
        assert_eq!(rewrapped.future_addr(), addr);
    }

    #[test]
    fn test_sync_combinators() {
        let out = lookup(2).map_ok(|name| name.len()).map_err(|_| "lookup failed");
        assert_eq!(block_on(out.into_future()), Success(6));

        let out = lookup(0).map(|name| name.len(), |e| format!("{e:?}"));
        assert_eq!(block_on(out.into_future()), Failure("Unauthorized".to_string()));
    }

    #[test]
    fn test_and_then_propagates_the_same_error() {
        let called = Arc::new(AtomicBool::new(false));
        let out = lookup(77).and_then({
            let called = Arc::clone(&called);
            move |name| {
                called.store(true, Ordering::SeqCst);
                Success(name)
            }
        });

        assert_eq!(block_on(out.into_future()), Failure(FetchError::NotFound(77)));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_or_then_recovers() {
        let out = lookup(0).or_then(|e| match e {
            FetchError::Unauthorized => Fallible::<String, ()>::Success("guest".to_string()),
            FetchError::NotFound(_) => Failure(()),
        });
        assert_eq!(block_on(out.into_future()), Success("guest".to_string()));
    }

    #[test]
    fn test_plain_results() {
        assert!(block_on(lookup(1).is_ok()));
        assert!(block_on(lookup(0).is_err()));
        assert_eq!(block_on(lookup(4).unwrap()), "user-4");
        assert_eq!(block_on(lookup(0).unwrap_err()), FetchError::Unauthorized);
        assert_eq!(block_on(lookup(0).unwrap_or(|_| "anonymous".to_string())), "anonymous");
        assert_eq!(block_on(lookup(5).match_with(|s| s.len(), |_| 0)), 6);
    }

    #[test]
    #[should_panic(expected = "called `Fallible::unwrap()` on a `Failure` value")]
    fn test_unwrap_panics_when_polled() {
        block_on(lookup(0).unwrap());
    }

    #[test]
    #[should_panic(expected = "called `Fallible::unwrap_err()` on a `Success` value")]
    fn test_unwrap_err_panics_when_polled() {
        block_on(lookup(1).unwrap_err());
    }

    #[test]
    fn test_async_combinators_chain() {
        let out = lookup(3)
            .map_ok_async(|name| async move { name.to_uppercase() })
            .and_then_async(|name| async move {
                if name.starts_with("USER") {
                    Success(name)
                } else {
                    Failure(FetchError::Unauthorized)
                }
            })
            .map_err_async(|e| async move { format!("{e:?}") });
        assert_eq!(block_on(out.into_future()), Success("USER-3".to_string()));
    }

    #[test]
    fn test_or_then_async_and_map_async() {
        let out = lookup(12)
            .or_then_async(|e| async move {
                match e {
                    FetchError::NotFound(id) => lookup(id % 10).await,
                    other => Failure(other),
                }
            })
            .map_async(|name| async move { name.len() }, |e| async move { format!("{e:?}") });
        assert_eq!(block_on(out.into_future()), Success(6));
    }

    #[test]
    fn test_side_effects() {
        let seen = Arc::new(AtomicBool::new(false));
        block_on(lookup(0).if_err(|e| {
            assert_eq!(e, FetchError::Unauthorized);
            seen.store(true, Ordering::SeqCst);
        }));
        assert!(seen.load(Ordering::SeqCst));

        block_on(lookup(1).if_err_async(|_| -> future::Ready<()> {
            panic!("if_err_async called on Success")
        }));
        block_on(lookup(1).if_ok_async(|name| {
            assert_eq!(name, "user-1");
            future::ready(())
        }));
        assert_eq!(
            block_on(lookup(9).match_async(|s| async move { s }, |_| async { String::new() })),
            "user-9"
        );
    }

    #[test]
    fn test_if_ok_runs_only_on_success() {
        let seen = Cell::new(None);
        block_on(lookup(2).if_ok(|name| seen.set(Some(name.len()))));
        assert_eq!(seen.get(), Some(6));

        block_on(lookup(0).if_ok(|_| panic!("if_ok called on Failure")));
    }

    #[test]
    fn test_expect_and_expect_err() {
        assert_eq!(block_on(lookup(7).expect("user exists")), "user-7");
        assert_eq!(
            block_on(lookup(50).expect_err("user is missing")),
            FetchError::NotFound(50)
        );
    }

    #[test]
    #[should_panic(expected = "user exists")]
    fn test_expect_panics_with_message_when_polled() {
        block_on(lookup(0).expect("user exists"));
    }

    #[test]
    #[should_panic(expected = "user is missing")]
    fn test_expect_err_panics_with_message_when_polled() {
        block_on(lookup(1).expect_err("user is missing"));
    }

    #[test]
    fn test_try_unwrap_and_into_result() {
        assert_eq!(block_on(lookup(1).try_unwrap()), Ok("user-1".to_string()));
        assert_eq!(block_on(lookup(0).try_unwrap()), Err(UnwrapError::FailureValue));
        assert_eq!(
            block_on(lookup(0).try_unwrap_err()),
            Ok(FetchError::Unauthorized)
        );
        assert_eq!(block_on(lookup(1).try_unwrap_err()), Err(UnwrapError::SuccessValue));
        assert_eq!(block_on(lookup(2).into_result()), Ok("user-2".to_string()));
        assert_eq!(block_on(lookup(11).into_result()), Err(FetchError::NotFound(11)));
    }

    #[test]
    fn test_ok_and_err_projections() {
        assert_eq!(block_on(lookup(3).ok().into_future()), Present("user-3".to_string()));
        assert_eq!(block_on(lookup(0).ok().into_future()), Absent);
        assert_eq!(block_on(lookup(3).err().into_future()), Absent);
        assert_eq!(
            block_on(lookup(0).err().map(|e| format!("{e:?}")).into_future()),
            Present("Unauthorized".to_string())
        );
    }

    #[test]
    fn test_non_send_errors() {
        let reason = Rc::new("quota exceeded".to_string());
        let out = AsyncFallible::<u32, Rc<String>>::failure(Rc::clone(&reason))
            .map_ok_async(|n| async move { n + 1 })
            .or_then_async(|e| async move { Fallible::<u32, usize>::Failure(e.len()) });
        assert_eq!(block_on(out.into_future()), Failure(14));
    }
}
