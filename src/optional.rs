use std::future::Future;

use futures::future::{self, Either, FutureExt};

use crate::error::UnwrapError;
use crate::future::AsyncOptional;

pub use self::Optional::{Absent, Present};

/// A value that may be absent.
///
/// `Optional` is a closed sum of [`Present`] and [`Absent`]. Every combinator consumes the
/// value and produces a new one; use [`as_ref`](Optional::as_ref) to work on a borrow.
///
/// # Examples
///
/// ```rust
/// use railway::{Absent, Optional, Present};
///
/// let name = Optional::from_nullable(Some("ada"));
/// assert_eq!(name.map(str::len), Present(3));
///
/// let missing: Optional<&str> = Optional::from_nullable(None);
/// assert_eq!(missing.map(str::len), Absent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optional<T> {
    /// A contained value
    Present(T),
    /// No value
    Absent,
}

impl<T> Optional<T> {
    /// Builds an `Optional` from a nullable input: `None` becomes [`Absent`], anything else
    /// becomes [`Present`].
    #[inline]
    pub fn from_nullable(value: Option<T>) -> Self {
        match value {
            Some(value) => Present(value),
            None => Absent,
        }
    }

    /// Calls exactly one handler: `on_present` with the contained value, or `on_absent`.
    ///
    /// Every other combinator is expressed through this one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Absent, Optional, Present};
    ///
    /// let describe =
    ///     |o: Optional<i32>| o.match_with(|n| format!("got {n}"), || "nothing".to_string());
    /// assert_eq!(describe(Present(4)), "got 4");
    /// assert_eq!(describe(Absent), "nothing");
    /// ```
    #[inline]
    pub fn match_with<U, P, A>(self, on_present: P, on_absent: A) -> U
    where
        P: FnOnce(T) -> U,
        A: FnOnce() -> U,
    {
        match self {
            Present(value) => on_present(value),
            Absent => on_absent(),
        }
    }

    /// Returns `true` if the value is [`Present`].
    #[inline]
    pub fn is_present(&self) -> bool {
        self.as_ref().match_with(|_| true, || false)
    }

    /// Returns `true` if the value is [`Absent`].
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.as_ref().match_with(|_| false, || true)
    }

    /// Converts from `&Optional<T>` to `Optional<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Converts from `&mut Optional<T>` to `Optional<&mut T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::Present;
    ///
    /// let mut x = Present(1);
    /// x.as_mut().if_present(|n| *n += 1);
    /// assert_eq!(x, Present(2));
    /// ```
    #[inline]
    pub fn as_mut(&mut self) -> Optional<&mut T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Calls `f` with the contained value for its side effect only.
    #[inline]
    pub fn if_present<F>(self, f: F)
    where
        F: FnOnce(T),
    {
        self.match_with(f, || ())
    }

    /// Calls `f` for its side effect only if the value is [`Absent`].
    #[inline]
    pub fn if_absent<F>(self, f: F)
    where
        F: FnOnce(),
    {
        self.match_with(|_| (), f)
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the value is [`Absent`].
    ///
    /// ```should_panic
    /// use railway::Optional;
    ///
    /// let x: Optional<i32> = Optional::Absent;
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

    /// Returns the contained value, or [`UnwrapError::AbsentValue`] instead of panicking.
    #[inline]
    pub fn try_unwrap(self) -> Result<T, UnwrapError> {
        self.match_with(Ok, || Err(UnwrapError::AbsentValue))
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the value is [`Absent`].
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(_) => panic!("{}", msg),
        }
    }

    /// Returns the contained value or the result of `on_absent`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Absent, Optional, Present};
    ///
    /// assert_eq!(Present(3).unwrap_or(|| 0), 3);
    /// assert_eq!(Optional::<i32>::Absent.unwrap_or(|| 0), 0);
    /// ```
    #[inline]
    pub fn unwrap_or<F>(self, on_absent: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.match_with(|value| value, on_absent)
    }

    /// Transforms the contained value; [`Absent`] passes through unchanged.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        self.match_with(|value| Present(f(value)), || Absent)
    }

    /// Returns `self` if present, otherwise the `Optional` produced by `on_absent`.
    #[inline]
    pub fn or_then<F>(self, on_absent: F) -> Optional<T>
    where
        F: FnOnce() -> Optional<T>,
    {
        self.match_with(Present, on_absent)
    }

    /// Chains a dependent optional computation, short-circuiting on [`Absent`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Absent, Optional, Present};
    ///
    /// let half = |n: i32| if n % 2 == 0 { Present(n / 2) } else { Absent };
    /// assert_eq!(Present(8).and_then(half).and_then(half), Present(2));
    /// assert_eq!(Present(6).and_then(half).and_then(half), Absent);
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, on_present: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        self.match_with(on_present, || Absent)
    }

    /// Converts into a standard [`Option`].
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.match_with(Some, || None)
    }

    /// Lifts an already resolved value into an [`AsyncOptional`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::Present;
    ///
    /// let pending = Present(2).into_async().map(|n| n * 3);
    /// assert_eq!(futures::executor::block_on(pending.unwrap()), 6);
    /// ```
    pub fn into_async<'a>(self) -> AsyncOptional<'a, T>
    where
        T: 'a,
    {
        AsyncOptional::new(self)
    }

    /// Calls exactly one handler and returns the pending value it produced.
    ///
    /// The selected handler is invoked immediately; only its result is deferred.
    pub fn match_async<U, P, A, FutP, FutA>(
        self,
        on_present: P,
        on_absent: A,
    ) -> impl Future<Output = U>
    where
        P: FnOnce(T) -> FutP,
        A: FnOnce() -> FutA,
        FutP: Future<Output = U>,
        FutA: Future<Output = U>,
    {
        self.match_with(
            |value| Either::Left(on_present(value)),
            || Either::Right(on_absent()),
        )
    }

    /// Calls `f` with the contained value and returns its pending side effect.
    pub fn if_present_async<F, Fut>(self, f: F) -> impl Future<Output = ()>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.match_async(f, || future::ready(()))
    }

    /// Calls `f` if the value is [`Absent`] and returns its pending side effect.
    pub fn if_absent_async<F, Fut>(self, f: F) -> impl Future<Output = ()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.match_async(|_| future::ready(()), f)
    }

    /// Transforms the contained value with an asynchronous function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::Present;
    ///
    /// let doubled = futures::executor::block_on(async {
    ///     Present(21).map_async(|n| async move { n * 2 }).await
    /// });
    /// assert_eq!(doubled, Present(42));
    /// ```
    pub fn map_async<'a, U, F, Fut>(self, f: F) -> AsyncOptional<'a, U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + 'a,
        U: 'a,
    {
        self.match_with(
            |value| AsyncOptional::new(f(value).map(Present)),
            AsyncOptional::absent,
        )
    }

    /// Chains a dependent asynchronous computation, short-circuiting on [`Absent`].
    pub fn and_then_async<'a, U, F, Fut>(self, on_present: F) -> AsyncOptional<'a, U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Optional<U>> + 'a,
        U: 'a,
    {
        self.match_with(
            |value| AsyncOptional::new(on_present(value)),
            AsyncOptional::absent,
        )
    }

    /// Returns `self` if present, otherwise the pending `Optional` produced by `on_absent`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::{Optional, Present};
    ///
    /// let number = Optional::<i32>::Absent
    ///     .or_then_async(|| async { Present(1) })
    ///     .map(|n| n + 1)
    ///     .unwrap_or(|| 0);
    /// assert_eq!(futures::executor::block_on(number), 2);
    /// ```
    pub fn or_then_async<'a, F, Fut>(self, on_absent: F) -> AsyncOptional<'a, T>
    where
        T: 'a,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Optional<T>> + 'a,
    {
        self.match_with(AsyncOptional::present, || AsyncOptional::new(on_absent()))
    }
}

impl<T> Default for Optional<T> {
    #[inline]
    fn default() -> Self {
        Absent
    }
}

impl<T> From<Option<T>> for Optional<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        Optional::from_nullable(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::future::IntoFuture;
    use std::rc::Rc;

    #[test]
    fn test_from_nullable() {
        assert_eq!(Optional::from_nullable(Some(0)), Present(0));
        assert_eq!(Optional::<i32>::from_nullable(None), Absent);
        assert_eq!(Optional::from(Some("")), Present(""));
        assert_eq!(Option::from(Present(5)), Some(5));
        assert_eq!(Optional::<i32>::default(), Absent);
    }

    #[test]
    fn test_match_calls_exactly_one_handler() {
        let present_calls = Cell::new(0);
        let absent_calls = Cell::new(0);

        let out = Present("test").match_with(
            |v| {
                present_calls.set(present_calls.get() + 1);
                v.len()
            },
            || {
                absent_calls.set(absent_calls.get() + 1);
                0
            },
        );
        assert_eq!(out, 4);
        assert_eq!((present_calls.get(), absent_calls.get()), (1, 0));

        let out = Optional::<&str>::Absent.match_with(
            |_| {
                present_calls.set(present_calls.get() + 1);
                1
            },
            || {
                absent_calls.set(absent_calls.get() + 1);
                0
            },
        );
        assert_eq!(out, 0);
        assert_eq!((present_calls.get(), absent_calls.get()), (1, 1));
    }

    #[test]
    fn test_is_present_and_is_absent() {
        let p = Present(1);
        let a: Optional<i32> = Absent;

        assert!(p.is_present());
        assert!(!p.is_absent());
        assert!(a.is_absent());
        assert!(!a.is_present());
    }

    #[test]
    fn test_if_present_and_if_absent() {
        let seen = Cell::new(None);
        Present(7).if_present(|v| seen.set(Some(v)));
        assert_eq!(seen.get(), Some(7));

        Optional::<i32>::Absent.if_present(|_| panic!("if_present called on Absent"));
        Present(1).if_absent(|| panic!("if_absent called on Present"));

        let called = Cell::new(false);
        Optional::<i32>::Absent.if_absent(|| called.set(true));
        assert!(called.get());
    }

    #[test]
    fn test_unwrap_returns_value_unchanged() {
        assert_eq!(Present("x").unwrap(), "x");
        assert_eq!(Present(3).expect("present"), 3);
    }

    #[test]
    #[should_panic(expected = "called `Optional::unwrap()` on an `Absent` value")]
    fn test_unwrap_panics_on_absent() {
        Optional::<i32>::Absent.unwrap();
    }

    #[test]
    #[should_panic(expected = "no config")]
    fn test_expect_panics_with_message() {
        Optional::<i32>::Absent.expect("no config");
    }

    #[test]
    fn test_try_unwrap() {
        assert_eq!(Present(1).try_unwrap(), Ok(1));
        assert_eq!(Optional::<i32>::Absent.try_unwrap(), Err(UnwrapError::AbsentValue));
    }

    #[test]
    fn test_unwrap_or_only_invokes_fallback_when_absent() {
        assert_eq!(Present(1).unwrap_or(|| panic!("fallback invoked")), 1);
        assert_eq!(Optional::<i32>::Absent.unwrap_or(|| 9), 9);
    }

    #[test]
    fn test_map_passes_absent_through() {
        let mapped = Optional::<i32>::Absent.map(|_| -> i32 { panic!("map invoked on Absent") });
        assert!(mapped.is_absent());
        assert_eq!(Present(2).map(|n| n * 10), Present(20));
    }

    #[test]
    fn test_map_composes() {
        let f = |n: i32| n + 3;
        let g = |n: i32| n * 2;
        assert_eq!(Present(5).map(f).map(g), Present(5).map(|x| g(f(x))));
        assert_eq!(Optional::<i32>::Absent.map(f).map(g), Absent);
    }

    #[test]
    fn test_or_then() {
        assert_eq!(Present(1).or_then(|| panic!("fallback invoked")), Present(1));
        assert_eq!(Optional::<i32>::Absent.or_then(|| Present(2)), Present(2));
        assert_eq!(Optional::<i32>::Absent.or_then(|| Absent), Absent);
    }

    #[test]
    fn test_and_then_short_circuits() {
        assert_eq!(Present(2).and_then(|n| Present(n + 1)), Present(3));
        assert_eq!(Present(2).and_then(|_| Optional::<i32>::Absent), Absent);
        let out: Optional<i32> =
            Optional::<i32>::Absent.and_then(|_| panic!("and_then invoked on Absent"));
        assert_eq!(out, Absent);
    }

    #[test]
    fn test_as_ref_does_not_consume() {
        let name = Present(String::from("ada"));
        assert_eq!(name.as_ref().map(|s| s.len()), Present(3));
        assert_eq!(name, Present(String::from("ada")));
    }

    #[test]
    fn test_match_async() {
        let out = block_on(Present(2).match_async(|n| async move { n * 3 }, || async { 0 }));
        assert_eq!(out, 6);

        let absent = Optional::<i32>::Absent;
        let out = block_on(absent.match_async(|n| async move { n * 3 }, || async { -1 }));
        assert_eq!(out, -1);
    }

    #[test]
    fn test_if_present_async_and_if_absent_async() {
        let seen = Cell::new(0);
        block_on(Present(5).if_present_async(|n| {
            seen.set(n);
            future::ready(())
        }));
        assert_eq!(seen.get(), 5);

        block_on(Present(5).if_absent_async(|| -> future::Ready<()> {
            panic!("if_absent_async called on Present")
        }));

        let called = Cell::new(false);
        block_on(Optional::<i32>::Absent.if_absent_async(|| {
            called.set(true);
            future::ready(())
        }));
        assert!(called.get());
    }

    #[test]
    fn test_map_async() {
        let out = Present(1).map_async(|n| async move { n + 1 });
        assert_eq!(block_on(out.into_future()), Present(2));
        assert_eq!(
            block_on(Optional::<i32>::Absent.map_async(|n| async move { n + 1 }).into_future()),
            Absent
        );
    }

    #[test]
    fn test_and_then_async() {
        let out = Present(4).and_then_async(|n| async move { Present(n.to_string()) });
        assert_eq!(block_on(out.into_future()), Present("4".to_string()));

        let out = Present(4).and_then_async(|_| async { Optional::<String>::Absent });
        assert_eq!(block_on(out.into_future()), Absent);
    }

    #[test]
    fn test_or_then_async_keeps_present() {
        let out = Present(1).or_then_async(|| async { Present(100) });
        assert_eq!(block_on(out.into_future()), Present(1));
    }

    #[test]
    fn test_or_then_async_then_map_then_unwrap_or() {
        let number = Optional::<i32>::Absent
            .or_then_async(|| future::ready(Present(1)))
            .map(|n| n + 1)
            .unwrap_or(|| 0);
        assert_eq!(block_on(number), 2);
    }

    #[test]
    fn test_into_async_resolves_to_itself() {
        assert_eq!(block_on(Present("x").into_async().into_future()), Present("x"));
        assert!(block_on(Optional::<u8>::Absent.into_async().is_absent()));
    }

    #[test]
    fn test_async_mirrors_accept_non_send_values() {
        let out = Present(Rc::new(1)).map_async(|n| async move { *n + 1 });
        assert_eq!(block_on(out.into_future()), Present(2));

        let out = Optional::<Rc<str>>::Absent.or_then_async(|| async { Present(Rc::from("rc")) });
        assert_eq!(block_on(out.map(|s| s.len()).into_future()), Present(2));
    }
}
