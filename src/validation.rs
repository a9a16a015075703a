//! Field-by-field validation of a structured record.
//!
//! Each field is described by an accessor that produces a [`Fallible`]. The accessors are run
//! one after another in a fixed order and the first [`Failure`] is returned as is: later
//! accessors are never invoked and errors are never collected.
//!
//! - [`validate()`] builds a keyed [`Record`] from `(key, accessor)` pairs.
//! - [`validate_async`] does the same with accessors that return futures.
//! - [`validate!`](crate::validate!) builds a typed struct from one accessor per field.

use std::future::Future;
use std::hash::Hash;

use futures::future::LocalBoxFuture;
use hashlink::LinkedHashMap;
use tracing::trace;

use crate::fallible::{Failure, Fallible, Success};

/// A validated record. Keys iterate in the order their accessors ran.
///
/// A key seen twice keeps the position of its first appearance and holds the later value.
pub type Record<K, V> = LinkedHashMap<K, V>;

/// A boxed field accessor, for mixing differently typed closures in one field list.
pub type Accessor<'a, V, E> = Box<dyn FnOnce() -> Fallible<V, E> + 'a>;

/// A boxed asynchronous field accessor.
pub type AsyncAccessor<'a, V, E> = Box<dyn FnOnce() -> LocalBoxFuture<'a, Fallible<V, E>> + 'a>;

/// Runs each accessor in iteration order and assembles the successful values into a [`Record`].
///
/// Returns the first failure unchanged. If a key appears twice, the record holds one
/// entry for it, at the key's first position, with the later value.
///
/// # Examples
///
/// ```rust
/// use railway::{validate, Accessor, Failure, Success};
///
/// let fields: Vec<(&str, Accessor<'_, i32, &str>)> = vec![
///     ("a", Box::new(|| Success(1))),
///     ("b", Box::new(|| Failure("bad"))),
///     ("c", Box::new(|| Success(3))),
/// ];
/// assert_eq!(validate(fields), Failure("bad"));
/// ```
pub fn validate<K, V, E, I, A>(fields: I) -> Fallible<Record<K, V>, E>
where
    I: IntoIterator<Item = (K, A)>,
    A: FnOnce() -> Fallible<V, E>,
    K: Hash + Eq,
{
    let mut record = Record::new();
    for (index, (key, accessor)) in fields.into_iter().enumerate() {
        match accessor() {
            Success(value) => {
                trace!(index, "field validated");
                store(&mut record, key, value);
            }
            Failure(error) => {
                trace!(index, validated = record.len(), "field failed validation; stopping");
                return Failure(error);
            }
        }
    }
    Success(record)
}

/// Asynchronous [`validate()`].
///
/// Accessors still run strictly one at a time: the next accessor is invoked only after the
/// previous field's future resolved to a [`Success`].
pub async fn validate_async<K, V, E, I, A, Fut>(fields: I) -> Fallible<Record<K, V>, E>
where
    I: IntoIterator<Item = (K, A)>,
    A: FnOnce() -> Fut,
    Fut: Future<Output = Fallible<V, E>>,
    K: Hash + Eq,
{
    let mut record = Record::new();
    for (index, (key, accessor)) in fields.into_iter().enumerate() {
        match accessor().await {
            Success(value) => {
                trace!(index, "field validated");
                store(&mut record, key, value);
            }
            Failure(error) => {
                trace!(index, validated = record.len(), "field failed validation; stopping");
                return Failure(error);
            }
        }
    }
    Success(record)
}

fn store<K, V>(record: &mut Record<K, V>, key: K, value: V)
where
    K: Hash + Eq,
{
    match record.get_mut(&key) {
        Some(slot) => *slot = value,
        None => {
            record.insert(key, value);
        }
    }
}

/// Builds a struct from one fallible accessor per field.
///
/// Accessors are invoked in the order the fields are written. The first [`Failure`] is
/// returned; otherwise the result is a [`Success`] holding the populated struct. The struct
/// may be named by a plain identifier or a module path such as `config::Limits`.
///
/// ```rust
/// use railway::{validate, Failure, Fallible, Success};
///
/// #[derive(Debug, PartialEq)]
/// struct Account {
///     name: String,
///     age: u8,
/// }
///
/// let account: Fallible<Account, String> = validate!(Account {
///     name: || Success("ada".to_string()),
///     age: || Fallible::from("36".parse::<u8>().map_err(|e| e.to_string())),
/// });
/// assert_eq!(account, Success(Account { name: "ada".to_string(), age: 36 }));
///
/// let rejected: Fallible<Account, String> = validate!(Account {
///     name: || Failure("name is required".to_string()),
///     age: || Success(36),
/// });
/// assert_eq!(rejected, Failure("name is required".to_string()));
/// ```
#[macro_export]
macro_rules! validate {
    ($($record:ident)::+ { $($field:ident : $accessor:expr),+ $(,)? }) => {
        (|| {
            $crate::Fallible::Success($($record)::+ {
                $(
                    $field: match ($accessor)() {
                        $crate::Fallible::Success(value) => value,
                        $crate::Fallible::Failure(error) => {
                            return $crate::Fallible::Failure(error)
                        }
                    },
                )+
            })
        })()
    };
}
