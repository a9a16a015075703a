/// Misuse of an unwrapping accessor.
///
/// Unwrapping the wrong variant is a programmer error, so [`Optional::unwrap`](crate::Optional::unwrap)
/// and friends panic with this error's message. The `try_*` accessors return it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UnwrapError {
    #[error("called `Optional::unwrap()` on an `Absent` value")]
    AbsentValue,
    #[error("called `Fallible::unwrap()` on a `Failure` value")]
    FailureValue,
    #[error("called `Fallible::unwrap_err()` on a `Success` value")]
    SuccessValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_accessor_and_variant() {
        assert_eq!(
            UnwrapError::AbsentValue.to_string(),
            "called `Optional::unwrap()` on an `Absent` value"
        );
        assert_eq!(
            UnwrapError::FailureValue.to_string(),
            "called `Fallible::unwrap()` on a `Failure` value"
        );
        assert_eq!(
            UnwrapError::SuccessValue.to_string(),
            "called `Fallible::unwrap_err()` on a `Success` value"
        );
    }
}
