pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns `InvalidFormat` from the enclosing function unless `$cond` holds.
///
/// Both the field and the condition are reported as written at the call
/// site, e.g. `verify_data!(block_size, block_size % 8 == 0)`.
#[macro_export]
macro_rules! verify_data {
    ($field:expr, $cond:expr) => {
        if !$cond {
            return Err($crate::result::format_violation(
                stringify!($field),
                stringify!($cond),
            ));
        }
    };
}

#[cold]
#[inline(never)]
pub fn format_violation(field: &str, condition: &str) -> crate::error::Error {
    crate::error::Error::invalid_format(field, condition)
}
