/// `?` for `next()` bodies: evaluates to the `Ok` value, or returns
/// `Some(Err(e))` from the enclosing function.
#[macro_export]
macro_rules! try_or_ret_some_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        }
    };
}

#[cfg(test)]
mod tests {
    fn halve(value: u32) -> Result<u32, String> {
        if value % 2 == 0 {
            Ok(value / 2)
        } else {
            Err(format!("{value} is odd"))
        }
    }

    fn next_half(value: u32) -> Option<Result<u32, String>> {
        Some(Ok(try_or_ret_some_err!(halve(value)) + 1))
    }

    #[test]
    fn test_try_or_ret_some_err() {
        assert_eq!(next_half(8), Some(Ok(5)));
        assert_eq!(next_half(3), Some(Err("3 is odd".to_string())));
    }
}
