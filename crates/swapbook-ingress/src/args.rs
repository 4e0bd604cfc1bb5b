//! Positional argument validation.
//!
//! Every argument arrives as a string. These helpers check arity and parse
//! numeric positions, reporting 1-based positions in errors.

use swapbook_types::{Result, SwapbookError};

/// Arguments of one call, tagged with the function name for error messages.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    function: &'a str,
    values: &'a [&'a str],
}

impl<'a> Args<'a> {
    #[must_use]
    pub fn new(function: &'a str, values: &'a [&'a str]) -> Self {
        Self { function, values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Require exactly `n` arguments.
    pub fn exactly(&self, n: usize) -> Result<()> {
        if self.values.len() != n {
            return Err(self.count_error(n.to_string()));
        }
        Ok(())
    }

    /// Require at least `n` arguments.
    pub fn at_least(&self, n: usize) -> Result<()> {
        if self.values.len() < n {
            return Err(self.count_error(format!("at least {n}")));
        }
        Ok(())
    }

    /// Require one of the listed arities.
    pub fn one_of(&self, arities: &[usize]) -> Result<()> {
        if !arities.contains(&self.values.len()) {
            let expected = arities
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(self.count_error(expected));
        }
        Ok(())
    }

    /// Require an odd number of arguments.
    pub fn odd(&self) -> Result<()> {
        if self.values.len() % 2 == 0 {
            return Err(self.count_error("an odd number".to_string()));
        }
        Ok(())
    }

    /// Argument at 0-based `idx`, as given.
    pub fn str(&self, idx: usize) -> Result<&'a str> {
        self.values
            .get(idx)
            .copied()
            .ok_or_else(|| self.count_error(format!("at least {}", idx + 1)))
    }

    /// Argument at 0-based `idx`, which must be non-empty.
    pub fn non_empty(&self, idx: usize) -> Result<&'a str> {
        let value = self.str(idx)?;
        if value.is_empty() {
            return Err(SwapbookError::argument_format(
                self.function,
                idx + 1,
                "must be a non-empty string",
            ));
        }
        Ok(value)
    }

    /// Argument at 0-based `idx`, parsed as a decimal integer.
    pub fn int<T: std::str::FromStr>(&self, idx: usize) -> Result<T> {
        let value = self.str(idx)?;
        value.parse::<T>().map_err(|_| {
            SwapbookError::argument_format(
                self.function,
                idx + 1,
                format!("must be a numeric string, got {value:?}"),
            )
        })
    }

    fn count_error(&self, expected: String) -> SwapbookError {
        SwapbookError::ArgumentCount {
            function: self.function.to_string(),
            expected,
            actual: self.values.len(),
        }
    }
}
