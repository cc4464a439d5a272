pub mod constants;
pub mod credentials;
pub mod logging;
mod macros;
pub mod platform;

use std::{thread, time::Duration};

use log::{debug, trace};

/// Performs a retry on a given closure with a given number of attempts and delay.
///
/// An `attempts` value of `0` is treated the same as `1`.
///
/// # Errors
/// Will error when retries have been expended.
pub fn retry<V, F>(attempts: u8, delay: u64, f: F) -> miette::Result<V>
where
    F: Fn() -> miette::Result<V>,
{
    trace!("retry({attempts}, {delay}, ...)");

    let mut attempts = attempts.max(1);
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) if attempts == 1 => return Err(e),
            Err(e) => {
                attempts -= 1;
                debug!("Retrying in {delay}s, {attempts} attempt(s) left: {e}");
                thread::sleep(Duration::from_secs(delay));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use miette::bail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn retry_returns_first_success() {
        let calls = Cell::new(0);
        let value = retry(3, 0, || {
            calls.set(calls.get() + 1);
            if calls.get() < 2 {
                bail!("not yet");
            }
            Ok(calls.get())
        })
        .unwrap();

        assert_eq!(value, 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn retry_gives_up_after_attempts() {
        let calls = Cell::new(0);
        let result: miette::Result<()> = retry(3, 0, || {
            calls.set(calls.get() + 1);
            bail!("always fails")
        });

        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn retry_zero_attempts_runs_once() {
        let calls = Cell::new(0);
        let result: miette::Result<()> = retry(0, 0, || {
            calls.set(calls.get() + 1);
            bail!("always fails")
        });

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
