use log::warn;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Postgres SQLSTATEs worth another attempt.
const TRANSIENT_SQLSTATES: &[&str] = &["40001", "40P01", "53300", "57P01", "57P02", "57P03"];

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        let jitter = rand::thread_rng().gen_range(1.0..1.1);
        exp.mul_f64(jitter).min(self.max_delay)
    }

    /// Upper bound on the total time spent sleeping between attempts.
    pub fn max_total_backoff(&self) -> Duration {
        (0..self.max_retries)
            .map(|attempt| {
                self.base_delay
                    .saturating_mul(2u32.saturating_pow(attempt))
                    .mul_f64(1.1)
                    .min(self.max_delay)
            })
            .sum()
    }

    /// Runs `op` until it succeeds, fails with a non-transient error, or retries run out.
    pub async fn run<T, F, Fut>(&self, what: &str, op: F) -> Result<T, sqlx::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        self.run_when(what, is_transient, op).await
    }

    /// Like `run`, with the caller deciding which errors earn another attempt.
    pub async fn run_when<T, F, Fut, P>(&self, what: &str, retryable: P, mut op: F) -> Result<T, sqlx::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
        P: Fn(&sqlx::Error) -> bool,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_retries && retryable(&err) => {
                    let delay = self.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        "{} failed ({}), retry {}/{} in {:?}",
                        what, err, attempt, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Errors worth retrying for reads. A pool timeout already spent the acquire budget, so it is final.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => true,
        _ => is_transient_sqlstate(err),
    }
}

/// Errors worth retrying while opening the pool, where nothing has been written yet.
pub fn is_transient_connect(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolTimedOut) || is_transient(err)
}

/// Errors a write can be retried on without risking a duplicate row: the server reported
/// that the statement did not commit. I/O failures are ambiguous and are not retried.
pub fn is_transient_write(err: &sqlx::Error) -> bool {
    is_transient_sqlstate(err)
}

fn is_transient_sqlstate(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| code.starts_with("08") || TRANSIENT_SQLSTATES.iter().any(|c| code == *c))
            .unwrap_or(false),
        _ => false,
    }
}
