/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Delay before each retry, in order. Its length caps the retry count.
    pub retry_delays_ms: Vec<u64>,
    /// Error statuses that are never retried.
    pub non_retryable_statuses: Vec<u16>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            retry_delays_ms: vec![1_000, 3_000, 10_000],
            non_retryable_statuses: vec![400, 401, 403, 404],
        }
    }
}

impl ClientOptions {
    /// Reads overrides from the environment.
    ///
    /// - `RESTFUL_FETCHER_TIMEOUT_MS`: per-attempt timeout
    /// - `RESTFUL_FETCHER_RETRY_DELAYS_MS`: comma-separated delays, e.g. `1000,3000`
    /// - `RESTFUL_FETCHER_NON_RETRYABLE_STATUSES`: comma-separated statuses
    ///
    /// Unset variables keep their defaults. An empty delay list disables retries.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut options = Self::default();
        if let Some(raw) = lookup("RESTFUL_FETCHER_TIMEOUT_MS") {
            options.timeout_ms = raw.trim().parse::<u64>().map_err(|err| {
                format!("RESTFUL_FETCHER_TIMEOUT_MS must be an integer, got '{raw}': {err}")
            })?;
        }
        if let Some(raw) = lookup("RESTFUL_FETCHER_RETRY_DELAYS_MS") {
            options.retry_delays_ms = parse_list("RESTFUL_FETCHER_RETRY_DELAYS_MS", &raw)?;
        }
        if let Some(raw) = lookup("RESTFUL_FETCHER_NON_RETRYABLE_STATUSES") {
            options.non_retryable_statuses =
                parse_list("RESTFUL_FETCHER_NON_RETRYABLE_STATUSES", &raw)?;
        }
        Ok(options)
    }
}

fn parse_list<T>(key: &str, raw: &str) -> Result<Vec<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<T>()
                .map_err(|err| format!("{key} contains invalid entry '{item}': {err}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::ClientOptions;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let options = ClientOptions::from_lookup(lookup(&[])).expect("defaults must load");
        assert_eq!(options, ClientOptions::default());
    }

    #[test]
    fn lists_are_comma_separated() {
        let options = ClientOptions::from_lookup(lookup(&[
            ("RESTFUL_FETCHER_TIMEOUT_MS", "2500"),
            ("RESTFUL_FETCHER_RETRY_DELAYS_MS", "100, 200,400"),
            ("RESTFUL_FETCHER_NON_RETRYABLE_STATUSES", "400,422"),
        ]))
        .expect("overrides must load");

        assert_eq!(options.timeout_ms, 2_500);
        assert_eq!(options.retry_delays_ms, vec![100, 200, 400]);
        assert_eq!(options.non_retryable_statuses, vec![400, 422]);
    }

    #[test]
    fn empty_delay_list_disables_retries() {
        let options =
            ClientOptions::from_lookup(lookup(&[("RESTFUL_FETCHER_RETRY_DELAYS_MS", "")]))
                .expect("empty list is valid");
        assert!(options.retry_delays_ms.is_empty());
    }

    #[test]
    fn malformed_entry_is_reported() {
        let err = ClientOptions::from_lookup(lookup(&[(
            "RESTFUL_FETCHER_NON_RETRYABLE_STATUSES",
            "404,nope",
        )]))
        .expect_err("malformed list must fail");
        assert!(err.contains("'nope'"));
    }
}
