/// A trait to abstract over environment variable access.
///
/// [`Options`](crate::opt::Options) read their overrides through this trait,
/// with [`Env`] accessing the process environment.
pub(crate) trait Environment {
    /// Look up the raw value of the environment variable.
    fn read_os(&self, key: &str) -> Option<std::ffi::OsString>;

    /// Look up the value of the environment variable as Unicode.
    fn read(&self, key: &str) -> Result<String, std::env::VarError> {
        self.read_os(key).map_or_else(
            || Err(std::env::VarError::NotPresent),
            |s| s.into_string().map_err(std::env::VarError::NotUnicode),
        )
    }

    /// Try reading the non-empty, trimmed value of the environment variable.
    fn read_non_empty(&self, key: &str) -> Option<String> {
        self.read(key)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Try reading and parsing the environment variable.
    ///
    /// Unset and empty variables are treated the same. A value that does not
    /// parse is logged and ignored.
    fn parse<T: core::str::FromStr>(&self, key: &str) -> Option<T> {
        let value = self.read_non_empty(key)?;
        let parsed = value.parse().ok();
        if parsed.is_none() {
            log::warn!("ignoring environment variable {}={:?}", key, value);
        }
        parsed
    }
}

#[derive(Debug, Default)]
pub(crate) struct Env();

impl Environment for Env {
    fn read_os(&self, key: &str) -> Option<std::ffi::OsString> {
        std::env::var_os(key)
    }
}


#[cfg(test)]
pub(crate) use test::FakeEnv;
