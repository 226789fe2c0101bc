/// Application error carrying the process exit code.
///
/// Exit codes:
/// - `2`: usage, configuration, or local file problems
/// - `4`: data-source problems (fetch, parse, empty series)
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Usage / local I/O error (exit code 2).
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Data-source error (exit code 4).
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::data("IMF returned no observations.");
        assert_eq!(err.to_string(), "IMF returned no observations.");
        assert_eq!(err.message(), "IMF returned no observations.");
        assert_eq!(err.exit_code(), 4);
        assert_eq!(AppError::input("x").exit_code(), 2);
    }
}
