use std::borrow::Cow;

/// A specialized [`ArchiverError`] enum of this crate.
///
/// Every variant is caught at the workflow boundary and reported through the reply `msg`;
/// none of them ever becomes an HTTP error.
#[derive(Debug, thiserror::Error)]
pub enum ArchiverError {
    /// The inbound request body could not be decoded.
    #[error("Malformed input{}: {source}", format_context(.context))]
    MalformedInput { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// Timeout or transport failure on an outbound call.
    #[error("Network failure{}: {source}", format_context(.context))]
    Network { source: reqwest::Error, context: Option<Cow<'static, str>> },
    /// The expected HTML pattern is absent from the target site response.
    #[error("Extraction failed{}: {message}", format_context(.context))]
    ExtractionFailed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The extracted text is not a valid cost.
    #[error("Parse failed{}: {message}", format_context(.context))]
    ParseFailed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The target site client could not be built from the configuration.
    #[error("Archiver config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal archiver error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ArchiverError {
    /// `true` when an outbound call was aborted by the client timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }

    fn with_context(mut self, value: Cow<'static, str>) -> Self {
        match &mut self {
            Self::MalformedInput { context, .. }
            | Self::Network { context, .. }
            | Self::ExtractionFailed { context, .. }
            | Self::ParseFailed { context, .. }
            | Self::Config { context, .. }
            | Self::Internal { context, .. } => *context = Some(value),
        }
        self
    }
}

impl From<serde_json::Error> for ArchiverError {
    #[inline]
    fn from(source: serde_json::Error) -> Self {
        Self::MalformedInput { source, context: None }
    }
}

impl From<reqwest::Error> for ArchiverError {
    #[inline]
    fn from(source: reqwest::Error) -> Self {
        Self::Network { source, context: None }
    }
}

/// Adds `.context(...)` to any result whose error converts into [`ArchiverError`].
pub trait ArchiverErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ArchiverError>;
}

impl<T, E> ArchiverErrorExt<T> for Result<T, E>
where
    E: Into<ArchiverError>,
{
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ArchiverError> {
        self.map_err(|e| e.into().with_context(context.into()))
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
