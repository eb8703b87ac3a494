pub type FizzResult<T> = Result<T, FizzError>;

#[derive(thiserror::Error, Debug)]
pub enum FizzError {
    /// A container was built with insufficient or contradictory layout
    /// parameters. Surfaced at construction, never deferred to render.
    #[error("configuration error: {0}")]
    Config(String),

    /// An image/mask/font source of an unrecognized kind was supplied.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("color parse error: {0}")]
    Color(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FizzError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<image::ImageError> for FizzError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Encode(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FizzError::config("x")
                .to_string()
                .contains("configuration error:")
        );
        assert!(
            FizzError::unsupported("x")
                .to_string()
                .contains("unsupported input:")
        );
        assert!(FizzError::encode("x").to_string().contains("encode error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = FizzError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
