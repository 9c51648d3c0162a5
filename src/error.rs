use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid PEM: {0}")]
    InvalidPem(String),

    #[error("Key parse error: {0}")]
    KeyParse(String),

    #[error("Signature error: {0}")]
    Signature(String),

    #[error("Base64 decode error: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Verification failed: {0}")]
    Verification(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<rsa::pkcs8::spki::Error> for Error {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    #[test]
    fn test_base64_error_converts() {
        let err: Error = general_purpose::STANDARD
            .decode("not base64!")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::InvalidEncoding(_)));
        assert!(err.to_string().starts_with("Base64 decode error"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::InvalidPem("no PEM block found".into()).to_string(),
            "Invalid PEM: no PEM block found"
        );
        assert_eq!(
            Error::Verification("bad signature".into()).to_string(),
            "Verification failed: bad signature"
        );
    }
}
