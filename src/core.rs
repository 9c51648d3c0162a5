use serde::{Deserialize, Serialize};

/// RSA key pair encoded as PEM text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// PKCS#8 DER private key, PEM-armored under [`PrivateKeyLabel`]
    pub private_key_pem: String,
    /// PKIX (SubjectPublicKeyInfo) DER public key, PEM-armored as `PUBLIC KEY`
    pub public_key_pem: String,
}

/// Label written on the private key PEM block.
///
/// The body is PKCS#8 either way. `Legacy` keeps the `RSA PRIVATE KEY` header
/// that previously issued keys carry; `Pkcs8` writes the header matching the
/// actual encoding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrivateKeyLabel {
    #[default]
    Legacy,
    Pkcs8,
}

impl PrivateKeyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivateKeyLabel::Legacy => crate::crypto::LEGACY_PRIVATE_KEY_LABEL,
            PrivateKeyLabel::Pkcs8 => crate::crypto::PKCS8_PRIVATE_KEY_LABEL,
        }
    }
}

/// Options for RSA key-pair generation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct KeyGenOptions {
    /// Modulus size in bits
    pub bits: usize,
    pub private_key_label: PrivateKeyLabel,
}

impl Default for KeyGenOptions {
    fn default() -> Self {
        Self {
            bits: crate::crypto::DEFAULT_KEY_BITS,
            private_key_label: PrivateKeyLabel::default(),
        }
    }
}
