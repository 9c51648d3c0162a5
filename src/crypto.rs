//! RSA key generation and PKCS#1 v1.5 signing with SHA-1.

use std::time::Instant;

use base64::{engine::general_purpose, Engine as _};
use pem::{EncodeConfig, Pem};
use rand::rngs::OsRng;
use rsa::{
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding},
    Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
};
use sha1::{Digest, Sha1};
use tracing::{debug, trace};

use crate::core::{KeyGenOptions, KeyPair, PrivateKeyLabel};
use crate::error::{Error, Result};

/// Modulus size used by [`generate_key_pair`].
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Smallest modulus accepted by [`generate_key_pair_with`].
pub const MIN_KEY_BITS: usize = 1024;

/// Historical label of the private key block. The body is PKCS#8, not PKCS#1.
pub const LEGACY_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

pub const PKCS8_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

const PEM_BEGIN: &str = "-----BEGIN ";

/// Generate a new 4096-bit RSA key pair and return both keys in PEM format.
///
/// The private key is PKCS#8 DER armored as `RSA PRIVATE KEY`, the public key
/// is PKIX DER armored as `PUBLIC KEY`.
///
/// # Errors
///
/// Returns [`Error::KeyGeneration`] if the RNG or prime generation fails and
/// [`Error::Encoding`] if either key cannot be serialized.
pub fn generate_key_pair() -> Result<KeyPair> {
    generate_key_pair_with(&KeyGenOptions::default())
}

/// Generate a new RSA key pair using the given options.
pub fn generate_key_pair_with(options: &KeyGenOptions) -> Result<KeyPair> {
    let private_key = KeyManager::generate_keypair(options.bits)?;

    let private_key_pem =
        KeyManager::export_private_key_pem(&private_key, options.private_key_label)?;
    let public_key_pem = KeyManager::export_public_key_pem(&private_key.to_public_key())?;

    Ok(KeyPair {
        private_key_pem,
        public_key_pem,
    })
}

/// Sign `plain_text` with the PEM-encoded private key and return the base64 signature.
///
/// The SHA-1 digest of the UTF-8 bytes of `plain_text` is signed with
/// PKCS#1 v1.5 padding. The PEM label is not checked; the block body must be a
/// PKCS#8 RSA private key.
///
/// # Errors
///
/// - [`Error::InvalidPem`] if no PEM block is found
/// - [`Error::KeyParse`] if the block is not a PKCS#8 RSA private key
/// - [`Error::Signature`] if the signing primitive fails
pub fn sign(private_key_pem: &str, plain_text: &str) -> Result<String> {
    let private_key = KeyManager::load_private_key_pem(private_key_pem)?;
    trace!(len = plain_text.len(), "signing payload");

    let digest = SignatureManager::digest(plain_text);
    SignatureManager::sign_digest(&digest, &private_key)
}

/// Verify a base64 signature over `original_text` against the PEM-encoded public key.
///
/// # Errors
///
/// - [`Error::InvalidEncoding`] if `signature` is not standard base64
/// - [`Error::InvalidPem`] if no PEM block is found
/// - [`Error::KeyParse`] if the block is not a PKIX RSA public key
/// - [`Error::Verification`] if the signature does not match
pub fn verify(public_key_pem: &str, original_text: &str, signature: &str) -> Result<()> {
    let signature_bytes = general_purpose::STANDARD.decode(signature)?;
    let public_key = KeyManager::load_public_key_pem(public_key_pem)?;
    trace!(len = original_text.len(), "verifying payload");

    let digest = SignatureManager::digest(original_text);
    verify_raw(&public_key, &digest, &signature_bytes)
}

fn verify_raw(public_key: &RsaPublicKey, digest: &[u8], signature: &[u8]) -> Result<()> {
    public_key
        .verify(Pkcs1v15Sign::new::<Sha1>(), digest, signature)
        .map_err(|e| Error::Verification(e.to_string()))
}

/// Decode the first well-formed PEM block in `pem_text`, returning its label and body.
///
/// A block starts with a BEGIN line at the start of a line. Trailing spaces and
/// tabs are trimmed from every line, CRLF is accepted and the base64 body may
/// be wrapped at any width. A block whose body does not decode is skipped in
/// favour of the next one. The label is returned but never checked.
fn decode_pem_block(pem_text: &str) -> Result<(String, Vec<u8>)> {
    let mut normalized = pem_text
        .lines()
        .map(|line| line.trim_end_matches(|c: char| c == ' ' || c == '\t'))
        .collect::<Vec<_>>()
        .join("\n");
    normalized.push('\n');

    let mut last_error = None;
    for start in block_starts(&normalized) {
        match pem::parse(&normalized[start..]) {
            Ok(block) => return Ok((block.tag().to_string(), block.into_contents())),
            Err(e) => last_error = Some(e),
        }
    }

    Err(Error::InvalidPem(match last_error {
        Some(e) => e.to_string(),
        None => "no PEM block found".to_string(),
    }))
}

/// Byte offsets of every line that opens a PEM block.
fn block_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let first = text.starts_with(PEM_BEGIN).then_some(0);
    let rest = text
        .match_indices(PEM_BEGIN)
        .filter(|(i, _)| *i > 0 && text.as_bytes()[i - 1] == b'\n')
        .map(|(i, _)| i);
    first.into_iter().chain(rest)
}

/// Key manager for RSA key operations
pub struct KeyManager;

impl KeyManager {
    /// Generate a new RSA private key with a `bits`-bit modulus.
    pub fn generate_keypair(bits: usize) -> Result<RsaPrivateKey> {
        if bits < MIN_KEY_BITS {
            return Err(Error::KeyGeneration(format!(
                "modulus of {} bits is below the {} bit minimum",
                bits, MIN_KEY_BITS
            )));
        }

        debug!(bits, "generating RSA key pair");
        let started = Instant::now();
        let mut rng = OsRng;
        let private_key =
            RsaPrivateKey::new(&mut rng, bits).map_err(|e| Error::KeyGeneration(e.to_string()))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        debug!(bits, elapsed_ms, "generated RSA key pair");

        Ok(private_key)
    }

    /// Export private key as PKCS#8 DER wrapped in a PEM block with the given label.
    pub fn export_private_key_pem(
        private_key: &RsaPrivateKey,
        label: PrivateKeyLabel,
    ) -> Result<String> {
        let der = private_key
            .to_pkcs8_der()
            .map_err(|e| Error::Encoding(e.to_string()))?;
        let block = Pem::new(label.as_str(), der.as_bytes());
        Ok(pem::encode_config(
            &block,
            EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
        ))
    }

    /// Export public key as a PKIX `PUBLIC KEY` PEM block.
    pub fn export_public_key_pem(public_key: &RsaPublicKey) -> Result<String> {
        Ok(public_key.to_public_key_pem(LineEnding::LF)?)
    }

    /// Load a PKCS#8 RSA private key from the first PEM block, whatever its label.
    pub fn load_private_key_pem(pem_data: &str) -> Result<RsaPrivateKey> {
        let (_, der) = decode_pem_block(pem_data)?;
        RsaPrivateKey::from_pkcs8_der(&der).map_err(|e| Error::KeyParse(e.to_string()))
    }

    /// Load a PKIX RSA public key from the first PEM block.
    pub fn load_public_key_pem(pem_data: &str) -> Result<RsaPublicKey> {
        let (_, der) = decode_pem_block(pem_data)?;
        RsaPublicKey::from_public_key_der(&der).map_err(|e| Error::KeyParse(e.to_string()))
    }
}

/// Signature manager for callers that already hold parsed keys
pub struct SignatureManager;

impl SignatureManager {
    /// SHA-1 digest of the UTF-8 bytes of `text`.
    pub fn digest(text: &str) -> Vec<u8> {
        Sha1::digest(text.as_bytes()).to_vec()
    }

    /// Sign a SHA-1 digest with PKCS#1 v1.5 padding and return the base64 signature.
    pub fn sign_digest(digest: &[u8], private_key: &RsaPrivateKey) -> Result<String> {
        let mut rng = OsRng;
        let signature = private_key
            .sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha1>(), digest)
            .map_err(|e| Error::Signature(e.to_string()))?;
        Ok(general_purpose::STANDARD.encode(signature))
    }

    /// Verify a base64 PKCS#1 v1.5 signature over a SHA-1 digest.
    pub fn verify_digest(
        digest: &[u8],
        signature_b64: &str,
        public_key: &RsaPublicKey,
    ) -> Result<()> {
        let signature_bytes = general_purpose::STANDARD.decode(signature_b64)?;
        verify_raw(public_key, digest, &signature_bytes)
    }
}
