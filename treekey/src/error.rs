use crate::descriptor::DescriptorKind;
use thiserror::Error;

/// Result type for key management
pub type KeyResult<T> = std::result::Result<T, KeyError>;

/// Error type for key management
#[derive(Error, Debug)]
pub enum KeyError {
  /* ----- Malformed input ----- */
  /// Invalid private key material
  #[error("Failed to parse private key: {0}")]
  ParsePrivateKey(String),
  /// Invalid public key material
  #[error("Failed to parse public key: {0}")]
  ParsePublicKey(String),
  /// No PEM block found in the input
  #[error("No PEM block found")]
  NoPemBlock,
  /// Non-whitespace bytes after a valid PEM block
  #[error("Trailing data after PEM block")]
  TrailingData,
  /// Encrypted PEM block could not be decrypted, e.g. wrong password
  #[error("Failed to decrypt PEM block: {0}")]
  DecryptPem(String),
  /// Signature bytes could not be parsed
  #[error("Failed to parse signature: {0}")]
  ParseSignature(String),
  /// Signature did not verify
  #[error("Invalid signature: {0}")]
  InvalidSignature(String),

  /* ----- Policy violations ----- */
  /// RSA modulus below the minimum size
  #[error("minimum RSA key size is {min} bits, got {got} bits")]
  RsaKeySize { min: i32, got: i32 },
  /// Key specification carries no parameters
  #[error("unsupported key generation params type")]
  UnsupportedParams,

  /* ----- Missing configuration ----- */
  /// No loader registered for the descriptor kind
  #[error("no loader registered for key descriptor type {0}")]
  NoLoaderRegistered(DescriptorKind),
  /// Factory has no generator configured
  #[error("key generation is not supported")]
  GenerationNotSupported,
  /// A loader was invoked with a descriptor of another kind
  #[error("loader for {want} got a {got} descriptor")]
  WrongDescriptor {
    want: DescriptorKind,
    got: DescriptorKind,
  },
  /// Error reported by a PKCS#11 module
  #[error("PKCS#11 error: {0}")]
  Pkcs11(String),

  /* ----- Environment ----- */
  /// Key file could not be read
  #[error("Failed to read key file: {0}")]
  Io(#[from] std::io::Error),
  /// Key generation failed in the underlying crypto library
  #[error("Failed to generate key: {0}")]
  GenerateKey(String),
}
