use thiserror::Error;
use treekey::prelude::KeyError;

/// Result type for PKCS#11-backed signers
pub type Pkcs11KeyResult<T> = std::result::Result<T, Pkcs11KeyError>;

/// Error type for PKCS#11-backed signers
#[derive(Error, Debug)]
pub enum Pkcs11KeyError {
  /// The loader was built without a module path
  #[error("No PKCS#11 module path configured")]
  MissingModulePath,

  /// Crate was built without the `pkcs11` feature
  #[error("PKCS#11 support is not available: {0}")]
  Unsupported(&'static str),

  /// The PKCS#11 module reported an error
  #[error("PKCS#11 module error: {0}")]
  Module(String),

  /// No matching token or key object was found
  #[error("Key not found on token: {0}")]
  KeyNotFound(String),

  /// The token failed to produce a signature
  #[error("PKCS#11 signing error: {0}")]
  Sign(String),

  /// Inherited from KeyError
  #[error("KeyError: {0}")]
  KeyError(#[from] KeyError),
}
