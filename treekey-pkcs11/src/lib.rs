//! # treekey-pkcs11
//!
//! `treekey-pkcs11` resolves `pkcs11_config` key descriptors into signers backed
//! by a PKCS#11 hardware token. The token owns the private key; this crate only
//! holds the module path, token label, PIN and the matching public key, and
//! delegates every signing operation to the external module.
//!
//! The `pkcs11` cargo feature (off by default) links the actual token interface.
//! Without it, [`Pkcs11Signer::from_config`] validates its configuration and then
//! reports [`Pkcs11KeyError::Unsupported`], so deployments without hardware
//! tokens carry no FFI dependency.

mod error;
#[cfg(feature = "pkcs11")]
mod token;

pub use error::{Pkcs11KeyError, Pkcs11KeyResult};
#[cfg(feature = "pkcs11")]
pub use token::Pkcs11Signer;

use treekey::prelude::{DescriptorKind, KeyDescriptor, KeyError, LoaderFn, SigningKey};

#[cfg(not(feature = "pkcs11"))]
mod stub {
  use crate::error::{Pkcs11KeyError, Pkcs11KeyResult};
  use treekey::prelude::{AlgorithmName, KeyResult, Pkcs11Config, PublicKey, SigningKey};

  /// Stand-in for the token-backed signer when the `pkcs11` feature is off.
  /// Never constructed; configuration is still validated for error parity.
  #[derive(Debug)]
  pub enum Pkcs11Signer {}

  impl Pkcs11Signer {
    pub fn from_config(module_path: &str, config: &Pkcs11Config) -> Pkcs11KeyResult<Self> {
      if module_path.is_empty() {
        return Err(Pkcs11KeyError::MissingModulePath);
      }
      treekey::pem::read_public_key(&config.public_key)?;
      Err(Pkcs11KeyError::Unsupported("built without the pkcs11 feature"))
    }
  }

  impl SigningKey for Pkcs11Signer {
    fn sign(&self, _data: &[u8]) -> KeyResult<Vec<u8>> {
      match *self {}
    }

    fn public_key(&self) -> PublicKey {
      match *self {}
    }

    fn key_id(&self) -> String {
      match *self {}
    }

    fn alg(&self) -> AlgorithmName {
      match *self {}
    }
  }
}
#[cfg(not(feature = "pkcs11"))]
pub use stub::Pkcs11Signer;

/// Build a loader for `pkcs11_config` descriptors bound to the given module
/// path, registerable with a `SignerFactory` under
/// [`DescriptorKind::Pkcs11Config`]
pub fn loader(module_path: impl Into<String>) -> LoaderFn {
  let module_path: String = module_path.into();
  Box::new(move |descriptor: &KeyDescriptor| match descriptor {
    KeyDescriptor::Pkcs11Config(config) => {
      let signer = Pkcs11Signer::from_config(&module_path, config).map_err(|e| KeyError::Pkcs11(e.to_string()))?;
      Ok(Box::new(signer) as Box<dyn SigningKey>)
    }
    other => Err(KeyError::WrongDescriptor {
      want: DescriptorKind::Pkcs11Config,
      got: other.kind(),
    }),
  })
}

/* ----------------------------------------------------------------- */
