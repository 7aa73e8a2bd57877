mod crypto;
mod error;
mod trace;

pub mod der;
pub mod descriptor;
pub mod factory;
pub mod keyspec;
pub mod pem;

pub mod prelude {
  pub use crate::{
    crypto::{AlgorithmName, PublicKey, Signer, SigningKey, VerifyingKey},
    descriptor::{DescriptorKind, KeyDescriptor, PemKeyFile, Pkcs11Config, PrivateKeyDer},
    error::{KeyError, KeyResult},
    factory::{GeneratorFn, LoaderFn, SignerFactory},
    keyspec::{generate, EcdsaCurve, KeySpec, KeySpecParams, DEFAULT_RSA_KEY_BITS, MIN_RSA_KEY_BITS},
  };
}

/* ----------------------------------------------------------------- */
#[cfg(test)]
mod tests {
  use super::prelude::*;

  /// A log operator's startup path: parse the tree's key descriptor from
  /// configuration, resolve it through the factory, sign a tree head.
  #[test]
  fn test_resolve_descriptor_from_wire() {
    let factory = SignerFactory::with_default_loaders();

    let descriptor: KeyDescriptor = serde_json::from_str(
      r#"{"pem_key_file":{"path":"testdata/log-server.privkey.pem","password":"towel"}}"#,
    )
    .unwrap();
    let signer = factory.new_signer(&descriptor).unwrap();

    let tree_head = b"size=42 hash=deadbeef";
    let signature = signer.sign(tree_head).unwrap();
    signer.public_key().verify(tree_head, &signature).unwrap();
    assert_eq!(signer.alg(), AlgorithmName::EcdsaP256Sha256);
  }

  /// A tree-creation path: generate a key from a spec, embed it in the tree
  /// record as DER, and load it back on the serving path.
  #[test]
  fn test_generate_embed_reload() {
    let factory = SignerFactory::with_default_loaders();

    let spec: KeySpec = serde_json::from_str(r#"{"ecdsa_params":{"curve":"P256"}}"#).unwrap();
    let descriptor = factory.generate(&spec).unwrap();
    let signer = factory.new_signer(&descriptor).unwrap();

    let reloaded = factory.new_signer(&descriptor).unwrap();
    assert_eq!(signer.key_id(), reloaded.key_id());
  }

  #[test]
  fn test_pkcs11_descriptor_needs_registration() {
    // the core factory knows nothing about hardware tokens until a
    // treekey-pkcs11 loader is registered
    let factory = SignerFactory::with_default_loaders();
    let descriptor = KeyDescriptor::Pkcs11Config(Pkcs11Config {
      token_label: "log".to_string(),
      pin: "1234".to_string(),
      public_key: String::new(),
    });
    let err = factory.new_signer(&descriptor).unwrap_err();
    assert!(matches!(err, KeyError::NoLoaderRegistered(DescriptorKind::Pkcs11Config)));
  }
}
