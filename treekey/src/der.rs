use crate::{
  crypto::{Signer, SigningKey},
  descriptor::{DescriptorKind, KeyDescriptor, PrivateKeyDer},
  error::{KeyError, KeyResult},
  keyspec::{self, KeySpec},
};

/// Materialize a signer from PKCS#8 DER-encoded private key bytes
pub fn from_private_key_der(der: &[u8]) -> KeyResult<Signer> {
  if der.is_empty() {
    return Err(KeyError::ParsePrivateKey("empty DER bytes".to_string()));
  }
  Signer::from_der(der)
}

/// Serialize a signer's private key as PKCS#8 DER, the inverse of
/// [`from_private_key_der`]
pub fn marshal_private_key(signer: &Signer) -> KeyResult<Vec<u8>> {
  signer.to_pkcs8_der()
}

/// Generate a fresh key per `spec` and wrap it in a `private_key` descriptor.
/// This is the stock generator for a
/// [`SignerFactory`](crate::factory::SignerFactory).
pub fn new_descriptor_from_spec(spec: &KeySpec) -> KeyResult<KeyDescriptor> {
  let signer = keyspec::generate(spec)?;
  let der = marshal_private_key(&signer)?;
  Ok(KeyDescriptor::PrivateKeyDer(PrivateKeyDer { der }))
}

/// Loader for `private_key` descriptors, registerable with a
/// [`SignerFactory`](crate::factory::SignerFactory)
pub fn loader(descriptor: &KeyDescriptor) -> KeyResult<Box<dyn SigningKey>> {
  match descriptor {
    KeyDescriptor::PrivateKeyDer(key) => Ok(Box::new(from_private_key_der(&key.der)?)),
    other => Err(KeyError::WrongDescriptor {
      want: DescriptorKind::PrivateKeyDer,
      got: other.kind(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::crypto::VerifyingKey;
  use crate::keyspec::EcdsaCurve;
  use base64::{engine::general_purpose, Engine as _};

  // ECDSA P-256 private key in PKCS#8 DER
  const ECDSA_KEY_DER_B64: &str = "MIGHAgEAMBMGByqGSM49AgEGCCqGSM49AwEHBG0wawIBAQQgS81mfpvtTmaINn+gtrYXn4XpxxgE655GLSKsA3hhjHmhRANCAASwBWDdgHS04V/cN0LZgc8vZaK4I1HWLLCoaOO27Z0B1aS1aqBE7g1Oo8ldSCBJAvee866kcHhZkVniPdCG2ZZG";

  #[test]
  fn test_from_private_key_der() {
    let der = general_purpose::STANDARD.decode(ECDSA_KEY_DER_B64).unwrap();
    let signer = from_private_key_der(&der).unwrap();
    assert!(matches!(signer, Signer::EcdsaP256(_)));

    assert!(from_private_key_der(b"foobar").is_err());
    assert!(from_private_key_der(b"").is_err());
  }

  #[test]
  fn test_marshal_round_trip() {
    let der = general_purpose::STANDARD.decode(ECDSA_KEY_DER_B64).unwrap();
    let signer = from_private_key_der(&der).unwrap();
    let marshaled = marshal_private_key(&signer).unwrap();
    let reparsed = from_private_key_der(&marshaled).unwrap();
    assert_eq!(SigningKey::key_id(&signer), SigningKey::key_id(&reparsed));
  }

  #[test]
  fn test_new_descriptor_from_spec() {
    let descriptor = new_descriptor_from_spec(&KeySpec::ecdsa(EcdsaCurve::P256)).unwrap();
    let signer = loader(&descriptor).unwrap();

    let data = b"map root";
    let signature = signer.sign(data).unwrap();
    signer.public_key().verify(data, &signature).unwrap();

    // specs without params are rejected before any generation
    assert!(matches!(
      new_descriptor_from_spec(&KeySpec::default()).unwrap_err(),
      KeyError::UnsupportedParams
    ));
  }

  #[test]
  fn test_loader_rejects_other_descriptors() {
    let descriptor = KeyDescriptor::PemKeyFile(Default::default());
    let err = loader(&descriptor).unwrap_err();
    assert!(matches!(
      err,
      KeyError::WrongDescriptor {
        want: DescriptorKind::PrivateKeyDer,
        got: DescriptorKind::PemKeyFile,
      }
    ));
  }
}
