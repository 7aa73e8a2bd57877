use crate::{
  crypto::SigningKey,
  der,
  descriptor::{DescriptorKind, KeyDescriptor},
  error::{KeyError, KeyResult},
  keyspec::KeySpec,
  pem,
  trace::*,
};
use rustc_hash::FxHashMap;

/// Resolves a [`KeyDescriptor`] into a signer
pub type LoaderFn = Box<dyn Fn(&KeyDescriptor) -> KeyResult<Box<dyn SigningKey>> + Send + Sync>;

/// Generates a new private key from a [`KeySpec`], returning a descriptor
/// that a registered loader can resolve
pub type GeneratorFn = Box<dyn Fn(&KeySpec) -> KeyResult<KeyDescriptor> + Send + Sync>;

/* -------------------------------- */
/// Registry mapping descriptor kinds to loaders, with an optional generator
/// for creating brand-new keys.
///
/// A factory is built and populated once at startup and read thereafter;
/// it is an explicit object handed to its users, not process-global state.
#[derive(Default)]
pub struct SignerFactory {
  generator: Option<GeneratorFn>,
  loaders: FxHashMap<DescriptorKind, LoaderFn>,
}

impl SignerFactory {
  /// An empty factory with no loaders and no generator
  pub fn new() -> Self {
    Self::default()
  }

  /// A factory with the stock PEM-file and DER loaders registered and the
  /// DER generator configured
  pub fn with_default_loaders() -> Self {
    let mut factory = Self::new();
    factory.add_loader(DescriptorKind::PemKeyFile, Box::new(pem::loader));
    factory.add_loader(DescriptorKind::PrivateKeyDer, Box::new(der::loader));
    factory.set_generator(Box::new(der::new_descriptor_from_spec));
    factory
  }

  /// Register `loader` for descriptors of `kind`, replacing and warning on
  /// any previous registration
  pub fn add_loader(&mut self, kind: DescriptorKind, loader: LoaderFn) {
    if self.loaders.contains_key(&kind) {
      warn!("Overriding loader for key descriptor type {kind}");
    }
    self.loaders.insert(kind, loader);
  }

  /// Remove a previously registered loader
  pub fn remove_loader(&mut self, kind: DescriptorKind) {
    self.loaders.remove(&kind);
  }

  /// Configure the generator used by [`SignerFactory::generate`]
  pub fn set_generator(&mut self, generator: GeneratorFn) {
    self.generator = Some(generator);
  }

  /// Resolve `descriptor` into a signer via the loader registered for its kind
  pub fn new_signer(&self, descriptor: &KeyDescriptor) -> KeyResult<Box<dyn SigningKey>> {
    let kind = descriptor.kind();
    match self.loaders.get(&kind) {
      Some(loader) => loader(descriptor),
      None => Err(KeyError::NoLoaderRegistered(kind)),
    }
  }

  /// Create a new private key according to `spec`, returning a descriptor
  /// resolvable by [`SignerFactory::new_signer`]
  pub fn generate(&self, spec: &KeySpec) -> KeyResult<KeyDescriptor> {
    match &self.generator {
      Some(generator) => generator(spec),
      None => Err(KeyError::GenerationNotSupported),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::crypto::VerifyingKey;
  use crate::descriptor::PrivateKeyDer;
  use crate::keyspec::EcdsaCurve;

  #[test]
  fn test_no_loader_registered() {
    let factory = SignerFactory::new();
    let descriptor = KeyDescriptor::PrivateKeyDer(PrivateKeyDer::default());
    let err = factory.new_signer(&descriptor).unwrap_err();
    assert!(matches!(err, KeyError::NoLoaderRegistered(DescriptorKind::PrivateKeyDer)));
  }

  #[test]
  fn test_register_then_resolve() {
    let mut factory = SignerFactory::new();
    let descriptor = KeyDescriptor::PrivateKeyDer(PrivateKeyDer {
      der: crate::der::marshal_private_key(&crate::keyspec::generate(&KeySpec::ecdsa(EcdsaCurve::P256)).unwrap())
        .unwrap(),
    });

    assert!(factory.new_signer(&descriptor).is_err());
    factory.add_loader(DescriptorKind::PrivateKeyDer, Box::new(der::loader));
    let signer = factory.new_signer(&descriptor).unwrap();

    let data = b"leaf hash";
    let signature = signer.sign(data).unwrap();
    signer.public_key().verify(data, &signature).unwrap();
  }

  #[test]
  fn test_remove_loader() {
    let mut factory = SignerFactory::with_default_loaders();
    factory.remove_loader(DescriptorKind::PrivateKeyDer);
    let descriptor = KeyDescriptor::PrivateKeyDer(PrivateKeyDer::default());
    assert!(matches!(
      factory.new_signer(&descriptor).unwrap_err(),
      KeyError::NoLoaderRegistered(DescriptorKind::PrivateKeyDer)
    ));
  }

  #[test]
  fn test_loader_override_replaces() {
    let mut factory = SignerFactory::with_default_loaders();
    factory.add_loader(
      DescriptorKind::PrivateKeyDer,
      Box::new(|_| Err(KeyError::ParsePrivateKey("always fails".to_string()))),
    );
    let descriptor = KeyDescriptor::PrivateKeyDer(PrivateKeyDer::default());
    assert!(matches!(
      factory.new_signer(&descriptor).unwrap_err(),
      KeyError::ParsePrivateKey(_)
    ));
  }

  #[test]
  fn test_generate_unsupported_without_generator() {
    let factory = SignerFactory::new();
    let err = factory.generate(&KeySpec::ecdsa(EcdsaCurve::Default)).unwrap_err();
    assert!(matches!(err, KeyError::GenerationNotSupported));
  }

  #[test]
  fn test_generate_then_resolve() {
    let factory = SignerFactory::with_default_loaders();
    let descriptor = factory.generate(&KeySpec::ecdsa(EcdsaCurve::P384)).unwrap();
    assert_eq!(descriptor.kind(), DescriptorKind::PrivateKeyDer);

    let signer = factory.new_signer(&descriptor).unwrap();
    let data = b"consistency proof";
    let signature = signer.sign(data).unwrap();
    signer.public_key().verify(data, &signature).unwrap();
  }
}
