use serde::{Deserialize, Serialize};

/* -------------------------------- */
/// Serialized reference to an existing private key. Descriptors are resolved
/// into signers by the loaders registered with a
/// [`SignerFactory`](crate::factory::SignerFactory).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDescriptor {
  /// A password-protected (or plain) PEM file on disk
  PemKeyFile(PemKeyFile),
  /// A PKCS#8 DER-encoded private key carried inline
  #[serde(rename = "private_key")]
  PrivateKeyDer(PrivateKeyDer),
  /// A key held by a PKCS#11 hardware token
  Pkcs11Config(Pkcs11Config),
}

/// Reference to a PEM file on disk
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PemKeyFile {
  pub path: String,
  #[serde(default)]
  pub password: String,
}

/// DER-encoded private key bytes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeyDer {
  #[serde(default)]
  pub der: Vec<u8>,
}

/// Reference to a key on a PKCS#11 token. The module path is deployment
/// configuration and is supplied separately when the loader is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pkcs11Config {
  pub token_label: String,
  #[serde(default)]
  pub pin: String,
  /// PEM-encoded public key matching the token-held private key
  pub public_key: String,
}

impl KeyDescriptor {
  /// The enumerated tag the factory dispatches on
  pub fn kind(&self) -> DescriptorKind {
    match self {
      Self::PemKeyFile(_) => DescriptorKind::PemKeyFile,
      Self::PrivateKeyDer(_) => DescriptorKind::PrivateKeyDer,
      Self::Pkcs11Config(_) => DescriptorKind::Pkcs11Config,
    }
  }
}

/* -------------------------------- */
/// Kind tag of a [`KeyDescriptor`], used as the loader-registry key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
  PemKeyFile,
  PrivateKeyDer,
  Pkcs11Config,
}

impl DescriptorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      DescriptorKind::PemKeyFile => "pem_key_file",
      DescriptorKind::PrivateKeyDer => "private_key",
      DescriptorKind::Pkcs11Config => "pkcs11_config",
    }
  }
}

impl std::fmt::Display for DescriptorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
