mod asymmetric;

use crate::error::{KeyError, KeyResult};

pub use asymmetric::{PublicKey, Signer};

#[derive(Debug, PartialEq, Eq)]
/// Algorithm names
pub enum AlgorithmName {
  EcdsaP256Sha256,
  EcdsaP384Sha384,
  EcdsaP521Sha512,
  RsaPkcs1Sha256,
}

impl AlgorithmName {
  pub fn as_str(&self) -> &'static str {
    match self {
      AlgorithmName::EcdsaP256Sha256 => "ecdsa-p256-sha256",
      AlgorithmName::EcdsaP384Sha384 => "ecdsa-p384-sha384",
      AlgorithmName::EcdsaP521Sha512 => "ecdsa-p521-sha512",
      AlgorithmName::RsaPkcs1Sha256 => "rsa-pkcs1-sha256",
    }
  }
}

impl std::fmt::Display for AlgorithmName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl core::str::FromStr for AlgorithmName {
  type Err = KeyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ecdsa-p256-sha256" => Ok(Self::EcdsaP256Sha256),
      "ecdsa-p384-sha384" => Ok(Self::EcdsaP384Sha384),
      "ecdsa-p521-sha512" => Ok(Self::EcdsaP521Sha512),
      "rsa-pkcs1-sha256" => Ok(Self::RsaPkcs1Sha256),
      _ => Err(KeyError::ParseSignature(format!("unknown algorithm name: {s}"))),
    }
  }
}

/// SigningKey trait, the capability handed out by loaders and the generator.
/// The message is hashed internally with the digest matching the key's algorithm.
pub trait SigningKey: std::fmt::Debug {
  fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>>;
  fn public_key(&self) -> PublicKey;
  fn key_id(&self) -> String;
  fn alg(&self) -> AlgorithmName;
}

/// VerifyingKey trait
pub trait VerifyingKey {
  fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()>;
  fn key_id(&self) -> String;
  fn alg(&self) -> AlgorithmName;
}
