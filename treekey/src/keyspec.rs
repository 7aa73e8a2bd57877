use crate::{
  crypto::Signer,
  error::{KeyError, KeyResult},
  trace::*,
};
use ecdsa::elliptic_curve::SecretKey as EcSecretKey;
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};

/// Size of an RSA key generated by this crate, in bits, if not overridden
pub const DEFAULT_RSA_KEY_BITS: i32 = 2048;

/// Smallest RSA key this crate will generate
pub const MIN_RSA_KEY_BITS: i32 = 2048;

/* -------------------------------- */
/// Declarative description of key parameters used to generate a new signing key.
///
/// Wire shape: `{"ecdsa_params":{"curve":"P384"}}` or `{"rsa_params":{"bits":3072}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
  #[serde(flatten, skip_serializing_if = "Option::is_none")]
  pub params: Option<KeySpecParams>,
}

/// Parameter family of a [`KeySpec`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySpecParams {
  EcdsaParams(EcdsaParams),
  RsaParams(RsaParams),
}

/// ECDSA key parameters
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaParams {
  #[serde(default)]
  pub curve: EcdsaCurve,
}

/// RSA key parameters. Zero bits selects [`DEFAULT_RSA_KEY_BITS`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaParams {
  #[serde(default)]
  pub bits: i32,
}

/// Supported ECDSA curves. Unknown curve names are rejected when the
/// specification is deserialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EcdsaCurve {
  #[default]
  Default,
  P256,
  P384,
  P521,
}

impl KeySpec {
  /// Specification for an ECDSA key on the given curve
  pub fn ecdsa(curve: EcdsaCurve) -> Self {
    Self {
      params: Some(KeySpecParams::EcdsaParams(EcdsaParams { curve })),
    }
  }

  /// Specification for an RSA key with the given modulus size
  pub fn rsa(bits: i32) -> Self {
    Self {
      params: Some(KeySpecParams::RsaParams(RsaParams { bits })),
    }
  }
}

/* -------------------------------- */
/// Generate a fresh private key according to `spec`.
///
/// RSA keys default to [`DEFAULT_RSA_KEY_BITS`] when the requested size is zero;
/// any size below [`MIN_RSA_KEY_BITS`], including negative sizes, is rejected
/// before key generation is attempted.
pub fn generate(spec: &KeySpec) -> KeyResult<Signer> {
  match &spec.params {
    Some(KeySpecParams::EcdsaParams(params)) => {
      debug!("Generating ECDSA key on curve {:?}", params.curve);
      match params.curve {
        EcdsaCurve::Default | EcdsaCurve::P256 => Ok(Signer::EcdsaP256(EcSecretKey::<NistP256>::random(&mut OsRng))),
        EcdsaCurve::P384 => Ok(Signer::EcdsaP384(EcSecretKey::<NistP384>::random(&mut OsRng))),
        EcdsaCurve::P521 => Ok(Signer::EcdsaP521(EcSecretKey::<NistP521>::random(&mut OsRng))),
      }
    }
    Some(KeySpecParams::RsaParams(params)) => {
      let mut bits = params.bits;
      if bits == 0 {
        bits = DEFAULT_RSA_KEY_BITS;
      }
      if bits < MIN_RSA_KEY_BITS {
        return Err(KeyError::RsaKeySize {
          min: MIN_RSA_KEY_BITS,
          got: bits,
        });
      }
      debug!("Generating {bits}-bit RSA key");
      let sk = RsaPrivateKey::new(&mut OsRng, bits as usize).map_err(|e| KeyError::GenerateKey(e.to_string()))?;
      Ok(Signer::Rsa(sk))
    }
    None => Err(KeyError::UnsupportedParams),
  }
}
