use crate::error::{Pkcs11KeyError, Pkcs11KeyResult};
use cryptoki::context::{Pkcs11, Pkcs11Flags};
use cryptoki::mechanism::Mechanism;
use cryptoki::object::{Attribute, ObjectClass, ObjectHandle};
use cryptoki::session::{Session, SessionFlags, UserType};
use cryptoki::types::slot::Slot;
use sha2::{Digest, Sha256, Sha384, Sha512};
use tracing::debug;
use treekey::prelude::{AlgorithmName, KeyError, KeyResult, Pkcs11Config, PublicKey, SigningKey, VerifyingKey};

/// Signer backed by a private key held on a PKCS#11 token.
///
/// Holds a reference to the token, never the key material. Sessions are opened
/// per operation; the module owns all hardware state.
pub struct Pkcs11Signer {
  context: Pkcs11,
  slot: Slot,
  pin: Option<String>,
  token_label: String,
  public_key: PublicKey,
}

impl std::fmt::Debug for Pkcs11Signer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pkcs11Signer")
      .field("token_label", &self.token_label)
      .finish_non_exhaustive()
  }
}

impl Pkcs11Signer {
  /// Bind to the token named by `config` through the module at `module_path`.
  /// The private key object is probed once so misconfiguration surfaces at
  /// load time rather than on the first signature.
  pub fn from_config(module_path: &str, config: &Pkcs11Config) -> Pkcs11KeyResult<Self> {
    if module_path.is_empty() {
      return Err(Pkcs11KeyError::MissingModulePath);
    }
    let public_key = treekey::pem::read_public_key(&config.public_key)?;

    let context = Pkcs11::new(module_path).map_err(|e| Pkcs11KeyError::Module(e.to_string()))?;
    context
      .initialize(Pkcs11Flags::empty())
      .map_err(|e| Pkcs11KeyError::Module(e.to_string()))?;

    let slots = context
      .get_slots_with_token()
      .map_err(|e| Pkcs11KeyError::Module(e.to_string()))?;
    let slot = slots
      .into_iter()
      .find(|slot| {
        context
          .get_token_info(*slot)
          .map(|info| info.label().trim() == config.token_label)
          .unwrap_or(false)
      })
      .ok_or_else(|| Pkcs11KeyError::KeyNotFound(format!("no token labelled {:?}", config.token_label)))?;
    debug!("Using PKCS#11 token {:?} in slot {slot:?}", config.token_label);

    let signer = Self {
      context,
      slot,
      pin: (!config.pin.is_empty()).then(|| config.pin.clone()),
      token_label: config.token_label.clone(),
      public_key,
    };
    let session = signer.open_session()?;
    signer.find_private_key(&session)?;
    Ok(signer)
  }

  fn open_session(&self) -> Pkcs11KeyResult<Session> {
    let flags = SessionFlags::SERIAL_SESSION;
    let session = self
      .context
      .open_session_no_callback(self.slot, flags)
      .map_err(|e| Pkcs11KeyError::Module(e.to_string()))?;
    if let Some(pin) = &self.pin {
      session
        .login(UserType::User, Some(pin))
        .map_err(|e| Pkcs11KeyError::Module(e.to_string()))?;
    }
    Ok(session)
  }

  fn find_private_key(&self, session: &Session) -> Pkcs11KeyResult<ObjectHandle> {
    let template = vec![
      Attribute::Class(ObjectClass::PRIVATE_KEY),
      Attribute::Label(self.token_label.as_bytes().to_vec()),
    ];
    let mut objects = session
      .find_objects(&template)
      .map_err(|e| Pkcs11KeyError::Module(e.to_string()))?;
    objects
      .pop()
      .ok_or_else(|| Pkcs11KeyError::KeyNotFound(format!("no private key labelled {:?}", self.token_label)))
  }

  fn sign_inner(&self, data: &[u8]) -> Pkcs11KeyResult<Vec<u8>> {
    let session = self.open_session()?;
    let key = self.find_private_key(&session)?;

    // ECDSA mechanisms take the digest; the RSA mechanism hashes internally
    let (mechanism, payload) = match self.public_key.alg() {
      AlgorithmName::EcdsaP256Sha256 => (Mechanism::Ecdsa, Sha256::digest(data).to_vec()),
      AlgorithmName::EcdsaP384Sha384 => (Mechanism::Ecdsa, Sha384::digest(data).to_vec()),
      AlgorithmName::EcdsaP521Sha512 => (Mechanism::Ecdsa, Sha512::digest(data).to_vec()),
      AlgorithmName::RsaPkcs1Sha256 => (Mechanism::Sha256RsaPkcs, data.to_vec()),
    };

    session
      .sign(&mechanism, key, &payload)
      .map_err(|e| Pkcs11KeyError::Sign(e.to_string()))
  }
}

impl SigningKey for Pkcs11Signer {
  fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
    self.sign_inner(data).map_err(|e| KeyError::Pkcs11(e.to_string()))
  }

  fn public_key(&self) -> PublicKey {
    self.public_key.clone()
  }

  fn key_id(&self) -> String {
    self.public_key.key_id()
  }

  fn alg(&self) -> AlgorithmName {
    self.public_key.alg()
  }
}
