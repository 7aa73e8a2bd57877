//! Create or load the signing key for a new log tree.
//!
//! Accepts either a key specification (a new key is generated) or a key
//! descriptor (an existing key is loaded) as a JSON argument:
//!
//! ```sh
//! cargo run --example createtree -- '{"ecdsa_params":{"curve":"P384"}}'
//! cargo run --example createtree -- '{"pem_key_file":{"path":"testdata/log-server.privkey.pem","password":"towel"}}'
//! ```

use treekey::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let arg = std::env::args()
    .nth(1)
    .unwrap_or_else(|| r#"{"ecdsa_params":{"curve":"DEFAULT"}}"#.to_string());

  let factory = SignerFactory::with_default_loaders();

  let descriptor = match serde_json::from_str::<KeySpec>(&arg) {
    Ok(spec) if spec.params.is_some() => factory.generate(&spec)?,
    _ => serde_json::from_str::<KeyDescriptor>(&arg)?,
  };

  let signer = factory.new_signer(&descriptor)?;
  println!("algorithm: {}", signer.alg());
  println!("key id:    {}", signer.key_id());
  print!("{}", signer.public_key().to_pem()?);
  Ok(())
}
