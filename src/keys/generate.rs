use rand::rngs::OsRng;
use ssh_key::private::{KeypairData, RsaKeypair};
use ssh_key::{LineEnding, PrivateKey};

pub struct KeyMaterial {
    pub private_openssh: String,
    pub public_line: String,
}

// Generates an RSA key pair in OpenSSH form with the comment set to the
// account email.
pub fn generate_key_material(comment: &str, bits: usize) -> Result<KeyMaterial, String> {
    let keypair = RsaKeypair::random(&mut OsRng, bits)
        .map_err(|e| format!("unable to generate an RSA key pair: {}", e))?;
    let private_key = PrivateKey::new(KeypairData::from(keypair), comment)
        .map_err(|e| format!("unable to assemble the key pair: {}", e))?;

    let private_openssh = private_key
        .to_openssh(LineEnding::LF)
        .map_err(|e| format!("unable to encode the private key: {}", e))?
        .to_string();
    let public_line = private_key.public_key().to_string();

    Ok(KeyMaterial {
        private_openssh,
        public_line,
    })
}
