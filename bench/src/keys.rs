use crate::errors::BenchError;
use groth16_backend::R1cs;
use groth16_backend::groth16::{
    deserialize_pk, deserialize_vk, serialize_pk, serialize_vk, setup, ProvingKey, VerifyingKey,
};
use rand::rngs::OsRng;
use std::path::Path;
use tracing::{info, warn};

/// Load the key pair for `r1cs` from `data_dir/keys`, running the setup on first use.
///
/// Cached keys whose digest does not match `r1cs` are regenerated.
pub fn ensure_keys(data_dir: &Path, r1cs: &R1cs) -> Result<(ProvingKey, VerifyingKey), BenchError> {
    let keys_dir = data_dir.join("keys");
    std::fs::create_dir_all(&keys_dir)?;

    let pk_path = keys_dir.join("groth16_pk.bin");
    let vk_path = keys_dir.join("groth16_vk.bin");

    if pk_path.exists() && vk_path.exists() {
        let pk = deserialize_pk(&std::fs::read(&pk_path)?)?;
        let vk = deserialize_vk(&std::fs::read(&vk_path)?)?;
        if pk.check(r1cs).is_ok() && vk.r1cs_digest == r1cs.digest() {
            info!(path = %keys_dir.display(), "loaded cached keys");
            return Ok((pk, vk));
        }
        warn!("cached keys belong to a different circuit, regenerating");
    }

    // Trusted setup randomness (prototype).
    //
    // IMPORTANT: In production, use an MPC setup.
    let (pk, vk) = setup(r1cs, &mut OsRng)?;

    std::fs::write(&pk_path, serialize_pk(&pk)?)?;
    std::fs::write(&vk_path, serialize_vk(&vk)?)?;

    Ok((pk, vk))
}
