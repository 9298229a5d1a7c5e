//! Writes the reference circuit's keys, witness blobs and a verified proof bundle to disk.
//!
//! Timings live in the criterion benches of `groth16-backend`.

mod circuit;
mod config;
mod errors;
mod keys;

use crate::config::BenchConfig;
use crate::errors::BenchError;
use groth16_backend::groth16::{prove, verify};
use groth16_backend::types::ProofBundle;
use groth16_backend::{codec, witness};
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), BenchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let cfg = BenchConfig::from_env()?;
    if let Some(threads) = cfg.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| BenchError::Config(format!("{e}")))?;
    }
    std::fs::create_dir_all(&cfg.data_dir)?;

    info!(constraints = cfg.constraints, threads = ?cfg.threads, "building reference circuit");
    let r1cs = circuit::reference_r1cs(cfg.constraints)?;
    let solution = circuit::reference_witness(cfg.constraints, 2);

    let (pk, vk) = keys::ensure_keys(&cfg.data_dir, &r1cs)?;

    // Witness blobs, in the binary format other tools consume.
    let mut full = Vec::new();
    codec::write_full(&mut full, &solution)?;
    std::fs::write(cfg.data_dir.join("witness_full.bin"), &full)?;
    let mut public = Vec::new();
    codec::write_public(&mut public, &solution)?;
    std::fs::write(cfg.data_dir.join("witness_public.bin"), &public)?;

    let proof = prove(&r1cs, &pk, &solution, &mut OsRng)?;

    let public = codec::read_public(&public)?;
    let ok = verify(&proof, &vk, &public)?;
    // Fail closed if the proof doesn't verify.
    if !ok {
        return Err(BenchError::VerificationFailed);
    }

    let bundle = ProofBundle::new(&proof, &witness::public(&solution)?)?;
    std::fs::write(
        cfg.data_dir.join("proof.json"),
        serde_json::to_vec_pretty(&bundle)?,
    )?;

    info!(path = %cfg.data_dir.display(), "reference artifacts written");

    Ok(())
}
