//! ---
//! wusim_section: "01-core-functionality"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Opaque high-entropy payloads standing in for model data."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use rand::prelude::*;

/// Random bytes per payload; hex encoding doubles this to 8000 characters.
pub const PAYLOAD_BYTES: usize = 4000;

/// Length in bytes of one payload line as written to disk, newline included.
pub const PAYLOAD_LINE_LEN: usize = PAYLOAD_BYTES * 2 + 1;

/// Source of opaque payload lines.
#[derive(Debug)]
pub struct PayloadSource {
    rng: StdRng,
}

impl PayloadSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic payloads, for reproducible fixtures and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// One hex-encoded payload line terminated by `\n`.
    pub fn hex_line(&mut self) -> String {
        let mut bytes = vec![0u8; PAYLOAD_BYTES];
        self.rng.fill_bytes(&mut bytes);
        let mut line = hex::encode(bytes);
        line.push('\n');
        line
    }
}

impl Default for PayloadSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
