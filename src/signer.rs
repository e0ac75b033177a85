//! Signing envelopes and transaction identifiers
//!
//! The signer is a pure transformation: it never mutates or re-derives the
//! canonical bytes it is handed. The detached signature covers the
//! domain-prefixed canonical bytes, the same preimage the transaction
//! identifier hashes, so identical logical transactions yield identical
//! identifiers regardless of who signs them or how often.

use crate::address::Address;
use crate::canonical::{encode_compact_u16, FieldMap};
use crate::error::{Result, TxForgeError};
use crate::transaction::Transaction;
use ed25519_dalek::{Signature, Signer as _, SigningKey, VerifyingKey};
use sha2::{Digest, Sha512_256};

/// Domain-separation prefix for signing and identifier hashing.
pub const DOMAIN_PREFIX: &[u8] = b"TX";

pub const SIGNATURE_LEN: usize = 64;
pub const PUBLIC_KEY_LEN: usize = 32;

/// Detached signing capability. Implementations may hold local key material
/// or front a remote signer; either way the call blocks until a signature
/// is produced, and callers wanting a deadline wrap it themselves.
pub trait TransactionSigner {
    fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]>;
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN];
}

/// Local ed25519 key material.
pub struct KeypairSigner {
    signing_key: SigningKey,
}

impl KeypairSigner {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// The address controlled by this key.
    pub fn address(&self) -> Address {
        Address::new(self.signing_key.verifying_key().to_bytes())
    }
}

impl TransactionSigner for KeypairSigner {
    fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        Ok(self.signing_key.sign(message).to_bytes())
    }

    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }
}

/// Verify a detached signature over canonical transaction bytes.
pub fn verify(
    public_key: &[u8; PUBLIC_KEY_LEN],
    canonical_bytes: &[u8],
    signature: &[u8; SIGNATURE_LEN],
) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let signature = Signature::from_bytes(signature);
    key.verify_strict(&domain_message(canonical_bytes), &signature)
        .is_ok()
}

/// A partially or fully collected multi-signature: an ordered key set with a
/// threshold, where each slot may or may not have signed yet. Threshold
/// evaluation is the network's job; this is carrier metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigSignature {
    pub version: u8,
    pub threshold: u8,
    pub subsignatures: Vec<Subsignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsignature {
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub signature: Option<[u8; SIGNATURE_LEN]>,
}

impl MultisigSignature {
    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.version, self.threshold];
        let count: u16 = self.subsignatures.len().try_into().map_err(|_| {
            TxForgeError::Encoding("too many multisig subsignatures".to_string())
        })?;
        encode_compact_u16(count, &mut out)?;
        for sub in &self.subsignatures {
            out.extend_from_slice(&sub.public_key);
            match &sub.signature {
                Some(signature) => {
                    out.push(1);
                    out.extend_from_slice(signature);
                }
                None => out.push(0),
            }
        }
        Ok(out)
    }
}

/// A stateless program standing in for a signature, with its invocation
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicSignature {
    pub program: Vec<u8>,
    pub args: Vec<Vec<u8>>,
}

impl LogicSignature {
    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let program_len: u16 = self.program.len().try_into().map_err(|_| {
            TxForgeError::Encoding("logic program exceeds encodable length".to_string())
        })?;
        encode_compact_u16(program_len, &mut out)?;
        out.extend_from_slice(&self.program);
        let arg_count: u16 = self.args.len().try_into().map_err(|_| {
            TxForgeError::Encoding("too many logic signature arguments".to_string())
        })?;
        encode_compact_u16(arg_count, &mut out)?;
        for arg in &self.args {
            let arg_len: u16 = arg.len().try_into().map_err(|_| {
                TxForgeError::Encoding("logic argument exceeds encodable length".to_string())
            })?;
            encode_compact_u16(arg_len, &mut out)?;
            out.extend_from_slice(arg);
        }
        Ok(out)
    }
}

/// Exactly one signing mode per envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureMode {
    Single([u8; SIGNATURE_LEN]),
    Multisig(MultisigSignature),
    Logic(LogicSignature),
}

/// A signed envelope: the untouched canonical bytes plus one signature mode.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    transaction: Transaction,
    canonical_bytes: Vec<u8>,
    signature: SignatureMode,
}

impl SignedTransaction {
    /// Sign with a single key.
    pub fn sign(transaction: Transaction, signer: &dyn TransactionSigner) -> Result<Self> {
        let canonical_bytes = transaction.canonical_bytes()?;
        let signature = signer.sign(&domain_message(&canonical_bytes))?;
        Ok(Self {
            transaction,
            canonical_bytes,
            signature: SignatureMode::Single(signature),
        })
    }

    /// Attach an externally assembled multi-signature.
    pub fn with_multisig(transaction: Transaction, multisig: MultisigSignature) -> Result<Self> {
        let canonical_bytes = transaction.canonical_bytes()?;
        Ok(Self {
            transaction,
            canonical_bytes,
            signature: SignatureMode::Multisig(multisig),
        })
    }

    /// Attach a logic signature.
    pub fn with_logic(transaction: Transaction, logic: LogicSignature) -> Result<Self> {
        let canonical_bytes = transaction.canonical_bytes()?;
        Ok(Self {
            transaction,
            canonical_bytes,
            signature: SignatureMode::Logic(logic),
        })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn canonical_bytes(&self) -> &[u8] {
        &self.canonical_bytes
    }

    pub fn signature(&self) -> &SignatureMode {
        &self.signature
    }

    /// Identifier of the underlying transaction. Hashes the canonical bytes,
    /// never the envelope, so re-signing cannot change it.
    pub fn id(&self) -> String {
        transaction_id(&self.canonical_bytes)
    }

    /// Wire form submitted to the network: a canonical field map carrying the
    /// signature under its mode key and the untouched transaction bytes
    /// under `txn`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut map = FieldMap::new();
        match &self.signature {
            SignatureMode::Single(signature) => map.put_bytes("sig", signature)?,
            SignatureMode::Multisig(multisig) => map.put_bytes("msig", &multisig.encode()?)?,
            SignatureMode::Logic(logic) => map.put_bytes("lsig", &logic.encode()?)?,
        }
        map.put_bytes("txn", &self.canonical_bytes)?;
        map.encode()
    }
}

/// Identifier for already-canonical transaction bytes.
pub fn transaction_id(canonical_bytes: &[u8]) -> String {
    let digest = Sha512_256::digest(domain_message(canonical_bytes));
    bs58::encode(digest).into_string()
}

fn domain_message(canonical_bytes: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(DOMAIN_PREFIX.len() + canonical_bytes.len());
    message.extend_from_slice(DOMAIN_PREFIX);
    message.extend_from_slice(canonical_bytes);
    message
}
