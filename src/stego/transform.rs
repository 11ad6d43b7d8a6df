// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Reversible payload transforms and their fixed ordering.
//!
//! A payload may be compressed, encrypted, both or neither. The order is
//! fixed: compress before encrypt on hide, decrypt before decompress on
//! extract. [`TransformChain`] records which transforms are active, maps
//! one-to-one onto the header flags byte, and is the only place that knows
//! the order.

use crate::stego::compress;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::progress::{Reporter, Stage};

/// A single reversible payload transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Compress,
    Encrypt,
}

impl Transform {
    /// Header flag bit recording this transform.
    pub const fn flag(self) -> u8 {
        match self {
            Self::Compress => 0b01,
            Self::Encrypt => 0b10,
        }
    }

    fn forward_stage(self) -> (Stage, f32) {
        match self {
            Self::Compress => (Stage::Compressing, 0.2),
            Self::Encrypt => (Stage::Encrypting, 0.3),
        }
    }

    fn inverse_stage(self) -> (Stage, f32) {
        match self {
            Self::Encrypt => (Stage::Decrypting, 0.8),
            Self::Compress => (Stage::Decompressing, 0.9),
        }
    }
}

/// Order in which transforms are applied on hide. Extraction walks it backwards.
pub const TRANSFORM_ORDER: [Transform; 2] = [Transform::Compress, Transform::Encrypt];

/// Mask of all defined flag bits; the rest are reserved and must be zero.
pub const KNOWN_FLAGS: u8 = Transform::Compress.flag() | Transform::Encrypt.flag();

/// The set of transforms applied to one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformChain {
    flags: u8,
}

impl TransformChain {
    /// Chain for the given hide options. An empty password means no encryption.
    pub fn new(compress: bool, password: Option<&str>) -> Self {
        let mut flags = 0;
        if compress {
            flags |= Transform::Compress.flag();
        }
        if password.is_some_and(|p| !p.is_empty()) {
            flags |= Transform::Encrypt.flag();
        }
        Self { flags }
    }

    /// Rebuild a chain from a header flags byte.
    ///
    /// Returns [`StegoError::ReservedFlags`] if any undefined bit is set.
    pub fn from_flags(flags: u8) -> Result<Self, StegoError> {
        if flags & !KNOWN_FLAGS != 0 {
            return Err(StegoError::ReservedFlags(flags));
        }
        Ok(Self { flags })
    }

    pub fn flags(self) -> u8 {
        self.flags
    }

    pub fn contains(self, t: Transform) -> bool {
        self.flags & t.flag() != 0
    }

    pub fn is_compressed(self) -> bool {
        self.contains(Transform::Compress)
    }

    pub fn is_encrypted(self) -> bool {
        self.contains(Transform::Encrypt)
    }

    /// Active transforms in hide order.
    pub fn steps(self) -> impl DoubleEndedIterator<Item = Transform> {
        TRANSFORM_ORDER.into_iter().filter(move |&t| self.contains(t))
    }

    /// Apply the chain to raw secret bytes (hide direction).
    pub fn apply(
        self,
        mut data: Vec<u8>,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<Vec<u8>, StegoError> {
        for step in self.steps() {
            let (stage, at) = step.forward_stage();
            reporter.report(stage, at);
            data = match step {
                Transform::Compress => compress::compress(&data),
                Transform::Encrypt => {
                    let pw = password.filter(|p| !p.is_empty()).ok_or(StegoError::PasswordRequired)?;
                    crypto::encrypt(&data, pw)?
                }
            };
            log::debug!("{step:?}: payload now {} bytes", data.len());
        }
        Ok(data)
    }

    /// Undo the chain (extract direction).
    ///
    /// `original_size` bounds decompressed output. The result may still carry
    /// trailing carrier noise when no transform delimits the payload; the
    /// caller truncates.
    pub fn invert(
        self,
        mut data: Vec<u8>,
        password: Option<&str>,
        original_size: usize,
        reporter: &mut Reporter<'_>,
    ) -> Result<Vec<u8>, StegoError> {
        for step in self.steps().rev() {
            let (stage, at) = step.inverse_stage();
            reporter.report(stage, at);
            data = match step {
                Transform::Encrypt => {
                    let pw = password.filter(|p| !p.is_empty()).ok_or(StegoError::PasswordRequired)?;
                    crypto::decrypt(&data, pw)?
                }
                Transform::Compress => compress::decompress(&data, original_size)?,
            };
            log::debug!("undo {step:?}: payload now {} bytes", data.len());
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_mapping() {
        assert_eq!(TransformChain::new(false, None).flags(), 0);
        assert_eq!(TransformChain::new(true, None).flags(), 1);
        assert_eq!(TransformChain::new(false, Some("pw")).flags(), 2);
        assert_eq!(TransformChain::new(true, Some("pw")).flags(), 3);
    }

    #[test]
    fn empty_password_means_no_encryption() {
        assert!(!TransformChain::new(false, Some("")).is_encrypted());
    }

    #[test]
    fn steps_follow_fixed_order() {
        let chain = TransformChain::new(true, Some("pw"));
        let fwd: Vec<_> = chain.steps().collect();
        assert_eq!(fwd, vec![Transform::Compress, Transform::Encrypt]);
        let back: Vec<_> = chain.steps().rev().collect();
        assert_eq!(back, vec![Transform::Encrypt, Transform::Compress]);
    }

    #[test]
    fn reserved_bits_rejected() {
        assert!(TransformChain::from_flags(3).is_ok());
        assert!(matches!(TransformChain::from_flags(4), Err(StegoError::ReservedFlags(4))));
        assert!(matches!(TransformChain::from_flags(0xFF), Err(StegoError::ReservedFlags(0xFF))));
    }

    #[test]
    fn apply_invert_roundtrip_all_chains() {
        let secret = b"round and round ".repeat(20);
        for (compress, password) in [(false, None), (true, None), (false, Some("pw")), (true, Some("pw"))] {
            let chain = TransformChain::new(compress, password);
            let mut r = Reporter::silent();
            let mut payload = chain.apply(secret.clone(), password, &mut r).unwrap();
            payload.extend_from_slice(&[0x5A; 19]); // carrier noise
            let mut r = Reporter::silent();
            let mut out = chain.invert(payload, password, secret.len(), &mut r).unwrap();
            out.truncate(secret.len());
            assert_eq!(out, secret, "chain flags {}", chain.flags());
        }
    }

    #[test]
    fn invert_without_password_fails() {
        let chain = TransformChain::new(false, Some("pw"));
        let mut r = Reporter::silent();
        let payload = chain.apply(b"x".to_vec(), Some("pw"), &mut r).unwrap();
        assert!(matches!(
            chain.invert(payload, None, 1, &mut r),
            Err(StegoError::PasswordRequired)
        ));
    }
}
