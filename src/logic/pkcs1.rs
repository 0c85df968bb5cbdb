//! PKCS #1 v1.5 block formatting for raw RSA operations
//!
//! PIV cards perform the bare RSA private-key operation, so the host builds
//! the signature block (EMSA-PKCS1-v1_5) and strips the encryption padding
//! (EME-PKCS1-v1_5) itself.

use thiserror::Error;

use crate::model::HashKind;

const SHA1_DIGEST_INFO: &[u8] = &[
    0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
];

const SHA256_DIGEST_INFO: &[u8] = &[
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

/// Minimum number of padding bytes in a block
const MIN_PADDING: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Pkcs1Error {
    #[error("message of {len} bytes does not fit a {block_len} byte block")]
    MessageTooLong { len: usize, block_len: usize },

    #[error("{0:?} input has no DigestInfo")]
    NoDigestInfo(HashKind),

    #[error("digest of {actual} bytes, expected {expected}")]
    DigestLength { expected: usize, actual: usize },

    #[error("invalid encryption padding")]
    InvalidPadding,
}

/// DER-encoded DigestInfo wrapping `digest`
pub fn digest_info(hash: HashKind, digest: &[u8]) -> Result<Vec<u8>, Pkcs1Error> {
    let prefix = match hash {
        HashKind::Sha1 => SHA1_DIGEST_INFO,
        HashKind::Sha256 => SHA256_DIGEST_INFO,
        HashKind::Raw => return Err(Pkcs1Error::NoDigestInfo(hash)),
    };
    let expected = hash.digest_len().unwrap_or_default();
    if digest.len() != expected {
        return Err(Pkcs1Error::DigestLength {
            expected,
            actual: digest.len(),
        });
    }

    let mut info = Vec::with_capacity(prefix.len() + digest.len());
    info.extend_from_slice(prefix);
    info.extend_from_slice(digest);
    Ok(info)
}

/// Signature block `00 01 FF..FF 00 payload` of `block_len` bytes
pub fn pad_signature(payload: &[u8], block_len: usize) -> Result<Vec<u8>, Pkcs1Error> {
    if payload.len() + 3 + MIN_PADDING > block_len {
        return Err(Pkcs1Error::MessageTooLong {
            len: payload.len(),
            block_len,
        });
    }

    let mut block = Vec::with_capacity(block_len);
    block.extend_from_slice(&[0x00, 0x01]);
    block.resize(block_len - payload.len() - 1, 0xff);
    block.push(0x00);
    block.extend_from_slice(payload);
    Ok(block)
}

/// Message carried by an encryption block `00 02 PS 00 message`
pub fn unpad_encryption(block: &[u8]) -> Result<Vec<u8>, Pkcs1Error> {
    if block.len() < 3 + MIN_PADDING || block[0] != 0x00 || block[1] != 0x02 {
        return Err(Pkcs1Error::InvalidPadding);
    }

    let separator = block[2..]
        .iter()
        .position(|b| *b == 0x00)
        .map(|pos| pos + 2)
        .ok_or(Pkcs1Error::InvalidPadding)?;

    if separator < 2 + MIN_PADDING {
        return Err(Pkcs1Error::InvalidPadding);
    }

    Ok(block[separator + 1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_info_sha1() {
        let info = digest_info(HashKind::Sha1, &[0xab; 20]).unwrap();
        assert_eq!(info.len(), 35);
        assert_eq!(&info[..15], SHA1_DIGEST_INFO);
        assert_eq!(&info[15..], &[0xab; 20]);
    }

    #[test]
    fn test_digest_info_rejects_wrong_length() {
        assert_eq!(
            digest_info(HashKind::Sha256, &[0u8; 20]).unwrap_err(),
            Pkcs1Error::DigestLength {
                expected: 32,
                actual: 20
            }
        );
        assert!(digest_info(HashKind::Raw, &[0u8; 32]).is_err());
    }

    #[test]
    fn test_pad_signature_layout() {
        let block = pad_signature(&[0x11, 0x22], 16).unwrap();
        assert_eq!(block.len(), 16);
        assert_eq!(&block[..2], &[0x00, 0x01]);
        assert!(block[2..13].iter().all(|b| *b == 0xff));
        assert_eq!(block[13], 0x00);
        assert_eq!(&block[14..], &[0x11, 0x22]);
    }

    #[test]
    fn test_pad_signature_too_long() {
        assert!(pad_signature(&[0u8; 6], 16).is_err());
        assert!(pad_signature(&[0u8; 5], 16).is_ok());
    }

    #[test]
    fn test_unpad_encryption() {
        let mut block = vec![0x00, 0x02];
        block.extend_from_slice(&[0x42; 9]);
        block.push(0x00);
        block.extend_from_slice(b"session key");

        assert_eq!(unpad_encryption(&block).unwrap(), b"session key");
    }

    #[test]
    fn test_unpad_encryption_empty_message() {
        let mut block = vec![0x00, 0x02];
        block.extend_from_slice(&[0x42; 8]);
        block.push(0x00);

        assert_eq!(unpad_encryption(&block).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_unpad_encryption_rejects_malformed() {
        // wrong block type
        let mut block = vec![0x00, 0x01];
        block.extend_from_slice(&[0x42; 9]);
        block.push(0x00);
        assert_eq!(unpad_encryption(&block), Err(Pkcs1Error::InvalidPadding));

        // padding too short
        let block = [0x00, 0x02, 0x42, 0x42, 0x00, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67];
        assert_eq!(unpad_encryption(&block), Err(Pkcs1Error::InvalidPadding));

        // no separator
        let block = [0x42u8; 16];
        assert_eq!(unpad_encryption(&block), Err(Pkcs1Error::InvalidPadding));
    }
}
