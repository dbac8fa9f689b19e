//! Framed authenticated stream sessions.
//!
//! An encrypt session mints a random 24-byte header, derives a per-session
//! subkey from (stream key, header) via HKDF-SHA256, and then seals one AEAD
//! envelope per chunk. The envelope holds a 1-byte CONTINUE/FINAL marker
//! followed by the payload, so on disk every chunk is `payload_len + 17`
//! bytes. The chunk counter feeds the nonce, which makes reordering, replay,
//! and cross-session transplants fail authentication.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{AuthError, HeaderError, StreamError};
use crate::kdf::StreamKey;
use crate::{CHUNK_OVERHEAD, CHUNK_SIZE, HEADER_SIZE, KEY_SIZE, STREAM_AAD};

/// Domain label mixed into the per-session subkey derivation.
const SUBKEY_INFO: &[u8] = b"filecrypt-stream-subkey";

/// Bytes of the header used as the fixed nonce prefix.
const NONCE_PREFIX_LEN: usize = 16;

/// Per-session public value written to disk after the salt.
///
/// Not secret, but a decrypt session initialized with a different header (or
/// a different key) fails authentication on the first chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader([u8; HEADER_SIZE]);

impl StreamHeader {
    fn generate() -> Self {
        let mut bytes = [0u8; HEADER_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for StreamHeader {
    type Error = HeaderError;

    fn try_from(bytes: &[u8]) -> Result<Self, HeaderError> {
        let bytes: [u8; HEADER_SIZE] = bytes.try_into().map_err(|_| HeaderError::Corrupt)?;
        Ok(Self(bytes))
    }
}

/// Per-chunk stream marker, sealed inside the AEAD envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTag {
    /// More chunks follow.
    Continue,
    /// Last chunk of the stream.
    Final,
}

impl ChunkTag {
    fn as_byte(self) -> u8 {
        match self {
            ChunkTag::Continue => 0x00,
            ChunkTag::Final => 0x01,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(ChunkTag::Continue),
            0x01 => Some(ChunkTag::Final),
            _ => None,
        }
    }
}

/// HKDF-SHA256(stream key, domain label || header) → session cipher.
fn session_cipher(key: &StreamKey, header: &StreamHeader) -> XChaCha20Poly1305 {
    let hkdf = Hkdf::<Sha256>::new(None, key.as_bytes());
    let mut subkey = [0u8; KEY_SIZE];
    hkdf.expand_multi_info(&[SUBKEY_INFO, header.as_bytes()], &mut subkey)
        .expect("32 bytes is a valid length for HKDF");
    let cipher = XChaCha20Poly1305::new((&subkey).into());
    subkey.zeroize();
    cipher
}

/// Nonce = first 16 header bytes || 64-bit LE chunk counter. The subkey is
/// unique per session, so the counter alone separates chunks.
fn chunk_nonce(prefix: &[u8; NONCE_PREFIX_LEN], counter: u64) -> XNonce {
    let mut nonce = [0u8; 24];
    nonce[..NONCE_PREFIX_LEN].copy_from_slice(prefix);
    nonce[NONCE_PREFIX_LEN..].copy_from_slice(&counter.to_le_bytes());
    XNonce::from(nonce)
}

fn nonce_prefix(header: &StreamHeader) -> [u8; NONCE_PREFIX_LEN] {
    let mut prefix = [0u8; NONCE_PREFIX_LEN];
    prefix.copy_from_slice(&header.as_bytes()[..NONCE_PREFIX_LEN]);
    prefix
}

/// Encrypt session. Chunks must be pushed in file order, exactly once each;
/// the session refuses further pushes once a FINAL chunk has been sealed.
pub struct EncryptStream {
    cipher: XChaCha20Poly1305,
    prefix: [u8; NONCE_PREFIX_LEN],
    counter: u64,
    finished: bool,
}

impl EncryptStream {
    /// Start a session, minting the header the decrypting side will need.
    pub fn new(key: &StreamKey) -> (Self, StreamHeader) {
        let header = StreamHeader::generate();
        let session = Self {
            cipher: session_cipher(key, &header),
            prefix: nonce_prefix(&header),
            counter: 0,
            finished: false,
        };
        (session, header)
    }

    /// The FINAL chunk has been sealed; the session accepts no more pushes.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Seal one chunk. `is_last` marks it FINAL and finishes the session.
    ///
    /// # Panics
    ///
    /// Pushing after the FINAL chunk is a programming error and panics.
    pub fn push(&mut self, payload: &[u8], is_last: bool) -> Result<Vec<u8>, StreamError> {
        assert!(!self.finished, "push on a finished encrypt session");
        if payload.len() > CHUNK_SIZE {
            return Err(StreamError::PayloadTooLarge(payload.len()));
        }

        let tag = if is_last {
            ChunkTag::Final
        } else {
            ChunkTag::Continue
        };

        let mut envelope = Vec::with_capacity(1 + payload.len());
        envelope.push(tag.as_byte());
        envelope.extend_from_slice(payload);

        let nonce = chunk_nonce(&self.prefix, self.counter);
        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: &envelope,
                    aad: &STREAM_AAD,
                },
            )
            .map_err(|_| StreamError::Encrypt)?;
        envelope.zeroize();

        self.counter += 1;
        if is_last {
            self.finished = true;
        }
        Ok(ciphertext)
    }
}

/// Decrypt session. Pull chunks in file order until a FINAL chunk verifies.
pub struct DecryptStream {
    cipher: XChaCha20Poly1305,
    prefix: [u8; NONCE_PREFIX_LEN],
    counter: u64,
    finished: bool,
}

impl DecryptStream {
    /// Validate the header bytes and initialize a session for them.
    pub fn init(key: &StreamKey, header_bytes: &[u8]) -> Result<Self, HeaderError> {
        let header = StreamHeader::try_from(header_bytes)?;
        Ok(Self {
            cipher: session_cipher(key, &header),
            prefix: nonce_prefix(&header),
            counter: 0,
            finished: false,
        })
    }

    /// A verified FINAL chunk has been pulled; the stream is complete.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Open one chunk, returning its payload and stream marker.
    ///
    /// Fails with [`AuthError::TagMismatch`] on corruption, tampering,
    /// truncation-induced misalignment, or a wrong key; the tag check
    /// cannot and does not distinguish them.
    ///
    /// # Panics
    ///
    /// Pulling after a verified FINAL chunk is a programming error and
    /// panics.
    pub fn pull(&mut self, ciphertext: &[u8]) -> Result<(Vec<u8>, ChunkTag), AuthError> {
        assert!(!self.finished, "pull on a finished decrypt session");
        if ciphertext.len() < CHUNK_OVERHEAD {
            return Err(AuthError::TagMismatch);
        }

        let nonce = chunk_nonce(&self.prefix, self.counter);
        let envelope = self
            .cipher
            .decrypt(
                &nonce,
                Payload {
                    msg: ciphertext,
                    aad: &STREAM_AAD,
                },
            )
            .map_err(|_| AuthError::TagMismatch)?;

        let (&marker, payload) = envelope.split_first().ok_or(AuthError::TagMismatch)?;
        let tag = ChunkTag::from_byte(marker).ok_or(AuthError::TagMismatch)?;

        self.counter += 1;
        if tag == ChunkTag::Final {
            self.finished = true;
        }
        Ok((payload.to_vec(), tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_key() -> StreamKey {
        StreamKey::from_bytes([7u8; KEY_SIZE])
    }

    #[test]
    fn test_roundtrip_multi_chunk() {
        let key = test_key();
        let (mut enc, header) = EncryptStream::new(&key);

        let c1 = enc.push(&[0xAA; CHUNK_SIZE], false).unwrap();
        let c2 = enc.push(b"tail", true).unwrap();
        assert!(enc.is_finished());
        assert_eq!(c1.len(), CHUNK_SIZE + CHUNK_OVERHEAD);
        assert_eq!(c2.len(), 4 + CHUNK_OVERHEAD);

        let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
        let (p1, t1) = dec.pull(&c1).unwrap();
        assert_eq!(t1, ChunkTag::Continue);
        assert_eq!(p1, vec![0xAA; CHUNK_SIZE]);

        let (p2, t2) = dec.pull(&c2).unwrap();
        assert_eq!(t2, ChunkTag::Final);
        assert_eq!(p2, b"tail");
        assert!(dec.is_finished());
    }

    #[test]
    fn test_empty_stream_is_one_empty_final_chunk() {
        let key = test_key();
        let (mut enc, header) = EncryptStream::new(&key);

        let chunk = enc.push(&[], true).unwrap();
        assert_eq!(chunk.len(), CHUNK_OVERHEAD);

        let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
        let (payload, tag) = dec.pull(&chunk).unwrap();
        assert!(payload.is_empty());
        assert_eq!(tag, ChunkTag::Final);
    }

    #[test]
    fn test_wrong_key_fails() {
        let (mut enc, header) = EncryptStream::new(&test_key());
        let chunk = enc.push(b"secret", true).unwrap();

        let other = StreamKey::from_bytes([8u8; KEY_SIZE]);
        let mut dec = DecryptStream::init(&other, header.as_bytes()).unwrap();
        assert!(matches!(dec.pull(&chunk), Err(AuthError::TagMismatch)));
    }

    #[test]
    fn test_wrong_header_fails() {
        let key = test_key();
        let (mut enc, _header) = EncryptStream::new(&key);
        let chunk = enc.push(b"secret", true).unwrap();

        let mut dec = DecryptStream::init(&key, &[0u8; HEADER_SIZE]).unwrap();
        assert!(matches!(dec.pull(&chunk), Err(AuthError::TagMismatch)));
    }

    #[test]
    fn test_tampered_chunk_fails() {
        let key = test_key();
        let (mut enc, header) = EncryptStream::new(&key);
        let mut chunk = enc.push(b"secret data", true).unwrap();
        chunk[3] ^= 0x01;

        let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
        assert!(matches!(dec.pull(&chunk), Err(AuthError::TagMismatch)));
    }

    #[test]
    fn test_reordered_chunks_fail() {
        let key = test_key();
        let (mut enc, header) = EncryptStream::new(&key);
        let _c1 = enc.push(b"first", false).unwrap();
        let c2 = enc.push(b"second", true).unwrap();

        // Pulling the second chunk first desynchronizes the counter.
        let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
        assert!(matches!(dec.pull(&c2), Err(AuthError::TagMismatch)));
    }

    #[test]
    fn test_replayed_chunk_fails() {
        let key = test_key();
        let (mut enc, header) = EncryptStream::new(&key);
        let c1 = enc.push(b"first", false).unwrap();
        let _c2 = enc.push(b"second", true).unwrap();

        let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
        dec.pull(&c1).unwrap();
        assert!(matches!(dec.pull(&c1), Err(AuthError::TagMismatch)));
    }

    #[test]
    fn test_cross_session_chunk_fails() {
        let key = test_key();
        let (mut enc_a, _header_a) = EncryptStream::new(&key);
        let (_enc_b, header_b) = EncryptStream::new(&key);
        let chunk = enc_a.push(b"payload", true).unwrap();

        let mut dec = DecryptStream::init(&key, header_b.as_bytes()).unwrap();
        assert!(matches!(dec.pull(&chunk), Err(AuthError::TagMismatch)));
    }

    #[test]
    fn test_short_chunk_rejected() {
        let key = test_key();
        let (_enc, header) = EncryptStream::new(&key);
        let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
        assert!(matches!(
            dec.pull(&[0u8; CHUNK_OVERHEAD - 1]),
            Err(AuthError::TagMismatch)
        ));
    }

    #[test]
    fn test_short_header_rejected() {
        let key = test_key();
        assert!(matches!(
            DecryptStream::init(&key, &[0u8; HEADER_SIZE - 1]),
            Err(HeaderError::Corrupt)
        ));
    }

    #[test]
    fn test_oversize_payload_rejected() {
        let key = test_key();
        let (mut enc, _header) = EncryptStream::new(&key);
        assert!(matches!(
            enc.push(&[0u8; CHUNK_SIZE + 1], false),
            Err(StreamError::PayloadTooLarge(_))
        ));
    }

    #[test]
    #[should_panic(expected = "finished encrypt session")]
    fn test_push_after_final_panics() {
        let key = test_key();
        let (mut enc, _header) = EncryptStream::new(&key);
        enc.push(b"done", true).unwrap();
        let _ = enc.push(b"more", false);
    }

    proptest! {
        /// Any payload split into maximal chunks survives the roundtrip.
        #[test]
        fn stream_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..=(2 * CHUNK_SIZE + 100))) {
            let key = test_key();
            let (mut enc, header) = EncryptStream::new(&key);

            let mut chunks = Vec::new();
            let mut offset = 0;
            loop {
                let end = usize::min(offset + CHUNK_SIZE, data.len());
                let is_last = end == data.len();
                chunks.push(enc.push(&data[offset..end], is_last).unwrap());
                offset = end;
                if is_last {
                    break;
                }
            }

            let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
            let mut recovered = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                let (payload, tag) = dec.pull(chunk).unwrap();
                recovered.extend_from_slice(&payload);
                let expect_final = i == chunks.len() - 1;
                prop_assert_eq!(tag == ChunkTag::Final, expect_final);
            }
            prop_assert_eq!(recovered, data);
        }
    }
}
