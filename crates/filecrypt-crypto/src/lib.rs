//! filecrypt-crypto: password-based authenticated file encryption
//!
//! Architecture: derive-then-stream with XChaCha20-Poly1305
//!
//! Pipeline: password + random salt → Argon2id → stream key → framed chunk
//! stream (one AEAD envelope per chunk, CONTINUE/FINAL marker inside the
//! envelope).
//!
//! On-disk format:
//! ```text
//! [16 bytes: salt][24 bytes: stream header][chunk_1][chunk_2]...[chunk_N]
//! ```
//! Every chunk is `payload_len + 17` bytes of ciphertext (16-byte Poly1305
//! tag + 1-byte stream marker sealed inside the envelope), `payload_len ≤
//! 4096`. Exactly one FINAL chunk exists and it is the last one; an empty
//! plaintext still produces a single empty FINAL chunk.

pub mod error;
pub mod file;
pub mod kdf;
pub mod stream;

pub use error::{AuthError, FileCryptError, FramingError, HeaderError, KdfError, StreamError};
pub use file::{decrypt_file, decrypted_output_path, encrypt_file, encrypted_output_path};
pub use kdf::{derive_stream_key, generate_salt, KdfParams, StreamKey};
pub use stream::{ChunkTag, DecryptStream, EncryptStream, StreamHeader};

/// Size of a derived stream key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of the random KDF salt stored at the start of an encrypted file
pub const SALT_SIZE: usize = 16;

/// Size of the per-session stream header stored after the salt
pub const HEADER_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;

/// Maximum plaintext payload carried by one chunk
pub const CHUNK_SIZE: usize = 4096;

/// Ciphertext expansion per chunk: Poly1305 tag plus the sealed marker byte
pub const CHUNK_OVERHEAD: usize = TAG_SIZE + 1;

/// Fixed associated data bound into every chunk's authentication tag.
///
/// Not secret and never written to disk; both ends of the codec supply the
/// same value, so it acts purely as a domain-separation tag. The value is
/// kept stable for compatibility with existing encrypted files.
pub const STREAM_AAD: [u8; 16] = *b"ZmlsZWNyeXB0aW9u";
