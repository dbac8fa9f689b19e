//! Whole-file encryption and decryption.
//!
//! Streaming drivers over the stream codec: one input buffer and one output
//! chunk in flight at a time, independent of file size. Failures abort the
//! operation immediately; a partial output file may be left behind (callers
//! wanting atomicity can write to a temporary path and rename).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::{debug, info};

use crate::error::{FileCryptError, FramingError};
use crate::kdf::{derive_stream_key, generate_salt, KdfParams};
use crate::stream::{ChunkTag, DecryptStream, EncryptStream};
use crate::{CHUNK_OVERHEAD, CHUNK_SIZE, HEADER_SIZE, SALT_SIZE};

/// Destination path for encrypting `src`: the same name with `.enc` appended.
pub fn encrypted_output_path(src: &Path) -> PathBuf {
    let mut name = src.as_os_str().to_os_string();
    name.push(".enc");
    PathBuf::from(name)
}

/// Destination path for decrypting `src`: the `.enc` suffix stripped, or
/// `.dec` appended when the input does not carry it.
pub fn decrypted_output_path(src: &Path) -> PathBuf {
    if src.extension().is_some_and(|ext| ext == "enc") {
        src.with_extension("")
    } else {
        let mut name = src.as_os_str().to_os_string();
        name.push(".dec");
        PathBuf::from(name)
    }
}

/// Read until `buf` is full or the input is exhausted. A return shorter than
/// `buf.len()` means end-of-input was reached during this call.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// The codec operates on regular files only.
fn reject_directory(path: &Path) -> Result<(), FileCryptError> {
    if std::fs::metadata(path)?.is_dir() {
        return Err(FileCryptError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is a directory", path.display()),
        )));
    }
    Ok(())
}

/// Encrypt `src` into `dest` under a key derived from `password`.
///
/// Writes `[salt][stream header][chunks...]`; the last chunk is marked FINAL
/// inside its authenticated envelope. The derived key is wiped when this
/// function returns, on success and error paths alike.
pub fn encrypt_file(src: &Path, dest: &Path, password: &SecretString) -> Result<(), FileCryptError> {
    reject_directory(src)?;
    let mut reader = BufReader::new(File::open(src)?);
    let mut writer = BufWriter::new(File::create(dest)?);

    let salt = generate_salt();
    let key = derive_stream_key(password, &salt, &KdfParams::default())?;
    debug!(src = %src.display(), "stream key derived");

    writer.write_all(&salt)?;
    let (mut session, header) = EncryptStream::new(&key);
    writer.write_all(header.as_bytes())?;

    let mut plaintext = [0u8; CHUNK_SIZE];
    loop {
        let n = read_full(&mut reader, &mut plaintext)?;
        let is_last = n < CHUNK_SIZE;
        let chunk = session.push(&plaintext[..n], is_last)?;
        writer.write_all(&chunk)?;
        if is_last {
            break;
        }
    }
    writer.flush()?;

    info!(src = %src.display(), dest = %dest.display(), "file encrypted");
    Ok(())
}

/// Decrypt `src` into `dest` under a key derived from `password` and the
/// salt stored in `src`.
///
/// Success requires every chunk to authenticate AND the stream framing to be
/// consistent with the physical end of input. The two checks are independent:
/// a FINAL chunk with ciphertext left over is [`FramingError::TrailingData`],
/// ciphertext running out before a FINAL chunk is [`FramingError::Truncated`].
pub fn decrypt_file(src: &Path, dest: &Path, password: &SecretString) -> Result<(), FileCryptError> {
    reject_directory(src)?;
    let mut reader = BufReader::new(File::open(src)?);

    let mut salt = [0u8; SALT_SIZE];
    if read_full(&mut reader, &mut salt)? != SALT_SIZE {
        return Err(FileCryptError::Corrupt("incomplete salt"));
    }
    let key = derive_stream_key(password, &salt, &KdfParams::default())?;
    debug!(src = %src.display(), "stream key derived");

    let mut header = [0u8; HEADER_SIZE];
    if read_full(&mut reader, &mut header)? != HEADER_SIZE {
        return Err(FileCryptError::Corrupt("incomplete stream header"));
    }
    let mut session = DecryptStream::init(&key, &header)?;

    let mut writer = BufWriter::new(File::create(dest)?);
    let mut ciphertext = [0u8; CHUNK_SIZE + CHUNK_OVERHEAD];
    loop {
        let n = read_full(&mut reader, &mut ciphertext)?;
        if n == 0 {
            // Input exhausted while the stream is still open.
            return Err(FramingError::Truncated.into());
        }
        let at_eof = n < ciphertext.len();

        let (payload, tag) = session.pull(&ciphertext[..n])?;
        if tag == ChunkTag::Final && !at_eof {
            return Err(FramingError::TrailingData.into());
        }
        if tag != ChunkTag::Final && at_eof {
            return Err(FramingError::Truncated.into());
        }

        writer.write_all(&payload)?;
        if tag == ChunkTag::Final {
            break;
        }
    }
    writer.flush()?;

    info!(src = %src.display(), dest = %dest.display(), "file decrypted");
    Ok(())
}
