use filecrypt_crypto::{
    derive_stream_key, DecryptStream, EncryptStream, KdfParams, StreamKey, CHUNK_SIZE, KEY_SIZE,
    SALT_SIZE,
};
use secrecy::SecretString;

fn make_data(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| (i.wrapping_mul(7) ^ (i >> 3)) as u8)
        .collect()
}

#[divan::bench(args = [64, 1024, CHUNK_SIZE])]
fn bench_push_chunk(bencher: divan::Bencher, size: usize) {
    let key = StreamKey::from_bytes([0xABu8; KEY_SIZE]);
    let data = make_data(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench_local(|| {
            let (mut session, _header) = EncryptStream::new(&key);
            session.push(divan::black_box(&data), true).unwrap()
        });
}

#[divan::bench(args = [64, 1024, CHUNK_SIZE])]
fn bench_pull_chunk(bencher: divan::Bencher, size: usize) {
    let key = StreamKey::from_bytes([0xABu8; KEY_SIZE]);
    let data = make_data(size);
    let (mut session, header) = EncryptStream::new(&key);
    let chunk = session.push(&data, true).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench_local(|| {
            let mut dec = DecryptStream::init(&key, header.as_bytes()).unwrap();
            dec.pull(divan::black_box(&chunk)).unwrap()
        });
}

#[divan::bench(sample_count = 3)]
fn bench_kdf_moderate(bencher: divan::Bencher) {
    let password = SecretString::from("benchmark password");
    let salt = [0x55u8; SALT_SIZE];
    bencher.bench_local(|| {
        derive_stream_key(
            divan::black_box(&password),
            divan::black_box(&salt),
            &KdfParams::default(),
        )
        .unwrap()
    });
}

fn main() {
    divan::main();
}
