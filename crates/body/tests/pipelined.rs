use http::HeaderMap;
use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use micro_body::BodyConfig;
use micro_body::protocol::{ErrorKind, PayloadSize};
use micro_body::reader::{BodyRead, BodyReader, read_to_end};
use micro_body::source::{BufSource, BufferedSource};
use tokio::io::AsyncWriteExt;

fn chunked_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TRANSFER_ENCODING, "chunked".parse().unwrap());
    headers
}

fn length_headers(length: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_LENGTH, length.to_string().parse().unwrap());
    headers
}

async fn read_body<S: BufSource + Send>(source: &mut S, headers: &HeaderMap, buf_size: usize) -> Vec<u8> {
    let config = BodyConfig::default();
    let payload_size = PayloadSize::from_headers(headers).unwrap();
    let mut reader = BodyReader::new(source, payload_size, &config);

    let mut body = Vec::new();
    let mut buf = vec![0u8; buf_size];
    loop {
        let outcome = reader.read(&mut buf).await.unwrap();
        body.extend_from_slice(&buf[..outcome.read]);
        if outcome.complete {
            return body;
        }
    }
}

#[tokio::test]
async fn bodies_back_to_back_on_one_connection() {
    let wire = b"hello\
        6\r\n world\r\n1\r\n!\r\n0\r\n\r\n\
        0\r\n\r\n\
        tail";
    let mut source = BufferedSource::new(&wire[..]);

    assert_eq!(read_body(&mut source, &length_headers(5), 2).await, b"hello");
    assert_eq!(read_body(&mut source, &chunked_headers(), 4).await, b" world!");
    assert_eq!(read_body(&mut source, &chunked_headers(), 4).await, b"");
    assert_eq!(read_body(&mut source, &HeaderMap::new(), 4).await, b"");

    let mut rest = Vec::new();
    let mut reader = BodyReader::fix_length(&mut source, 4);
    read_to_end(&mut reader, &mut rest).await.unwrap();
    assert_eq!(rest, b"tail");
}

#[tokio::test]
async fn body_over_slow_transport() {
    let (mut client, server) = tokio::io::duplex(4);

    let pieces: [&[u8]; 5] = [b"a\r\n0123", b"456789\r", b"\n3;x=y\r\nabc\r\n", b"0\r\n", b"\r\nnext"];
    let writer = tokio::spawn(async move {
        for piece in pieces {
            client.write_all(piece).await.unwrap();
            tokio::task::yield_now().await;
        }
    });

    let mut source = BufferedSource::new(server);
    assert_eq!(read_body(&mut source, &chunked_headers(), 3).await, b"0123456789abc");

    let mut next = [0u8; 4];
    assert_eq!(source.read_full(&mut next).await.unwrap(), 4);
    assert_eq!(&next, b"next");

    writer.await.unwrap();
}

#[tokio::test]
async fn reader_can_be_driven_from_a_spawned_task() {
    let handle = tokio::spawn(async move {
        let mut source = BufferedSource::new(&b"2\r\nok\r\n0\r\n\r\n"[..]);
        let mut reader = BodyReader::chunked(&mut source, &BodyConfig::default());
        let mut body = Vec::new();
        read_to_end(&mut reader, &mut body).await.map(|_| body)
    });

    assert_eq!(handle.await.unwrap().unwrap(), b"ok");
}

#[tokio::test]
async fn truncated_fixed_body_fails() {
    let mut source = BufferedSource::new(&b"only"[..]);
    let mut reader = BodyReader::fix_length(&mut source, 10);

    let mut body = Vec::new();
    let error = read_to_end(&mut reader, &mut body).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Framing);
}
