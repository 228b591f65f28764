//! Adapters from a [`BodyRead`] to `futures` streams and `http_body` bodies.

use crate::protocol::BodyError;
use crate::reader::BodyRead;
use bytes::{Bytes, BytesMut};
use futures::{Stream, TryStreamExt, stream};
use http_body::Frame;
use http_body_util::StreamBody;

/// Turns a body reader into a stream of byte slices.
///
/// Each item holds the bytes of one productive `read` of at most `read_size`
/// bytes. The stream ends once the body is complete and fuses after the
/// first error.
pub fn into_stream<R>(reader: R, read_size: usize) -> impl Stream<Item = Result<Bytes, BodyError>>
where
    R: BodyRead,
{
    let read_size = read_size.max(1);
    stream::try_unfold(Some(reader), move |state| next_slice(state, read_size))
}

/// Turns a body reader into an [`http_body::Body`] of data frames.
pub fn into_body<R>(reader: R, read_size: usize) -> StreamBody<impl Stream<Item = Result<Frame<Bytes>, BodyError>>>
where
    R: BodyRead,
{
    StreamBody::new(into_stream(reader, read_size).map_ok(Frame::data))
}

async fn next_slice<R: BodyRead>(state: Option<R>, read_size: usize) -> Result<Option<(Bytes, Option<R>)>, BodyError> {
    let Some(mut reader) = state else {
        return Ok(None);
    };

    loop {
        let mut buf = BytesMut::zeroed(read_size);
        let outcome = reader.read(&mut buf).await?;
        buf.truncate(outcome.read);

        match (outcome.read, outcome.complete) {
            (0, true) => return Ok(None),
            (_, true) => return Ok(Some((buf.freeze(), None))),
            (0, false) => {}
            (_, false) => return Ok(Some((buf.freeze(), Some(reader)))),
        }
    }
}
