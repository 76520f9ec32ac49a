//! Transport boundary and the paced chunked writer.

use std::future::Future;
use std::time::Duration;

use crate::Result;

/// A negotiated link that can deliver byte buffers to the printer.
///
/// Implementations guarantee ordering only for serialized writes, so the
/// returned future must resolve (or fail) before the next `write` is issued.
/// Resolution means the link has accepted the buffer; there is no
/// printer-level acknowledgment beyond that.
pub trait Transport {
    /// Write one buffer and await its completion.
    fn write(&mut self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;
}

/// Write a buffer as consecutive slices of at most `chunk_size` bytes.
///
/// Each slice is written and awaited before the next; when `chunk_delay` is
/// nonzero the writer sleeps that long after every slice. The last slice may
/// be shorter than `chunk_size`, never longer. A failed write aborts the
/// remaining slices.
///
/// `chunk_size` must be nonzero; callers validate before transfer starts.
pub async fn write_chunked<T: Transport>(
    link: &mut T,
    data: &[u8],
    chunk_size: usize,
    chunk_delay: Duration,
) -> Result<()> {
    for chunk in data.chunks(chunk_size) {
        link.write(chunk).await?;
        if !chunk_delay.is_zero() {
            tokio::time::sleep(chunk_delay).await;
        }
    }
    Ok(())
}
