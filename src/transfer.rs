//! Chunked pixel transfer
//!
//! Walks the rows of an [`AddressWindow`] and splits each row's byte range
//! into writes no larger than the transport accepts. Rows go out top to
//! bottom and bytes left to right, so the controller fills the window in the
//! order it expects. Every row of the window is sent, clean or not.
//!
//! Between chunks control is handed to a [`Yield`] hook so the host can keep
//! up with its own periodic work during long transfers.

use core::ops::Range;

use crate::interface::DisplayInterface;
use crate::window::AddressWindow;

/// Cooperative scheduling hook called between transfer chunks
///
/// Implemented for every `FnMut()`, so a closure that feeds a watchdog or
/// polls an executor can be passed directly; `&mut || {}` does nothing.
pub trait Yield {
    /// Give the host a chance to run
    fn yield_now(&mut self);
}

impl<F: FnMut()> Yield for F {
    fn yield_now(&mut self) {
        self();
    }
}

/// One bus write worth of frame buffer bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferChunk {
    /// Panel row the bytes belong to
    pub row: u8,
    /// Byte range within the frame buffer
    pub range: Range<usize>,
}

/// Iterator over the chunks covering a window, in transfer order
#[derive(Clone, Debug)]
pub struct TransferChunks {
    /// Window being sent
    window: AddressWindow,
    /// Bytes per frame buffer row
    bytes_per_row: usize,
    /// Largest chunk the transport accepts
    max_chunk: usize,
    /// Row of the next chunk
    row: u16,
    /// Bytes of the current row already planned
    sent_in_row: usize,
}

impl TransferChunks {
    /// Plan the transfer of `window` from a buffer with `bytes_per_row` bytes per row
    ///
    /// A `max_chunk` of 0 is treated as 1.
    pub fn new(window: AddressWindow, bytes_per_row: usize, max_chunk: usize) -> Self {
        Self {
            window,
            bytes_per_row,
            max_chunk: max_chunk.max(1),
            row: u16::from(window.row_start),
            sent_in_row: 0,
        }
    }
}

impl Iterator for TransferChunks {
    type Item = TransferChunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row > u16::from(self.window.row_end) {
            return None;
        }
        let row_len = self.window.row_byte_len();
        let row_base = self.row as usize * self.bytes_per_row + self.window.row_byte_offset();
        let len = (row_len - self.sent_in_row).min(self.max_chunk);
        let start = row_base + self.sent_in_row;
        let chunk = TransferChunk {
            row: self.row as u8,
            range: start..start + len,
        };

        self.sent_in_row += len;
        if self.sent_in_row == row_len {
            self.row += 1;
            self.sent_in_row = 0;
        }
        Some(chunk)
    }
}

/// Outcome of streaming a window
#[derive(Debug)]
pub(crate) struct StreamReport<E> {
    /// Chunks written
    pub(crate) chunks: usize,
    /// Bytes written
    pub(crate) bytes: usize,
    /// Chunks the transport rejected
    pub(crate) failed_chunks: usize,
    /// Error of the first rejected chunk
    pub(crate) first_error: Option<E>,
}

/// Send every chunk of `window` from `buffer` as data
///
/// A rejected chunk is logged and counted, and streaming carries on with the
/// next one so chunk boundaries and order never depend on bus errors.
/// `cooperate` runs after every chunk.
///
/// Streaming stops at the first chunk that would read past the end of
/// `buffer`; nothing from that chunk onwards is sent.
pub(crate) fn stream<I, Y>(
    interface: &mut I,
    buffer: &[u8],
    window: AddressWindow,
    bytes_per_row: usize,
    cooperate: &mut Y,
) -> StreamReport<I::Error>
where
    I: DisplayInterface,
    Y: Yield + ?Sized,
{
    let mut report = StreamReport {
        chunks: 0,
        bytes: 0,
        failed_chunks: 0,
        first_error: None,
    };

    for chunk in TransferChunks::new(window, bytes_per_row, interface.max_chunk_size()) {
        log::trace!(
            "row {} bytes {}..{}",
            chunk.row,
            chunk.range.start,
            chunk.range.end
        );
        let Some(bytes) = buffer.get(chunk.range.clone()) else {
            log::warn!(
                "window needs bytes up to {}, buffer holds {}",
                chunk.range.end,
                buffer.len()
            );
            break;
        };
        if let Err(err) = interface.send_data(bytes) {
            log::warn!("pixel chunk on row {} failed: {:?}", chunk.row, err);
            report.failed_chunks += 1;
            if report.first_error.is_none() {
                report.first_error = Some(err);
            }
        }
        report.chunks += 1;
        report.bytes += bytes.len();
        cooperate.yield_now();
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensions;
    use crate::dirty::DirtyRect;
    use alloc::vec::Vec;
    use embedded_hal::delay::DelayNs;

    const WIDTH: u16 = 256;
    const HEIGHT: u16 = 64;

    fn window(x1: u16, y1: u16, x2: u16, y2: u16) -> AddressWindow {
        AddressWindow::encode(
            DirtyRect::new(x1, y1, x2, y2),
            Dimensions::new(WIDTH, HEIGHT).unwrap(),
            28,
        )
    }

    fn pattern() -> Vec<u8> {
        (0..usize::from(WIDTH / 2) * usize::from(HEIGHT))
            .map(|i| (i % 251) as u8)
            .collect()
    }

    fn expected_bytes(buffer: &[u8], window: AddressWindow) -> Vec<u8> {
        let mut out = Vec::new();
        for row in window.row_start..=window.row_end {
            let start = row as usize * 128 + window.row_byte_offset();
            out.extend_from_slice(&buffer[start..start + window.row_byte_len()]);
        }
        out
    }

    struct ChunkRecorder {
        max_chunk: usize,
        chunks: Vec<Vec<u8>>,
        fail_on: Option<usize>,
    }

    impl ChunkRecorder {
        fn new(max_chunk: usize) -> Self {
            Self {
                max_chunk,
                chunks: Vec::new(),
                fail_on: None,
            }
        }
    }

    impl DisplayInterface for ChunkRecorder {
        type Error = usize;

        fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            let index = self.chunks.len();
            self.chunks.push(data.to_vec());
            if self.fail_on.is_some_and(|n| index % n == n - 1) {
                Err(index)
            } else {
                Ok(())
            }
        }

        fn max_chunk_size(&self) -> usize {
            self.max_chunk
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
    }

    #[test]
    fn test_single_row_fits_one_chunk() {
        let chunks: Vec<_> = TransferChunks::new(window(0, 0, 7, 0), 128, 31).collect();
        assert_eq!(
            chunks,
            [TransferChunk {
                row: 0,
                range: 0..4
            }]
        );
    }

    #[test]
    fn test_rows_split_at_chunk_limit() {
        // Full width row is 128 bytes: 31 + 31 + 31 + 31 + 4
        let chunks: Vec<_> = TransferChunks::new(window(0, 2, 255, 3), 128, 31).collect();
        assert_eq!(chunks.len(), 10);
        assert_eq!(chunks[0].range, 256..287);
        assert_eq!(chunks[4].range, 380..384);
        assert_eq!(chunks[5].row, 3);
        assert_eq!(chunks[5].range, 384..415);
        assert!(chunks.iter().all(|c| c.range.len() <= 31));
    }

    #[test]
    fn test_unbounded_transport_sends_one_chunk_per_row() {
        let chunks: Vec<_> = TransferChunks::new(window(8, 10, 23, 14), 128, usize::MAX).collect();
        assert_eq!(chunks.len(), 5);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.row as usize, 10 + i);
            let start = (10 + i) * 128 + 4;
            assert_eq!(chunk.range, start..start + 8);
        }
    }

    #[test]
    fn test_zero_chunk_limit_still_progresses() {
        let chunks: Vec<_> = TransferChunks::new(window(0, 0, 3, 0), 128, 0).collect();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.range.len() == 1));
    }

    #[test]
    fn test_stream_covers_window_exactly() {
        let buffer = pattern();
        let cases = [
            (0, 0, 7, 0),
            (5, 10, 10, 12),
            (0, 0, 255, 63),
            (200, 30, 255, 31),
            (17, 63, 17, 63),
        ];
        for max_chunk in [1, 7, 31, 128, usize::MAX] {
            for (x1, y1, x2, y2) in cases {
                let window = window(x1, y1, x2, y2);
                let mut interface = ChunkRecorder::new(max_chunk);
                let mut yields = 0;
                let report = stream(&mut interface, &buffer, window, 128, &mut || yields += 1);

                let sent: Vec<u8> = interface.chunks.concat();
                assert_eq!(sent, expected_bytes(&buffer, window));
                assert!(interface.chunks.iter().all(|c| c.len() <= max_chunk));
                assert_eq!(report.chunks, interface.chunks.len());
                assert_eq!(report.bytes, window.byte_len());
                assert_eq!(report.failed_chunks, 0);
                assert_eq!(yields, report.chunks);
            }
        }
    }

    #[test]
    fn test_stream_keeps_going_after_failed_chunk() {
        let buffer = pattern();
        let window = window(0, 0, 255, 1);
        let mut interface = ChunkRecorder::new(31);
        interface.fail_on = Some(3);
        let report = stream(&mut interface, &buffer, window, 128, &mut || {});

        assert_eq!(interface.chunks.len(), 10);
        assert_eq!(interface.chunks.concat(), expected_bytes(&buffer, window));
        assert_eq!(report.failed_chunks, 3);
        assert_eq!(report.first_error, Some(2));
    }

    #[test]
    fn test_stream_stops_at_end_of_short_buffer() {
        // Two full rows plus half of the third
        let buffer: Vec<u8> = pattern()[..128 * 2 + 64].to_vec();
        let window = window(0, 0, 255, 3);
        let mut interface = ChunkRecorder::new(usize::MAX);
        let mut yields = 0;
        let report = stream(&mut interface, &buffer, window, 128, &mut || yields += 1);

        assert_eq!(interface.chunks.len(), 2);
        assert_eq!(interface.chunks.concat(), buffer[..256]);
        assert_eq!(report.chunks, 2);
        assert_eq!(report.bytes, 256);
        assert_eq!(report.failed_chunks, 0);
        assert_eq!(yields, 2);
    }
}
