//! Hybrid run-length / bit-packed encoding for repetition and definition
//! levels.
//!
//! The stream is a sequence of runs. A repeated run is
//! `[(count << 1) as varint][value in ceil(bit_width / 8) bytes]`; a literal
//! run is `[(group_count << 1 | 1) as one byte][values bit packed LSB
//! first]`, where values are packed in groups of 8 and a single literal run
//! holds at most 63 groups. Runs of 8 or more identical values switch to
//! repeated encoding; everything else accumulates into literal groups.

use crate::error::{ParquetError, Result};

/// Maximum number of 8-value groups a single literal run indicator can hold
const MAX_GROUPS_PER_LITERAL_RUN: usize = 1 << 6;
const MAX_VALUES_PER_LITERAL_RUN: usize = MAX_GROUPS_PER_LITERAL_RUN * 8;
const MAX_VLQ_BYTE_LEN: usize = 10;

/// Number of bits needed to represent values in `[0, x]`
pub fn num_required_bits(x: u64) -> u8 {
    (64 - x.leading_zeros()) as u8
}

/// Smallest buffer that can hold any single run at this bit width
fn min_buffer_size(bit_width: u8) -> usize {
    let max_literal_run_size = 1 + (MAX_VALUES_PER_LITERAL_RUN * bit_width as usize).div_ceil(8);
    let max_repeated_run_size = MAX_VLQ_BYTE_LEN + (bit_width as usize).div_ceil(8);
    std::cmp::max(max_literal_run_size, max_repeated_run_size)
}

/// Deterministic upper bound on the encoded size of `num_values` values at
/// `bit_width`. The worst case is every 8-value group becoming its own
/// literal run.
pub fn max_buffer_size(bit_width: u8, num_values: usize) -> usize {
    let num_groups = num_values.div_ceil(8);
    let literal_max_size = num_groups + num_groups * bit_width as usize;
    std::cmp::max(min_buffer_size(bit_width), literal_max_size)
}

/// Append-only bit stream with LSB-first packing and byte-aligned escapes
pub struct BitWriter {
    buffer: Vec<u8>,
    /// Pending bits not yet spilled to the buffer, low bits first
    buffered_values: u64,
    /// Number of pending bits, always below 64 between calls
    bit_offset: usize,
}

impl BitWriter {
    pub fn new(capacity: usize) -> Self {
        BitWriter {
            buffer: Vec::with_capacity(capacity),
            buffered_values: 0,
            bit_offset: 0,
        }
    }

    /// Append the low `num_bits` bits of `v`
    pub fn put_value(&mut self, v: u64, num_bits: usize) {
        debug_assert!(num_bits <= 64);
        debug_assert!(num_bits == 64 || v >> num_bits == 0);
        if num_bits == 0 {
            return;
        }
        self.buffered_values |= v << self.bit_offset;
        self.bit_offset += num_bits;
        if self.bit_offset >= 64 {
            self.buffer
                .extend_from_slice(&self.buffered_values.to_le_bytes());
            self.bit_offset -= 64;
            self.buffered_values = if self.bit_offset == 0 {
                0
            } else {
                // Bits of v that did not fit in the spilled word
                v >> (num_bits - self.bit_offset)
            };
        }
    }

    /// Spill pending bits, padding the last partial byte with zeros
    pub fn flush(&mut self) {
        if self.bit_offset > 0 {
            let num_bytes = self.bit_offset.div_ceil(8);
            let bytes = self.buffered_values.to_le_bytes();
            self.buffer.extend_from_slice(&bytes[..num_bytes]);
        }
        self.buffered_values = 0;
        self.bit_offset = 0;
    }

    /// Append an unsigned LEB128 varint at the next byte boundary
    pub fn put_vlq_int(&mut self, mut v: u64) {
        self.flush();
        while v >= 0x80 {
            self.buffer.push((v as u8 & 0x7F) | 0x80);
            v >>= 7;
        }
        self.buffer.push(v as u8);
    }

    /// Append the low `num_bytes` bytes of `v` at the next byte boundary
    pub fn put_aligned(&mut self, v: u64, num_bytes: usize) {
        debug_assert!(num_bytes <= 8);
        self.flush();
        self.buffer.extend_from_slice(&v.to_le_bytes()[..num_bytes]);
    }

    /// Reserve `num_bytes` zeroed bytes at the next byte boundary and
    /// return their offset for later patching
    pub fn skip(&mut self, num_bytes: usize) -> usize {
        self.flush();
        let offset = self.buffer.len();
        self.buffer.resize(offset + num_bytes, 0);
        offset
    }

    /// Overwrite previously reserved bytes at `offset`
    pub fn put_aligned_offset(&mut self, v: u64, offset: usize, num_bytes: usize) {
        debug_assert!(num_bytes <= 8);
        debug_assert!(offset + num_bytes <= self.buffer.len());
        self.buffer[offset..offset + num_bytes].copy_from_slice(&v.to_le_bytes()[..num_bytes]);
    }

    /// Bytes produced so far, counting pending bits rounded up
    pub fn bytes_written(&self) -> usize {
        self.buffer.len() + self.bit_offset.div_ceil(8)
    }

    /// Flush pending bits and take the finished buffer
    pub fn consume(mut self) -> Vec<u8> {
        self.flush();
        self.buffer
    }
}

/// Run-length / bit-packed hybrid encoder over a [`BitWriter`]
pub struct RleEncoder {
    bit_width: u8,
    bit_writer: BitWriter,
    /// Values waiting to form a complete 8-value literal group
    buffered_values: [u64; 8],
    num_buffered_values: usize,
    /// Value of the run currently being tracked
    current_value: u64,
    /// Length of the tracked run; 8 or more commits it as a repeated run
    repeat_count: usize,
    /// Values committed to the open literal run, always a multiple of 8
    literal_count: usize,
    /// Reserved position of the open literal run's indicator byte
    indicator_offset: Option<usize>,
}

impl RleEncoder {
    pub fn new(bit_width: u8, capacity: usize) -> Self {
        RleEncoder {
            bit_width,
            bit_writer: BitWriter::new(capacity),
            buffered_values: [0; 8],
            num_buffered_values: 0,
            current_value: 0,
            repeat_count: 0,
            literal_count: 0,
            indicator_offset: None,
        }
    }

    pub fn put(&mut self, value: u64) {
        if self.current_value == value {
            self.repeat_count += 1;
            if self.repeat_count > 8 {
                // Continuation of a committed repeated run
                return;
            }
        } else {
            if self.repeat_count >= 8 {
                debug_assert_eq!(self.literal_count, 0);
                self.flush_repeated_run();
            }
            self.repeat_count = 1;
            self.current_value = value;
        }

        self.buffered_values[self.num_buffered_values] = value;
        self.num_buffered_values += 1;
        if self.num_buffered_values == 8 {
            debug_assert_eq!(self.literal_count % 8, 0);
            self.flush_buffered_values();
        }
    }

    /// Commit whatever run is pending. Must be called exactly once, after
    /// the last `put`.
    pub fn flush(&mut self) {
        if self.literal_count == 0 && self.repeat_count == 0 && self.num_buffered_values == 0 {
            return;
        }
        let all_repeat = self.literal_count == 0
            && (self.repeat_count == self.num_buffered_values || self.num_buffered_values == 0);
        if self.repeat_count > 0 && all_repeat {
            self.flush_repeated_run();
        } else {
            // Pad the trailing literal group to 8 values with zeros
            while self.num_buffered_values != 0 && self.num_buffered_values < 8 {
                self.buffered_values[self.num_buffered_values] = 0;
                self.num_buffered_values += 1;
            }
            self.literal_count += self.num_buffered_values;
            self.flush_literal_run(true);
            self.repeat_count = 0;
        }
    }

    /// Finish the stream and take the encoded bytes
    pub fn consume(mut self) -> Vec<u8> {
        self.flush();
        self.bit_writer.consume()
    }

    fn flush_buffered_values(&mut self) {
        if self.repeat_count >= 8 {
            // The full group repeats; let the repeated run keep growing
            self.num_buffered_values = 0;
            if self.literal_count > 0 {
                debug_assert_eq!(self.literal_count % 8, 0);
                self.flush_literal_run(true);
            }
            return;
        }

        self.literal_count += self.num_buffered_values;
        let num_groups = self.literal_count / 8;
        if num_groups + 1 >= MAX_GROUPS_PER_LITERAL_RUN {
            // Indicator byte is saturated; close this literal run
            self.flush_literal_run(true);
        } else {
            self.flush_literal_run(false);
        }
        self.repeat_count = 0;
    }

    fn flush_literal_run(&mut self, update_indicator: bool) {
        if self.indicator_offset.is_none() {
            self.indicator_offset = Some(self.bit_writer.skip(1));
        }
        for i in 0..self.num_buffered_values {
            self.bit_writer
                .put_value(self.buffered_values[i], self.bit_width as usize);
        }
        self.num_buffered_values = 0;

        if update_indicator {
            let num_groups = self.literal_count / 8;
            let indicator = (num_groups << 1) | 1;
            if let Some(offset) = self.indicator_offset.take() {
                self.bit_writer.put_aligned_offset(indicator as u64, offset, 1);
            }
            self.literal_count = 0;
        }
    }

    fn flush_repeated_run(&mut self) {
        debug_assert!(self.repeat_count > 0);
        let indicator = (self.repeat_count as u64) << 1;
        self.bit_writer.put_vlq_int(indicator);
        self.bit_writer
            .put_aligned(self.current_value, (self.bit_width as usize).div_ceil(8));
        self.num_buffered_values = 0;
        self.repeat_count = 0;
    }
}

/// Encode a level sequence with the bit width implied by `max_level`.
/// Any level outside `[0, max_level]` is rejected.
pub fn encode_levels(levels: &[u16], max_level: u16) -> Result<Vec<u8>> {
    let bit_width = num_required_bits(max_level as u64);
    let mut encoder = RleEncoder::new(bit_width, max_buffer_size(bit_width, levels.len()));
    for &level in levels {
        if level > max_level {
            return Err(ParquetError::invalid_argument(format!(
                "level value {} is out of range; the maximum level for this column is {}",
                level, max_level
            )));
        }
        encoder.put(level as u64);
    }
    Ok(encoder.consume())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_required_bits() {
        assert_eq!(num_required_bits(0), 0);
        assert_eq!(num_required_bits(1), 1);
        assert_eq!(num_required_bits(2), 2);
        assert_eq!(num_required_bits(3), 2);
        assert_eq!(num_required_bits(4), 3);
        assert_eq!(num_required_bits(255), 8);
        assert_eq!(num_required_bits(256), 9);
    }

    #[test]
    fn test_bit_writer_packing() {
        let mut writer = BitWriter::new(16);
        // 0b1, 0b0, 0b1, 0b1 LSB first => 0b00001101
        writer.put_value(1, 1);
        writer.put_value(0, 1);
        writer.put_value(1, 1);
        writer.put_value(1, 1);
        assert_eq!(writer.consume(), vec![0b0000_1101]);
    }

    #[test]
    fn test_bit_writer_spills_across_words() {
        let mut writer = BitWriter::new(32);
        for i in 0..10u64 {
            writer.put_value(i & 0x7F, 7);
        }
        let bytes = writer.consume();
        // 70 bits => 9 bytes
        assert_eq!(bytes.len(), 9);
        // First byte: value 0 (7 bits) plus the low bit of value 1
        assert_eq!(bytes[0], 0b1000_0000);
    }

    #[test]
    fn test_bit_writer_vlq() {
        let mut writer = BitWriter::new(16);
        writer.put_vlq_int(1000);
        assert_eq!(writer.consume(), vec![0xE8, 0x07]);
    }

    #[test]
    fn test_bit_writer_patch() {
        let mut writer = BitWriter::new(16);
        let offset = writer.skip(1);
        writer.put_aligned(0xAB, 1);
        writer.put_aligned_offset(0x03, offset, 1);
        assert_eq!(writer.consume(), vec![0x03, 0xAB]);
    }

    #[test]
    fn test_repeated_run() {
        // 500 zeros at bit width 1: one repeated run
        let levels = vec![0u16; 500];
        let encoded = encode_levels(&levels, 1).unwrap();
        assert_eq!(encoded, vec![0xE8, 0x07, 0x00]);
    }

    #[test]
    fn test_short_repeated_run_at_flush() {
        let encoded = encode_levels(&[1, 1, 1], 1).unwrap();
        // Run of 3, value 1
        assert_eq!(encoded, vec![0x06, 0x01]);
    }

    #[test]
    fn test_exact_group_repeated_run() {
        let encoded = encode_levels(&[1u16; 8], 1).unwrap();
        assert_eq!(encoded, vec![0x10, 0x01]);
    }

    #[test]
    fn test_literal_run() {
        // Alternating values never form a repeated run
        let levels = [0u16, 1, 0, 1, 0, 1, 0, 1];
        let encoded = encode_levels(&levels, 1).unwrap();
        assert_eq!(encoded, vec![0x03, 0b1010_1010]);
    }

    #[test]
    fn test_repeated_then_literal_run() {
        let mut levels = vec![1u16; 10];
        levels.push(0);
        let encoded = encode_levels(&levels, 1).unwrap();
        // Run of 10 ones, then a run of one zero committed at flush
        assert_eq!(encoded, vec![0x14, 0x01, 0x02, 0x00]);
    }

    #[test]
    fn test_literal_run_padding() {
        // 9 alternating values: one full group plus one value padded to 8
        let levels = [0u16, 1, 0, 1, 0, 1, 0, 1, 1];
        let encoded = encode_levels(&levels, 1).unwrap();
        assert_eq!(encoded, vec![0x05, 0b1010_1010, 0b0000_0001]);
    }

    #[test]
    fn test_wider_levels() {
        // Max level 3 needs 2 bits; 8 identical values form a repeated run
        let encoded = encode_levels(&[3u16; 8], 3).unwrap();
        assert_eq!(encoded, vec![0x10, 0x03]);
    }

    #[test]
    fn test_out_of_range_level_rejected() {
        let err = encode_levels(&[0, 2], 1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_empty_input() {
        let encoded = encode_levels(&[], 1).unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_max_buffer_size_bounds_output() {
        let levels: Vec<u16> = (0..1000).map(|i| (i % 2) as u16).collect();
        let encoded = encode_levels(&levels, 1).unwrap();
        assert!(encoded.len() <= max_buffer_size(1, levels.len()));
    }
}
