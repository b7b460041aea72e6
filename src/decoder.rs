//! Pure inverse of [`crate::encoder::compress`]: reconstructs the original
//! bytes from a ZX0 wire-format buffer. Does not re-run the optimizer's
//! search.

use crate::config::INITIAL_OFFSET;
use crate::error::DecodeError;

/// MSB-first bit reader, the mirror image of the encoder's `BitWriter`: raw
/// byte reads always resume at the next byte boundary, discarding whatever
/// bits of the in-progress control byte weren't consumed.
struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bit_mask: u8,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader {
            data,
            byte_pos: 0,
            bit_mask: 0,
        }
    }

    fn read_bit(&mut self) -> Result<u8, DecodeError> {
        if self.bit_mask == 0 {
            if self.byte_pos >= self.data.len() {
                return Err(DecodeError::UnexpectedEof);
            }
            self.bit_mask = 0x80;
        }
        let byte = self.data[self.byte_pos];
        let bit = if byte & self.bit_mask != 0 { 1 } else { 0 };
        self.bit_mask >>= 1;
        if self.bit_mask == 0 {
            self.byte_pos += 1;
        }
        Ok(bit)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        if self.bit_mask != 0 {
            self.byte_pos += 1;
            self.bit_mask = 0;
        }
        if self.byte_pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof);
        }
        let b = self.data[self.byte_pos];
        self.byte_pos += 1;
        Ok(b)
    }

    fn read_interlaced_elias_gamma(
        &mut self,
        backwards_mode: bool,
        invert_mode: bool,
    ) -> Result<u32, DecodeError> {
        let (cont, _stop) = if backwards_mode { (0u8, 1u8) } else { (1u8, 0u8) };
        let mut value: u32 = 1;
        loop {
            let c = self.read_bit()?;
            if c == cont {
                let raw = self.read_bit()?;
                let bit = if invert_mode { 1 - raw } else { raw };
                value = (value << 1) | bit as u32;
            } else {
                break;
            }
        }
        Ok(value)
    }
}

#[derive(PartialEq, Eq)]
enum Expect {
    Literal,
    Match,
}

fn copy_match(out: &mut Vec<u8>, offset: usize, length: usize) -> Result<(), DecodeError> {
    if offset == 0 || offset > out.len() {
        return Err(DecodeError::OffsetOutOfRange);
    }
    let start = out.len() - offset;
    for i in 0..length {
        let b = out[start + i];
        out.push(b);
    }
    Ok(())
}

/// Reconstructs the original bytes from a ZX0 wire-format buffer produced by
/// [`crate::encoder::compress`] with the same `backwards_mode`.
pub fn decompress(input: &[u8], backwards_mode: bool) -> Result<Vec<u8>, DecodeError> {
    let mut br = BitReader::new(input);
    let mut out = Vec::new();
    let mut last_offset = INITIAL_OFFSET;
    let mut expect = Expect::Literal;
    let mut first = true;

    loop {
        let flag = if first {
            0
        } else {
            br.read_bit()?
        };
        first = false;

        if flag == 0 {
            match expect {
                Expect::Literal => {
                    let length = br.read_interlaced_elias_gamma(backwards_mode, false)? as usize;
                    for _ in 0..length {
                        out.push(br.read_byte()?);
                    }
                    expect = Expect::Match;
                }
                Expect::Match => {
                    let length = br.read_interlaced_elias_gamma(backwards_mode, false)? as usize;
                    copy_match(&mut out, last_offset, length)?;
                    expect = Expect::Literal;
                }
            }
        } else {
            let high = br.read_interlaced_elias_gamma(backwards_mode, backwards_mode)?;
            if high == 256 {
                break;
            }
            let raw = br.read_byte()?;
            let byte = if backwards_mode { raw.reverse_bits() } else { raw };
            let low7 = (byte >> 1) as usize;
            let offset = (high as usize - 1) * 128 + low7 + 1;
            let length = br.read_interlaced_elias_gamma(backwards_mode, false)? as usize + 1;
            copy_match(&mut out, offset, length)?;
            last_offset = offset;
            expect = Expect::Literal;
        }
    }

    Ok(out)
}
