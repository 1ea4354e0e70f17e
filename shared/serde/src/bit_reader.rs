use crate::SerdeErr;

/// Cursor over an incoming bit stream produced by a [`BitWriter`](crate::BitWriter)
pub struct BitReader<'b> {
    scratch: u8,
    scratch_index: u8,
    buffer: &'b [u8],
    buffer_index: usize,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer,
            buffer_index: 0,
        }
    }

    /// Number of bits not yet consumed, including padding in the final byte
    pub fn bits_remaining(&self) -> u32 {
        let unread_bytes = (self.buffer.len() - self.buffer_index) as u32;
        unread_bytes * 8 + self.scratch_index as u32
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.scratch_index == 0 {
            let Some(byte) = self.buffer.get(self.buffer_index) else {
                return Err(SerdeErr::EndOfStream { needed: 1 });
            };

            self.scratch = *byte;
            self.buffer_index += 1;
            self.scratch_index += 8;
        }

        let value = self.scratch & 1;

        self.scratch >>= 1;
        self.scratch_index -= 1;

        Ok(value != 0)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        if self.bits_remaining() < 8 {
            return Err(SerdeErr::EndOfStream {
                needed: 8 - self.bits_remaining(),
            });
        }

        let mut output = 0u8;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }
}
