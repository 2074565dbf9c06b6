// Bounds-checked byte views used by the header and token codecs.
//
// `ByteReader` walks an input slice and returns `None` instead of reading
// past its end; `ByteWriter` fills a caller-provided slice and refuses
// writes that would not fit.  Neither ever reallocates.

/// Forward-only reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    /// Read exactly `N` bytes, or nothing if fewer remain.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = *self.data.get(self.pos..)?.first_chunk::<N>()?;
        self.pos += N;
        Some(bytes)
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32_le(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Unread tail of the slice.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }
}

/// Writer into a fixed-capacity borrowed slice.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Append `bytes` if they fit entirely; otherwise write nothing and
    /// return `false`.
    #[inline]
    pub fn put_slice(&mut self, bytes: &[u8]) -> bool {
        let Some(dst) = self.buf.get_mut(self.pos..self.pos + bytes.len()) else {
            return false;
        };
        dst.copy_from_slice(bytes);
        self.pos += bytes.len();
        true
    }

    #[inline]
    pub fn put_u8(&mut self, b: u8) -> bool {
        self.put_slice(&[b])
    }

    /// The filled prefix of the buffer.
    #[inline]
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}
