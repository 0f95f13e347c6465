/*!
    BER-TLV cursor reader and writer.

    Encoding:
    - Tag:    one byte (`0x80`, `0xA0`, `0x30`, ...)
    - Length: short form `0x00..=0x7F`, or long form `0x8N` followed by
              N big-endian length bytes (N = 1..=4)
    - Value:  `length` bytes; for constructed tags, nested TLV records

    The reader is an explicit cursor: tags can be peeked without consuming,
    the last tag can be unread, and any position can be saved with
    [`Reader::mark`] and restored with [`Reader::reset`]. Entering a
    constructed tag narrows the cursor's scope to that value.
*/

use crate::error::{FormatError, FormatResult};

/**
    Saved cursor state, restorable with [`Reader::reset`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pos: usize,
    end: usize,
}

/**
    Forward-only cursor over a BER-TLV byte buffer.
*/
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
    last_tag: Option<usize>,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
            last_tag: None,
        }
    }

    /**
        Current offset into the underlying buffer.
    */
    pub fn position(&self) -> usize {
        self.pos
    }

    /**
        Number of unread bytes left in the current scope.
    */
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.end
    }

    /**
        Save the cursor (position and scope).
    */
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            end: self.end,
        }
    }

    /**
        Restore a cursor saved with [`Reader::mark`].
    */
    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.end = mark.end;
        self.last_tag = None;
    }

    /**
        Tag at the cursor, without consuming it.
    */
    pub fn peek_tag(&self) -> FormatResult<u8> {
        self.data[..self.end]
            .get(self.pos)
            .copied()
            .ok_or(FormatError::Truncated("tag"))
    }

    /**
        Consume the tag at the cursor.
    */
    pub fn read_tag(&mut self) -> FormatResult<u8> {
        let tag = self.peek_tag()?;
        self.last_tag = Some(self.pos);
        self.pos += 1;
        Ok(tag)
    }

    /**
        Step back over the tag consumed by the last [`Reader::read_tag`].
        Does nothing if no tag has been read since the last rewind.
    */
    pub fn unread_last_tag(&mut self) {
        if let Some(pos) = self.last_tag.take() {
            self.pos = pos;
        }
    }

    /**
        Consume a BER length field.
    */
    pub fn read_length(&mut self) -> FormatResult<usize> {
        let first = self.take(1, "length")?[0];
        if first < 0x80 {
            return Ok(first as usize);
        }

        let count = (first & 0x7F) as usize;
        if count == 0 || count > 4 {
            return Err(FormatError::UnsupportedLength(first));
        }

        let len = self
            .take(count, "length")?
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);
        Ok(len)
    }

    /**
        Consume a constructed tag and its length, and descend into its value.

        Returns the value length. After this call the cursor's scope ends at
        the end of the constructed value.
    */
    pub fn enter_constructed(&mut self, tag: u8) -> FormatResult<usize> {
        self.expect_tag(tag)?;
        let len = self.read_length()?;
        if len > self.remaining() {
            return Err(FormatError::Truncated("constructed value"));
        }
        self.end = self.pos + len;
        Ok(len)
    }

    /**
        Consume a primitive with the expected tag and return its value bytes.
    */
    pub fn read_primitive(&mut self, tag: u8) -> FormatResult<&'a [u8]> {
        self.expect_tag(tag)?;
        let len = self.read_length()?;
        self.take(len, "primitive value")
    }

    /**
        All unread bytes in the current scope, without consuming them.
    */
    pub fn peek_unread(&self) -> &'a [u8] {
        &self.data[self.pos..self.end]
    }

    fn expect_tag(&mut self, expected: u8) -> FormatResult<()> {
        let actual = self.read_tag()?;
        if actual != expected {
            return Err(FormatError::UnexpectedTag { expected, actual });
        }
        Ok(())
    }

    fn take(&mut self, n: usize, field: &'static str) -> FormatResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(FormatError::Truncated(field));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}

/**
    BER-TLV encoder emitting minimal length fields.
*/
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Append a primitive record.
    */
    pub fn primitive(&mut self, tag: u8, value: &[u8]) -> &mut Self {
        self.buf.push(tag);
        write_length(&mut self.buf, value.len());
        self.buf.extend_from_slice(value);
        self
    }

    /**
        Append a constructed record whose value is built by `build`.
    */
    pub fn constructed(&mut self, tag: u8, build: impl FnOnce(&mut Writer)) -> &mut Self {
        let mut inner = Writer::new();
        build(&mut inner);
        self.primitive(tag, &inner.buf)
    }

    /**
        Append bytes verbatim, without a tag or length.
    */
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

fn write_length(buf: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        buf.push(len as u8);
        return;
    }

    let bytes = (len as u32).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    buf.push(0x80 | (4 - skip) as u8);
    buf.extend_from_slice(&bytes[skip..]);
}
