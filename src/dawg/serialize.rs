//! Binary format of a [`DawgMap`].
//!
//! ```text
//! magic        [u8; 4] = "DAWG"
//! version      u16
//! flags        u16       bit 0: minimized
//! num_keys     u64
//! num_states   u32
//! num_units    u32
//! mapper_len   u32       number of code table entries
//! num_values   u32
//! base         [u32; num_units]
//! check        [u32; num_units]
//! mapper       mapper_len x (char: u32, code: u32), chars increasing
//! values       num_values x (len: u32, bytes: [u8; len])
//! crc32        u32       over everything before it
//! ```
//!
//! All integers are little-endian. Loading verifies the checksum first and
//! then every count and every unit, so a damaged file is reported as
//! [`DawgError::CorruptData`] instead of producing a map that misbehaves.

use std::io::{Read, Write};

use super::double_array::DoubleArray;
use super::map::DawgMap;
use super::mapper::CodeMapper;
use super::values::ValueStore;
use crate::errors::{DawgError, Result};

const MAGIC: &[u8; 4] = b"DAWG";
const VERSION: u16 = 1;
const FLAG_MINIMIZED: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 2 + 8 + 4 * 4;
const FOOTER_LEN: usize = 4;

/// Conversion of values to and from bytes.
///
/// Each value is stored as a length-prefixed byte string, so an
/// implementation only has to handle its own bytes.
pub trait ValueCodec: Sized {
    /// Appends the encoding of `self` to `out`.
    fn encode_value(&self, out: &mut Vec<u8>);

    /// Decodes a value from exactly the bytes `encode_value` wrote.
    ///
    /// # Errors
    ///
    /// Should return [`DawgError::CorruptData`] if `bytes` is not a valid
    /// encoding.
    fn decode_value(bytes: &[u8]) -> Result<Self>;
}

macro_rules! le_codec {
    ($($t:ty),*) => {$(
        impl ValueCodec for $t {
            fn encode_value(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn decode_value(bytes: &[u8]) -> Result<Self> {
                let bytes = bytes.try_into().map_err(|_| {
                    DawgError::corrupt_data(format!(
                        "{} bytes for a {}",
                        bytes.len(),
                        stringify!($t)
                    ))
                })?;
                Ok(<$t>::from_le_bytes(bytes))
            }
        }
    )*};
}

le_codec!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl ValueCodec for usize {
    fn encode_value(&self, out: &mut Vec<u8>) {
        (*self as u64).encode_value(out);
    }

    fn decode_value(bytes: &[u8]) -> Result<Self> {
        let value = u64::decode_value(bytes)?;
        usize::try_from(value)
            .map_err(|_| DawgError::corrupt_data(format!("{value} does not fit in usize")))
    }
}

impl ValueCodec for bool {
    fn encode_value(&self, out: &mut Vec<u8>) {
        out.push(*self as u8);
    }

    fn decode_value(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [0] => Ok(false),
            [1] => Ok(true),
            _ => Err(DawgError::corrupt_data("invalid bool")),
        }
    }
}

impl ValueCodec for String {
    fn encode_value(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn decode_value(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| DawgError::corrupt_data(format!("invalid string value: {e}")))
    }
}

impl ValueCodec for Vec<u8> {
    fn encode_value(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn decode_value(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl ValueCodec for () {
    fn encode_value(&self, _out: &mut Vec<u8>) {}

    fn decode_value(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            Ok(())
        } else {
            Err(DawgError::corrupt_data("unit value with payload"))
        }
    }
}

fn put_u32_len(out: &mut Vec<u8>, len: usize, what: &str) -> Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| DawgError::invalid_input("map", format!("{what} {len} exceeds u32")))?;
    out.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

/// Bounds-checked cursor over the body of a serialized map.
struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.data.len() {
            return Err(DawgError::corrupt_data(format!(
                "{n} bytes needed, {} left",
                self.data.len()
            )));
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u16(&mut self) -> Result<u16> {
        self.array().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32> {
        self.array().map(u32::from_le_bytes)
    }

    fn u64(&mut self) -> Result<u64> {
        self.array().map(u64::from_le_bytes)
    }

    fn u32s(&mut self, count: usize) -> Result<Vec<u32>> {
        let len = count
            .checked_mul(4)
            .ok_or_else(|| DawgError::corrupt_data("array length overflows"))?;
        Ok(self
            .take(len)?
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

impl<V: ValueCodec> DawgMap<V> {
    /// Serializes the map.
    ///
    /// # Errors
    ///
    /// [`DawgError::InvalidInput`] is returned if an encoded value is longer
    /// than `u32::MAX` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let da = self.double_array();
        let mapper = self.mapper();
        let values = self.values();

        let mut out = Vec::with_capacity(
            HEADER_LEN
                + 8 * (da.num_units() + mapper.alphabet_size() as usize)
                + 8 * values.len()
                + FOOTER_LEN,
        );
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        let flags = if self.is_minimized() { FLAG_MINIMIZED } else { 0 };
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        put_u32_len(&mut out, self.num_states(), "state count")?;
        put_u32_len(&mut out, da.num_units(), "unit count")?;
        put_u32_len(&mut out, mapper.alphabet_size() as usize, "code table length")?;
        put_u32_len(&mut out, values.len(), "value count")?;

        for &unit in da.base().iter().chain(da.check()) {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        for (ch, code) in mapper.entries() {
            out.extend_from_slice(&(ch as u32).to_le_bytes());
            out.extend_from_slice(&code.to_le_bytes());
        }

        let mut buf = Vec::new();
        for value in values.iter() {
            buf.clear();
            value.encode_value(&mut buf);
            put_u32_len(&mut out, buf.len(), "value length")?;
            out.extend_from_slice(&buf);
        }

        let crc = crc32fast::hash(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        Ok(out)
    }

    /// Loads a map written by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// [`DawgError::CorruptData`] is returned if the checksum does not match,
    /// the header is not recognized, or any count or unit is out of range.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN + FOOTER_LEN {
            return Err(DawgError::corrupt_data(format!(
                "{} bytes is too short for a map",
                data.len()
            )));
        }
        let (body, footer) = data.split_at(data.len() - FOOTER_LEN);
        let stored = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
        let actual = crc32fast::hash(body);
        if stored != actual {
            return Err(DawgError::corrupt_data(format!(
                "checksum mismatch: stored {stored:#010x}, computed {actual:#010x}"
            )));
        }

        let mut r = Reader { data: body };
        if r.take(4)? != MAGIC {
            return Err(DawgError::corrupt_data("bad magic"));
        }
        let version = r.u16()?;
        if version != VERSION {
            return Err(DawgError::corrupt_data(format!(
                "unsupported version {version}"
            )));
        }
        let flags = r.u16()?;
        if flags & !FLAG_MINIMIZED != 0 {
            return Err(DawgError::corrupt_data(format!("unknown flags {flags:#06x}")));
        }
        let num_keys = r.u64()?;
        let num_keys = usize::try_from(num_keys)
            .map_err(|_| DawgError::corrupt_data(format!("{num_keys} keys do not fit in usize")))?;
        let num_states = r.u32()?;
        let num_units = r.u32()?;
        let mapper_len = r.u32()?;
        let num_values = r.u32()?;

        let base = r.u32s(num_units as usize)?;
        let check = r.u32s(num_units as usize)?;
        let entries: Vec<(u32, u32)> = r
            .u32s(2 * mapper_len as usize)?
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();

        // Each value takes at least its length prefix.
        if num_values as usize > r.data.len() / 4 {
            return Err(DawgError::corrupt_data(format!(
                "{num_values} values cannot fit in {} bytes",
                r.data.len()
            )));
        }
        let mut values = Vec::with_capacity(num_values as usize);
        for _ in 0..num_values {
            let len = r.u32()? as usize;
            values.push(V::decode_value(r.take(len)?)?);
        }
        if !r.data.is_empty() {
            return Err(DawgError::corrupt_data(format!(
                "{} trailing bytes",
                r.data.len()
            )));
        }
        if num_values as usize > num_keys {
            return Err(DawgError::corrupt_data(format!(
                "{num_values} values for {num_keys} keys"
            )));
        }

        let mapper = CodeMapper::from_entries(&entries)?;
        let da = DoubleArray::from_parts(base, check);
        da.validate(mapper.alphabet_size(), values.len())?;

        log::debug!(
            "loaded map with {num_keys} keys, {num_units} units, {num_values} values"
        );
        Ok(DawgMap::from_parts(
            da,
            mapper,
            ValueStore::from_vec(values),
            num_keys,
            num_states as usize,
            flags & FLAG_MINIMIZED != 0,
        ))
    }

    /// Writes the serialized map to `writer`.
    ///
    /// # Errors
    ///
    /// See [`to_bytes`](Self::to_bytes); I/O failures are returned as
    /// [`DawgError::Io`].
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_bytes()?)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a map from `reader` until end of input.
    ///
    /// # Errors
    ///
    /// See [`from_bytes`](Self::from_bytes); I/O failures are returned as
    /// [`DawgError::Io`].
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }
}
