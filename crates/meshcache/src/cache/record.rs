use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// One-byte tag opening every record in a cache file.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTag {
    Element = 0x00,
    Mesh = 0x01,
}

impl TryFrom<u8> for RecordTag {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(RecordTag::Element),
            0x01 => Ok(RecordTag::Mesh),
            other => Err(other),
        }
    }
}

pub(crate) fn write_tag(stream: &mut dyn Write, tag: RecordTag) -> std::io::Result<()> {
    stream.write_u8(tag as u8)
}

pub(crate) fn write_element_id(stream: &mut dyn Write, id: u64) -> std::io::Result<()> {
    stream.write_u64::<LittleEndian>(id)
}

pub(crate) fn read_element_id(stream: &mut dyn Read) -> std::io::Result<u64> {
    stream.read_u64::<LittleEndian>()
}

/// Reads the next tag byte; `None` on a clean end of stream.
pub(crate) fn read_tag_byte(stream: &mut dyn Read) -> std::io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
