use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Error, ErrorKind, Read, Result, Write};

use crate::{
    codec::{ElementCodec, MeshCodec},
    content::{Element, ElementGeometry, GeoCoordinate, Mesh, Tag},
};

const GEOMETRY_POINT: u8 = 0;
const GEOMETRY_WAY: u8 = 1;
const GEOMETRY_AREA: u8 = 2;

const MAX_ARRAY_LEN: u32 = 1 << 24;

// Arrays are read chunk by chunk so a garbage length prefix only costs what the stream holds.
const READ_CHUNK: usize = 4096;

/// Little-endian, length-prefixed encoding of meshes and elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryCodec;

fn write_len(stream: &mut dyn Write, len: usize) -> Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| Error::new(ErrorKind::InvalidInput, "array too long for cache record"))?;
    stream.write_u32::<LittleEndian>(len)
}

fn read_len(stream: &mut dyn Read) -> Result<usize> {
    let len = stream.read_u32::<LittleEndian>()?;
    if len > MAX_ARRAY_LEN {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("array length {len} exceeds limit"),
        ));
    }
    Ok(len as usize)
}

fn write_string(stream: &mut dyn Write, value: &str) -> Result<()> {
    write_len(stream, value.len())?;
    stream.write_all(value.as_bytes())
}

fn read_chunked<T, F>(stream: &mut dyn Read, len: usize, mut read_into: F) -> Result<Vec<T>>
where
    T: Copy + Default,
    F: FnMut(&mut dyn Read, &mut [T]) -> Result<()>,
{
    let mut values = Vec::with_capacity(len.min(READ_CHUNK));
    let mut chunk = [T::default(); READ_CHUNK];
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(READ_CHUNK);
        read_into(stream, &mut chunk[..n])?;
        values.extend_from_slice(&chunk[..n]);
        remaining -= n;
    }
    Ok(values)
}

fn read_string(stream: &mut dyn Read) -> Result<String> {
    let len = read_len(stream)?;
    let mut buf = Vec::with_capacity(len.min(READ_CHUNK));
    stream.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(Error::new(ErrorKind::UnexpectedEof, "truncated string"));
    }
    String::from_utf8(buf).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}

fn write_f64s(stream: &mut dyn Write, values: &[f64]) -> Result<()> {
    write_len(stream, values.len())?;
    values
        .iter()
        .try_for_each(|v| stream.write_f64::<LittleEndian>(*v))
}

fn read_f64s(stream: &mut dyn Read) -> Result<Vec<f64>> {
    let len = read_len(stream)?;
    read_chunked(stream, len, |s, dst| s.read_f64_into::<LittleEndian>(dst))
}

fn write_u32s(stream: &mut dyn Write, values: &[u32]) -> Result<()> {
    write_len(stream, values.len())?;
    values
        .iter()
        .try_for_each(|v| stream.write_u32::<LittleEndian>(*v))
}

fn read_u32s(stream: &mut dyn Read) -> Result<Vec<u32>> {
    let len = read_len(stream)?;
    read_chunked(stream, len, |s, dst| s.read_u32_into::<LittleEndian>(dst))
}

fn write_coordinates(stream: &mut dyn Write, coordinates: &[GeoCoordinate]) -> Result<()> {
    write_len(stream, coordinates.len())?;
    for c in coordinates {
        stream.write_f64::<LittleEndian>(c.latitude)?;
        stream.write_f64::<LittleEndian>(c.longitude)?;
    }
    Ok(())
}

fn read_coordinate(stream: &mut dyn Read) -> Result<GeoCoordinate> {
    Ok(GeoCoordinate {
        latitude: stream.read_f64::<LittleEndian>()?,
        longitude: stream.read_f64::<LittleEndian>()?,
    })
}

fn read_coordinates(stream: &mut dyn Read) -> Result<Vec<GeoCoordinate>> {
    let len = read_len(stream)?;
    let mut coordinates = Vec::with_capacity(len.min(READ_CHUNK));
    for _ in 0..len {
        coordinates.push(read_coordinate(stream)?);
    }
    Ok(coordinates)
}

impl MeshCodec for BinaryCodec {
    fn write(&self, stream: &mut dyn Write, mesh: &Mesh) -> Result<()> {
        write_string(stream, &mesh.name)?;
        write_f64s(stream, &mesh.vertices)?;
        write_u32s(stream, &mesh.triangles)?;
        write_u32s(stream, &mesh.colors)?;
        write_f64s(stream, &mesh.uvs)?;
        write_u32s(stream, &mesh.uv_map)
    }

    fn read(&self, stream: &mut dyn Read) -> Result<Mesh> {
        Ok(Mesh {
            name: read_string(stream)?,
            vertices: read_f64s(stream)?,
            triangles: read_u32s(stream)?,
            colors: read_u32s(stream)?,
            uvs: read_f64s(stream)?,
            uv_map: read_u32s(stream)?,
        })
    }
}

impl ElementCodec for BinaryCodec {
    fn write(&self, stream: &mut dyn Write, element: &Element) -> Result<()> {
        write_len(stream, element.tags.len())?;
        for tag in &element.tags {
            stream.write_u32::<LittleEndian>(tag.key)?;
            stream.write_u32::<LittleEndian>(tag.value)?;
        }

        match &element.geometry {
            ElementGeometry::Point(c) => {
                stream.write_u8(GEOMETRY_POINT)?;
                stream.write_f64::<LittleEndian>(c.latitude)?;
                stream.write_f64::<LittleEndian>(c.longitude)
            }
            ElementGeometry::Way(coordinates) => {
                stream.write_u8(GEOMETRY_WAY)?;
                write_coordinates(stream, coordinates)
            }
            ElementGeometry::Area(coordinates) => {
                stream.write_u8(GEOMETRY_AREA)?;
                write_coordinates(stream, coordinates)
            }
        }
    }

    fn read(&self, stream: &mut dyn Read, id: u64) -> Result<Element> {
        let tag_count = read_len(stream)?;
        let mut tags = Vec::with_capacity(tag_count.min(1024));
        for _ in 0..tag_count {
            tags.push(Tag {
                key: stream.read_u32::<LittleEndian>()?,
                value: stream.read_u32::<LittleEndian>()?,
            });
        }

        let geometry = match stream.read_u8()? {
            GEOMETRY_POINT => ElementGeometry::Point(read_coordinate(stream)?),
            GEOMETRY_WAY => ElementGeometry::Way(read_coordinates(stream)?),
            GEOMETRY_AREA => ElementGeometry::Area(read_coordinates(stream)?),
            kind => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("unknown element geometry kind {kind}"),
                ))
            }
        };

        Ok(Element { id, tags, geometry })
    }
}
