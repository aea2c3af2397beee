//! Bitplane payloads: interleaved `BODY` and contiguous `ABIT`.

use amiga_video::{PlanarScreen, pitch_for};

use crate::error::IlbmError;

fn reserve(len: usize) -> Result<Vec<u8>, IlbmError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| IlbmError::Allocation { bytes: len })?;
    Ok(out)
}

fn check_len(data: &[u8], expected: usize) -> Result<(), IlbmError> {
    if data.len() != expected {
        return Err(IlbmError::BadBodySize {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// `BODY` layout: for each scanline, that row of plane 0, then plane 1, …
pub fn interleave(screen: &PlanarScreen) -> Result<Vec<u8>, IlbmError> {
    let planes = usize::from(screen.bit_depth());
    let mut out = reserve(screen.pitch() * screen.height() * planes)?;
    for y in 0..screen.height() {
        for plane in 0..planes {
            out.extend_from_slice(screen.row(plane, y));
        }
    }
    Ok(out)
}

/// Split a `BODY` payload back into one buffer per plane.
pub fn deinterleave(
    body: &[u8],
    width: usize,
    height: usize,
    planes: u8,
) -> Result<Vec<Vec<u8>>, IlbmError> {
    let pitch = pitch_for(width);
    let count = usize::from(planes);
    check_len(body, pitch * height * count)?;
    let mut out = (0..count)
        .map(|_| reserve(pitch * height))
        .collect::<Result<Vec<_>, _>>()?;
    if pitch == 0 {
        return Ok(out);
    }
    for (i, row) in body.chunks_exact(pitch).enumerate() {
        out[i % count].extend_from_slice(row);
    }
    Ok(out)
}

/// `ABIT` layout: every plane whole, plane 0 first.
pub fn join_planes(screen: &PlanarScreen) -> Result<Vec<u8>, IlbmError> {
    let mut out = reserve(screen.planes().iter().map(Vec::len).sum())?;
    for plane in screen.planes() {
        out.extend_from_slice(plane);
    }
    Ok(out)
}

/// Split an `ABIT` payload back into one buffer per plane.
pub fn split_planes(
    data: &[u8],
    width: usize,
    height: usize,
    planes: u8,
) -> Result<Vec<Vec<u8>>, IlbmError> {
    let plane_len = pitch_for(width) * height;
    let count = usize::from(planes);
    check_len(data, plane_len * count)?;
    if plane_len == 0 {
        return Ok(vec![Vec::new(); count]);
    }
    Ok(data.chunks_exact(plane_len).map(<[u8]>::to_vec).collect())
}
