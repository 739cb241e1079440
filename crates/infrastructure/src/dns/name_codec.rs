//! Domain name encoding and decoding.
//!
//! Names are written as length-prefixed labels closed by a zero byte. On the
//! read side a length byte with both top bits set is a compression pointer
//! into the same message; `copy_name` follows those, `skip_name` only steps
//! over them.

use ferrous_resolv_domain::WireError;
use std::net::Ipv4Addr;

use super::wire::{Cursor, Writer};

/// Longest label, in bytes.
pub const LABEL_MAX: usize = 63;

/// Name size budget. An encoded name, terminator included, must fit in
/// `NAME_MAX - 1` bytes; a decoded name is charged `len + 1` per label.
pub const NAME_MAX: usize = 256;

/// Upper bound on compression pointers followed while decoding one name.
pub const MAX_POINTER_HOPS: usize = NAME_MAX / 2;

const POINTER: u8 = 0xc0;

const REVERSE_SUFFIX: [&[u8]; 2] = [b"in-addr", b"arpa"];

/// Encodes `hostname` as a question name.
///
/// A single-label hostname gets `suffix` appended, once. A trailing dot is
/// accepted and marks the name as already qualified. Returns the number of
/// bytes written; on error the output must not be used.
pub fn encode_question_name(
    out: &mut Writer<'_>,
    hostname: &str,
    suffix: Option<&str>,
) -> Result<usize, WireError> {
    if hostname.is_empty() {
        return Err(WireError::EmptyName);
    }

    let qualified = hostname.strip_suffix('.').unwrap_or(hostname);
    let suffix = suffix
        .filter(|_| !hostname.contains('.'))
        .map(|s| s.strip_suffix('.').unwrap_or(s))
        .filter(|s| !s.is_empty());

    let mut encoded = 0;
    for label in qualified.split('.') {
        put_label(out, label.as_bytes(), &mut encoded)?;
    }
    if let Some(suffix) = suffix {
        for label in suffix.split('.') {
            put_label(out, label.as_bytes(), &mut encoded)?;
        }
    }

    out.put_u8(0)?;
    Ok(encoded + 1)
}

/// Encodes the reverse-lookup name of `address`, e.g. `34.216.184.93.in-addr.arpa`.
pub fn encode_ptr_name(out: &mut Writer<'_>, address: Ipv4Addr) -> Result<usize, WireError> {
    let mut encoded = 0;
    let mut digits = [0u8; 3];

    for octet in address.octets().into_iter().rev() {
        put_label(out, decimal(octet, &mut digits), &mut encoded)?;
    }
    for label in REVERSE_SUFFIX {
        put_label(out, label, &mut encoded)?;
    }

    out.put_u8(0)?;
    Ok(encoded + 1)
}

/// Steps over one name without following compression pointers.
pub fn skip_name(cursor: &mut Cursor<'_>) -> Result<(), WireError> {
    loop {
        let len = cursor.read_u8()?;
        match len & POINTER {
            0 if len == 0 => return Ok(()),
            0 => cursor.skip(usize::from(len))?,
            POINTER => return cursor.skip(1),
            _ => return Err(WireError::BadLabelType(len)),
        }
    }
}

/// Decodes the name starting at `start` in `message` into dotted text.
///
/// `out` must hold at least `NAME_MAX` bytes. Returns the text length; no
/// terminator is written. Pointers may land anywhere inside `message`; loops
/// are cut off by the name budget and `MAX_POINTER_HOPS`.
pub fn copy_name(message: &[u8], start: usize, out: &mut [u8]) -> Result<usize, WireError> {
    if out.len() < NAME_MAX {
        return Err(WireError::OutputTooSmall);
    }

    let mut cursor = Cursor::at(message, start)?;
    let mut budget = NAME_MAX;
    let mut written = 0;
    let mut hops = 0;

    loop {
        let len = cursor.read_u8()?;
        match len & POINTER {
            POINTER => {
                let low = cursor.read_u8()?;
                let target = (usize::from(len & !POINTER) << 8) | usize::from(low);
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(WireError::TooManyPointers);
                }
                if target >= message.len() {
                    return Err(WireError::PointerOutOfRange(target));
                }
                cursor.seek(target)?;
            }
            // a pointer landed on a terminator: drop the separator already emitted
            0 if len == 0 => {
                return match written {
                    0 => Err(WireError::EmptyName),
                    n => Ok(n - 1),
                };
            }
            0 => {
                let len = usize::from(len);
                if budget < len + 1 {
                    return Err(WireError::NameTooLong);
                }
                budget -= len + 1;

                let label = cursor.read_slice(len)?;
                out[written..written + len].copy_from_slice(label);
                written += len;

                if cursor.peek_u8()? == 0 {
                    return Ok(written);
                }
                out[written] = b'.';
                written += 1;
            }
            _ => return Err(WireError::BadLabelType(len)),
        }
    }
}

fn put_label(out: &mut Writer<'_>, label: &[u8], encoded: &mut usize) -> Result<(), WireError> {
    if label.is_empty() {
        return Err(WireError::EmptyLabel);
    }
    if label.len() > LABEL_MAX {
        return Err(WireError::LabelTooLong);
    }
    // room must remain for the terminating zero label
    if *encoded + 1 + label.len() + 1 > NAME_MAX - 1 {
        return Err(WireError::NameTooLong);
    }

    out.put_u8(label.len() as u8)?;
    out.put_slice(label)?;
    *encoded += 1 + label.len();
    Ok(())
}

fn decimal(value: u8, digits: &mut [u8; 3]) -> &[u8] {
    let mut n = value;
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &digits[start..]
}
