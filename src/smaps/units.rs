//! Parsing of smaps value lines such as `Rss:   1234 kB`.

use super::error::SmapsError;

pub const SIZE_PREFIX: &str = "Size:";
pub const RSS_PREFIX: &str = "Rss:";
pub const PSS_PREFIX: &str = "Pss:";
pub const VM_FLAGS_PREFIX: &str = "VmFlags:";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Parses `<Prefix> <integer> <unit>` and returns the value in bytes.
pub fn parse_memory(line: &str) -> Result<u64, SmapsError> {
    let mut tokens = line.split_whitespace();
    let (Some(_), Some(value), Some(unit)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(SmapsError::TooFewTokens { line: line.into() });
    };

    to_bytes(line, value, unit)
}

/// Converts a numeric token and its unit (`kB`, `mB`, `gB`, any case) to bytes.
pub fn to_bytes(line: &str, value: &str, unit: &str) -> Result<u64, SmapsError> {
    let invalid = || SmapsError::InvalidNumber {
        line: line.into(),
        token: value.into(),
    };

    // u64::from_str also takes a leading '+'
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let num: u64 = value.parse().map_err(|_| invalid())?;

    let factor = unit_factor(unit).ok_or_else(|| SmapsError::UnknownUnit {
        line: line.into(),
        unit: unit.into(),
    })?;

    num.checked_mul(factor)
        .ok_or_else(|| SmapsError::ValueOverflow { line: line.into() })
}

fn unit_factor(unit: &str) -> Option<u64> {
    match unit.to_ascii_lowercase().as_str() {
        "kb" => Some(KIB),
        "mb" => Some(MIB),
        "gb" => Some(GIB),
        _ => None,
    }
}
