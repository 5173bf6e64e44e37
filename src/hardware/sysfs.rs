use std::fs;
use std::path::Path;

pub(crate) fn read_to_string_trim<P: AsRef<Path>>(path: P) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(crate) fn read_to_u64<P: AsRef<Path>>(path: P) -> Option<u64> {
    let s = read_to_string_trim(path)?;
    s.parse::<u64>().ok()
}

/// Parse sysfs hex attributes such as `bInterfaceClass` ("0e") or "0x0e".
pub(crate) fn read_hex_u8<P: AsRef<Path>>(path: P) -> Option<u8> {
    let s = read_to_string_trim(path)?;
    u8::from_str_radix(s.trim_start_matches("0x"), 16).ok()
}
