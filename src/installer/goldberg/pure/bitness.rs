//! DLL bitness detection

const IMAGE_FILE_MACHINE_I386: u16 = 0x014c;
const IMAGE_FILE_MACHINE_AMD64: u16 = 0x8664;

/// Read the machine field of a PE image. `None` if `bytes` isn't a PE file.
pub fn pe_is_64bit(bytes: &[u8]) -> Option<bool> {
    if bytes.len() < 0x40 || &bytes[0..2] != b"MZ" {
        return None;
    }
    let pe_offset = u32::from_le_bytes(bytes[0x3c..0x40].try_into().ok()?) as usize;
    let header = bytes.get(pe_offset..pe_offset.checked_add(6)?)?;
    if &header[0..4] != b"PE\0\0" {
        return None;
    }
    match u16::from_le_bytes([header[4], header[5]]) {
        IMAGE_FILE_MACHINE_AMD64 => Some(true),
        IMAGE_FILE_MACHINE_I386 => Some(false),
        _ => None,
    }
}

/// Bitness of a Steam API library: the PE header when readable, otherwise the file name
/// (`steam_api64.dll` is 64-bit, anything else is taken as 32-bit)
pub fn detect_bitness(filename: &str, header: Option<&[u8]>) -> bool {
    if let Some(is_64bit) = header.and_then(pe_is_64bit) {
        return is_64bit;
    }
    filename.eq_ignore_ascii_case("steam_api64.dll")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pe_image(machine: u16) -> Vec<u8> {
        let mut bytes = vec![0u8; 0x90];
        bytes[0..2].copy_from_slice(b"MZ");
        bytes[0x3c..0x40].copy_from_slice(&0x80u32.to_le_bytes());
        bytes[0x80..0x84].copy_from_slice(b"PE\0\0");
        bytes[0x84..0x86].copy_from_slice(&machine.to_le_bytes());
        bytes
    }

    #[test]
    fn test_pe_machine_field() {
        assert_eq!(pe_is_64bit(&pe_image(0x8664)), Some(true));
        assert_eq!(pe_is_64bit(&pe_image(0x014c)), Some(false));
        assert_eq!(pe_is_64bit(b"not a dll"), None);
    }

    #[test]
    fn test_header_beats_filename() {
        // A 64-bit image that kept the 32-bit name
        assert!(detect_bitness("steam_api.dll", Some(&pe_image(0x8664))));
        assert!(!detect_bitness("steam_api64.dll", Some(&pe_image(0x014c))));
    }

    #[test]
    fn test_filename_fallback() {
        assert!(detect_bitness("steam_api64.dll", None));
        assert!(!detect_bitness("steam_api.dll", Some(b"garbage")));
    }

    #[test]
    fn test_truncated_header_offset() {
        let mut bytes = pe_image(0x8664);
        bytes[0x3c..0x40].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        assert_eq!(pe_is_64bit(&bytes), None);
    }
}
