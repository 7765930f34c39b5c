//! Name Scoper
//!
//! Derives a short suffix from the stylesheet source and appends it to names.
//! The suffix is the base-62 encoding of a djb2-style hash of the source text,
//! so identical stylesheets always get identical names.

/// A scoping function: original name in, scoped name out.
pub type ScopeFn = Box<dyn Fn(&str) -> String + Send + Sync>;

const BASE62_CHARS: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const HASH_SEED: u32 = 5381;

/// Appends `_<suffix>` to names, the suffix being derived from one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameScoper {
    suffix: String,
}

impl NameScoper {
    pub fn new(source: &str) -> Self {
        NameScoper {
            suffix: encode_base62(hash_source(source)),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn scope(&self, name: &str) -> String {
        format!("{}_{}", name, self.suffix)
    }
}

/// Build the default scoping function for a stylesheet source.
pub fn make_scoper(source: &str) -> ScopeFn {
    let scoper = NameScoper::new(source);
    Box::new(move |name: &str| scoper.scope(name))
}

/// Hash UTF-16 code units from last to first: `hash = hash * 33 ^ unit`.
pub fn hash_source(source: &str) -> u32 {
    let units: Vec<u16> = source.encode_utf16().collect();
    units.iter().rev().fold(HASH_SEED, |hash, &unit| {
        hash.wrapping_mul(33) ^ u32::from(unit)
    })
}

/// Most significant digit first; zero encodes to `"0"`.
pub fn encode_base62(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE62_CHARS[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base62_digit_boundaries() {
        assert_eq!(encode_base62(0), "0");
        assert_eq!(encode_base62(9), "9");
        assert_eq!(encode_base62(10), "a");
        assert_eq!(encode_base62(36), "A");
        assert_eq!(encode_base62(61), "Z");
        assert_eq!(encode_base62(62), "10");
        assert_eq!(encode_base62(u32::MAX), "4GFfc3");
    }
}
