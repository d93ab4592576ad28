const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// 64-bit FNV-1a hash of a token.
fn fnv1a(token: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in token.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Computes the 64-bit SimHash of `content`.
///
/// Tokens are the lowercase alphanumeric words of the content. Every token
/// votes on each bit of the fingerprint with its FNV-1a hash; bits with a
/// positive total are set. Content without tokens fingerprints to 0.
pub fn fingerprint(content: &str) -> u64 {
    let mut votes = [0i32; 64];
    let mut seen = false;

    for token in content
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        seen = true;
        let h = fnv1a(&token.to_lowercase());
        for (bit, vote) in votes.iter_mut().enumerate() {
            if h >> bit & 1 == 1 {
                *vote += 1;
            } else {
                *vote -= 1;
            }
        }
    }

    if !seen {
        return 0;
    }

    votes
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0)
        .fold(0u64, |fp, (bit, _)| fp | 1 << bit)
}

/// Number of differing bits between two fingerprints.
pub fn hamming(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a(""), FNV_OFFSET);
        assert_eq!(fnv1a("a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_single_token_is_its_hash() {
        assert_eq!(fingerprint("hello"), fnv1a("hello"));
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(fingerprint("Hello, World!"), fingerprint("hello world"));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(fingerprint(""), 0);
        assert_eq!(fingerprint("  ...  "), 0);
    }

    #[test]
    fn test_identical_content() {
        let a = fingerprint("the quick brown fox jumps over the lazy dog");
        let b = fingerprint("the quick brown fox jumps over the lazy dog");
        assert_eq!(hamming(a, b), 0);
    }

    #[test]
    fn test_hamming() {
        assert_eq!(hamming(0, 0), 0);
        assert_eq!(hamming(0, u64::MAX), 64);
        assert_eq!(hamming(0b1010, 0b0110), 2);
    }
}
