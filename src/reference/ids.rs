//! Collision-free identifier and code allocation.
//!
//! Both allocators are linear probes over an unbounded suffix counter, so
//! allocation always terminates and never reports a collision as an error.

use std::collections::HashSet;
use tracing::debug;

use crate::TARGET_RECONCILE;

const CODE_LENGTH: usize = 3;
const CODE_FILLER: char = 'X';
const UNKNOWN_CODE: &str = "UNK";

/// Hands out identifiers, suffixing `_2`, `_3`, ... on collision.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    /// Allocator with `reserved` already taken (the sentinel identifier).
    pub fn reserving(reserved: &str) -> Self {
        let mut used = HashSet::new();
        used.insert(reserved.to_string());
        Self { used }
    }

    pub fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut suffix: u64 = 2;
        loop {
            let candidate = format!("{}_{}", base, suffix);
            if self.used.insert(candidate.clone()) {
                debug!(target: TARGET_RECONCILE, "Identifier '{}' taken, using '{}'", base, candidate);
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Hands out short codes; on collision keeps the first two characters of
/// the candidate and appends 1, 2, 3, ...
#[derive(Debug, Clone, Default)]
pub struct CodeAllocator {
    used: HashSet<String>,
}

impl CodeAllocator {
    pub fn reserving(reserved: &str) -> Self {
        let mut used = HashSet::new();
        used.insert(reserved.to_string());
        Self { used }
    }

    pub fn allocate(&mut self, candidate: &str) -> String {
        if self.used.insert(candidate.to_string()) {
            return candidate.to_string();
        }

        let prefix: String = candidate.chars().take(2).collect();
        let mut suffix: u64 = 1;
        loop {
            let code = format!("{}{}", prefix, suffix);
            if self.used.insert(code.clone()) {
                debug!(target: TARGET_RECONCILE, "Code '{}' taken, using '{}'", candidate, code);
                return code;
            }
            suffix += 1;
        }
    }
}

/// First three ASCII letters of the display name, upper-cased and padded with `X`.
pub fn heuristic_code(display: &str) -> String {
    let letters: String = display
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(CODE_LENGTH)
        .collect::<String>()
        .to_ascii_uppercase();

    let mut code = if letters.is_empty() {
        UNKNOWN_CODE.to_string()
    } else {
        letters
    };
    while code.len() < CODE_LENGTH {
        code.push(CODE_FILLER);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_suffixes() {
        let mut ids = IdAllocator::reserving("COUNTRY_DEFAULT");
        assert_eq!(ids.allocate("COUNTRY_FRANCE"), "COUNTRY_FRANCE");
        assert_eq!(ids.allocate("COUNTRY_FRANCE"), "COUNTRY_FRANCE_2");
        assert_eq!(ids.allocate("COUNTRY_FRANCE"), "COUNTRY_FRANCE_3");
        assert_eq!(ids.allocate("COUNTRY_DEFAULT"), "COUNTRY_DEFAULT_2");
        assert_eq!(ids.allocate("COUNTRY_FRANCE_3"), "COUNTRY_FRANCE_3_2");
    }

    #[test]
    fn test_id_allocator_skips_preexisting_suffix() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate("A_2"), "A_2");
        assert_eq!(ids.allocate("A"), "A");
        assert_eq!(ids.allocate("A"), "A_3");
    }

    #[test]
    fn test_code_allocator_probe() {
        let mut codes = CodeAllocator::reserving("WLD");
        assert_eq!(codes.allocate("GEO"), "GEO");
        assert_eq!(codes.allocate("GEO"), "GE1");
        assert_eq!(codes.allocate("GEO"), "GE2");
        assert_eq!(codes.allocate("WLD"), "WL1");
    }

    #[test]
    fn test_heuristic_code() {
        assert_eq!(heuristic_code("France"), "FRA");
        assert_eq!(heuristic_code("Côte D Ivoire"), "CTE");
        assert_eq!(heuristic_code("Wu"), "WUX");
        assert_eq!(heuristic_code("Ö"), "UNK");
    }
}
