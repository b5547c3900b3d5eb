//! Duplicate code block detection.
//!
//! Slides a window of `min_block_units` consecutive normalized units over
//! each file, fingerprints every window, and groups equal windows across
//! the file set. Matches are extended to their maximal run before
//! reporting, so a 12-line copy produces one finding at the run start
//! instead of seven overlapping window hits. Windows never span files.
//!
//! The whole pass is a pure function of the unit sequences: same input,
//! same findings.

use std::collections::{HashMap, HashSet};

use crate::normalize::NormalizedUnit;

use super::types::{Finding, Location, Rule, Severity};

/// One file's units, paired with its path for reporting.
#[derive(Debug)]
pub struct FileUnits {
    pub path: String,
    pub units: Vec<NormalizedUnit>,
}

/// FNV-1a over a window of unit keys.
fn window_fingerprint(units: &[NormalizedUnit]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for unit in units {
        for byte in unit.key.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x100000001b3);
        }
        hash ^= u64::from(b'\n');
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[derive(Debug, Clone, Copy)]
struct WindowOcc {
    file_id: usize,
    start: usize,
}

/// A maximal duplicated run between two positions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
struct MatchKey {
    file_a: usize,
    start_a: usize,
    file_b: usize,
    start_b: usize,
    len: usize,
}

/// Extend a seed match of `seed_len` units to its maximal equal run.
fn maximal_match(
    a: &[NormalizedUnit],
    mut start_a: usize,
    b: &[NormalizedUnit],
    mut start_b: usize,
    seed_len: usize,
) -> (usize, usize, usize) {
    let mut len = seed_len;
    while start_a > 0 && start_b > 0 && a[start_a - 1].key == b[start_b - 1].key {
        start_a -= 1;
        start_b -= 1;
        len += 1;
    }
    while start_a + len < a.len()
        && start_b + len < b.len()
        && a[start_a + len].key == b[start_b + len].key
    {
        len += 1;
    }
    (start_a, start_b, len)
}

/// Find duplicated blocks of at least `min_units` normalized units.
///
/// Each group of equal maximal runs yields one finding anchored at the
/// first occurrence in (file, line) order, with every other occurrence
/// listed as a related location.
pub fn find_duplicate_blocks(files: &[FileUnits], min_units: usize) -> Vec<Finding> {
    let mut fingerprints: HashMap<u64, Vec<WindowOcc>> = HashMap::new();
    for (file_id, file) in files.iter().enumerate() {
        if file.units.len() < min_units {
            continue;
        }
        for start in 0..=(file.units.len() - min_units) {
            let hash = window_fingerprint(&file.units[start..start + min_units]);
            fingerprints
                .entry(hash)
                .or_default()
                .push(WindowOcc { file_id, start });
        }
    }

    // Stable iteration order keeps the pass deterministic.
    let mut buckets: Vec<(u64, Vec<WindowOcc>)> = fingerprints
        .into_iter()
        .filter(|(_, occs)| occs.len() >= 2)
        .collect();
    buckets.sort_by_key(|(hash, _)| *hash);

    let mut seen: HashSet<MatchKey> = HashSet::new();
    // Occurrence sets keyed by the maximal run's content.
    let mut groups: HashMap<(u64, usize), Vec<(usize, usize)>> = HashMap::new();

    for (_, occs) in buckets {
        for i in 0..occs.len() {
            for j in (i + 1)..occs.len() {
                let a = occs[i];
                let b = occs[j];
                let units_a = &files[a.file_id].units;
                let units_b = &files[b.file_id].units;

                // Fingerprint equality is a candidate, not proof.
                if units_a[a.start..a.start + min_units]
                    .iter()
                    .zip(&units_b[b.start..b.start + min_units])
                    .any(|(x, y)| x.key != y.key)
                {
                    continue;
                }

                let (start_a, start_b, len) =
                    maximal_match(units_a, a.start, units_b, b.start, min_units);

                // Within one file the two runs must not overlap.
                if a.file_id == b.file_id {
                    let (lo, hi) = if start_a <= start_b {
                        (start_a, start_b)
                    } else {
                        (start_b, start_a)
                    };
                    if lo + len > hi {
                        continue;
                    }
                }

                let (file_a, pos_a, file_b, pos_b) =
                    if (a.file_id, start_a) <= (b.file_id, start_b) {
                        (a.file_id, start_a, b.file_id, start_b)
                    } else {
                        (b.file_id, start_b, a.file_id, start_a)
                    };
                let key = MatchKey {
                    file_a,
                    start_a: pos_a,
                    file_b,
                    start_b: pos_b,
                    len,
                };
                if !seen.insert(key) {
                    continue;
                }

                let content =
                    window_fingerprint(&files[file_a].units[pos_a..pos_a + len]);
                let group = groups.entry((content, len)).or_default();
                for occ in [(file_a, pos_a), (file_b, pos_b)] {
                    if !group.contains(&occ) {
                        group.push(occ);
                    }
                }
            }
        }
    }

    let mut findings = Vec::new();
    for (_, mut occurrences) in groups {
        occurrences.sort();
        let locations: Vec<Location> = occurrences
            .iter()
            .map(|&(file_id, start)| Location {
                file: files[file_id].path.clone(),
                line: files[file_id].units[start].line,
            })
            .collect();

        let primary = &locations[0];
        let others = &locations[1..];
        let message = format!(
            "duplicate block also found at {}",
            describe_locations(&primary.file, others)
        );
        findings.push(
            Finding::new(
                Rule::DuplicateBlock,
                Severity::Warn,
                primary.file.clone(),
                primary.line,
                message,
            )
            .with_related(others.to_vec()),
        );
    }

    findings.sort_by(|a, b| (&a.file, a.line, &a.message).cmp(&(&b.file, b.line, &b.message)));
    findings
}

/// `line 40` for same-file occurrences, `other.py:40` across files.
fn describe_locations(primary_file: &str, others: &[Location]) -> String {
    others
        .iter()
        .map(|loc| {
            if loc.file == primary_file {
                format!("line {}", loc.line)
            } else {
                loc.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
