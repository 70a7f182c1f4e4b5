//! Join of decoded catalog entries with the notes and names annotations.
//!
//! The join is driven by the annotations, not by the catalog: every star number
//! present in either annotation source is visited in ascending order, resolved
//! to a catalog entry, and kept only if it has a usable designation.
//!
//! Resolution of a star number `idx`:
//! 1. an entry whose rounded number is `idx` (first one in file order);
//! 2. otherwise the entry whose number is closest to `idx`, strictly within the
//!    tolerance of the [`MatchPolicy`] and measured on its [`DistanceBasis`];
//! 3. otherwise `idx` is dropped.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::{
    annotations::AnnotationIndex,
    bsc5::catalog_record::CatalogRecord,
    constants::{StarId, CROSS_REFERENCE_PREFIX, NAME_MARKER},
};

/// Which number of an entry the fallback match measures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBasis {
    /// The number as stored, fractional part included
    StoredNumber,
    /// The rounded lookup key
    LookupKey,
}

/// Tolerance of the fallback number match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    pub tolerance: f64,
    pub basis: DistanceBasis,
}

impl MatchPolicy {
    pub const NOTES_AWARE: MatchPolicy = MatchPolicy {
        tolerance: 0.5,
        basis: DistanceBasis::StoredNumber,
    };
    /// Keys at most one away, since key distances are whole numbers.
    pub const METADATA_RICH: MatchPolicy = MatchPolicy {
        tolerance: 2.0,
        basis: DistanceBasis::LookupKey,
    };

    fn distance(&self, record: &CatalogRecord, star_id: StarId) -> f64 {
        match self.basis {
            DistanceBasis::StoredNumber => (record.identifier() - star_id as f64).abs(),
            DistanceBasis::LookupKey => record.lookup_key().abs_diff(star_id) as f64,
        }
    }
}

/// A star that survived the join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedStar<'a> {
    /// Star number from the annotations
    pub identifier: StarId,
    pub record: &'a CatalogRecord,
    pub name: String,
    /// `None` rather than an empty list
    pub notes: Option<Vec<String>>,
}

/// Catalog entries indexed by rounded star number, built once per join.
pub struct CatalogLookup<'a> {
    records: &'a [CatalogRecord],
    by_number: HashMap<StarId, Vec<&'a CatalogRecord>>,
}

impl<'a> CatalogLookup<'a> {
    pub fn new(records: &'a [CatalogRecord]) -> Self {
        CatalogLookup {
            records,
            by_number: records.iter().into_group_map_by(|r| r.lookup_key()),
        }
    }

    pub fn resolve(&self, star_id: StarId, policy: MatchPolicy) -> Option<&'a CatalogRecord> {
        if let Some(record) = self
            .by_number
            .get(&star_id)
            .and_then(|matches| matches.first().copied())
        {
            return Some(record);
        }

        self.records
            .iter()
            .map(|record| (record, policy.distance(record, star_id)))
            .filter(|(_, distance)| *distance < policy.tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(record, _)| record)
    }
}

/// Split the name lines of a star into its designation and remaining remarks.
///
/// Every `1N:` line whose text is not a `See HR` cross reference is a
/// designation candidate and the last one wins; cross references are dropped;
/// lines without `1N:` are remarks, in order.
pub fn split_name_lines(lines: &[String]) -> (Option<String>, Vec<String>) {
    let mut name = None;
    let mut remarks = Vec::new();

    for line in lines {
        match line.split_once(NAME_MARKER) {
            Some((_, candidate)) => {
                let candidate = candidate.trim();
                if !candidate.starts_with(CROSS_REFERENCE_PREFIX) {
                    name = Some(candidate.to_string());
                }
            }
            None => remarks.push(line.clone()),
        }
    }

    (name, remarks)
}

/// Join `records` with `annotations`, ascending by star number.
pub fn join_annotations<'a>(
    records: &'a [CatalogRecord],
    annotations: &AnnotationIndex,
    policy: MatchPolicy,
) -> Vec<JoinedStar<'a>> {
    let lookup = CatalogLookup::new(records);
    let mut stars = Vec::new();

    for star_id in annotations.identifiers() {
        let Some(record) = lookup.resolve(star_id, policy) else {
            debug!("HR {star_id} has no catalog entry, skipped");
            continue;
        };

        let (name, remarks) = split_name_lines(annotations.name_lines(star_id));
        let Some(name) = name else {
            debug!("HR {star_id} has no designation, skipped");
            continue;
        };

        let notes: Vec<String> = annotations
            .note(star_id)
            .map(str::to_string)
            .into_iter()
            .chain(remarks)
            .collect();

        stars.push(JoinedStar {
            identifier: star_id,
            record,
            name,
            notes: (!notes.is_empty()).then_some(notes),
        });
    }

    stars
}
