//! Record to mutation translation

use super::types::Mutation;
use crate::encode::encode;
use crate::record::Record;

/// Absent entries passed over while building a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    /// Families that mapped to no qualifiers
    pub families: usize,
    /// Qualifiers that mapped to no cell
    pub cells: usize,
}

/// Build the put for a record
///
/// Every present cell is encoded with the record's key as row. Families
/// without qualifiers and qualifiers without a cell contribute nothing and
/// are only counted.
pub fn build_mutation(record: &Record) -> (Mutation, SkipCounts) {
    let mut mutation = Mutation::new(encode(&record.key));
    let mut skipped = SkipCounts::default();

    for family in &record.families {
        let Some(qualifiers) = &family.qualifiers else {
            skipped.families += 1;
            continue;
        };

        let family_bytes = encode(&family.name);
        for qualifier in qualifiers {
            let Some(cell) = &qualifier.cell else {
                skipped.cells += 1;
                continue;
            };
            mutation.add(family_bytes.clone(), encode(&qualifier.name), encode(cell));
        }
    }

    (mutation, skipped)
}
