use log::info;

use gwash_core::models::{VariantRecord, VariantTable};
use gwash_refdb::AnnotationIndex;

/// How one record's identifier related to the reference database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsidStatus {
    /// Record had no identifier; the database one was adopted.
    Adopted,
    /// Record already carried the database identifier.
    Same,
    /// Record carried a different identifier; the database one replaced it.
    Different,
    /// Position unknown to the database.
    NotFound,
}

impl RsidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsidStatus::Adopted => "adopted",
            RsidStatus::Same => "same",
            RsidStatus::Different => "different",
            RsidStatus::NotFound => "not found",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RsidOptions {
    /// Retain records whose position the database does not know, with a
    /// cleared identifier. Off by default: unknown positions are dropped.
    pub keep_unresolved: bool,
}

/// Per-status record counts.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RsidReport {
    pub adopted: usize,
    pub same: usize,
    pub overwritten: usize,
    pub not_found: usize,
}

/// Result of an identifier-resolution pass: the new table, one status
/// per surviving record, and the overall counts.
#[derive(Debug)]
pub struct RsidOutcome {
    pub table: VariantTable,
    pub statuses: Vec<RsidStatus>,
    pub report: RsidReport,
}

impl RsidOutcome {
    pub fn status_column(&self) -> (String, Vec<String>) {
        (
            String::from("rsid_status"),
            self.statuses.iter().map(|s| s.as_str().to_string()).collect(),
        )
    }
}

///
/// Fill in or correct the identifier column from the reference database.
///
/// The database is authoritative: a record whose identifier disagrees
/// with it is silently rewritten to the database value (and counted as
/// `Different`). Records at positions the database does not know keep no
/// identifier and are dropped unless `keep_unresolved` is set.
///
pub fn add_rsid(
    table: &VariantTable,
    index: &AnnotationIndex,
    opts: &RsidOptions,
) -> RsidOutcome {
    let mut records: Vec<VariantRecord> = Vec::with_capacity(table.len());
    let mut statuses: Vec<RsidStatus> = Vec::with_capacity(table.len());
    let mut report = RsidReport::default();

    for record in table {
        match index.get(&record.chr, record.bp) {
            None => {
                report.not_found += 1;
                if opts.keep_unresolved {
                    let mut record = record.clone();
                    record.snp = None;
                    records.push(record);
                    statuses.push(RsidStatus::NotFound);
                }
            }
            Some(entry) => {
                let status = match record.snp.as_deref() {
                    None => {
                        report.adopted += 1;
                        RsidStatus::Adopted
                    }
                    Some(snp) if snp == entry.rsid => {
                        report.same += 1;
                        RsidStatus::Same
                    }
                    Some(_) => {
                        report.overwritten += 1;
                        RsidStatus::Different
                    }
                };
                let mut record = record.clone();
                record.snp = Some(entry.rsid.clone());
                records.push(record);
                statuses.push(status);
            }
        }
    }

    info!(
        "add_rsid: {} adopted, {} unchanged, {} overwritten, {} not found",
        report.adopted, report.same, report.overwritten, report.not_found
    );

    RsidOutcome {
        table: VariantTable::from(records),
        statuses,
        report,
    }
}
