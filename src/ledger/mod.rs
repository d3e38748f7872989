use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::DeskError;
use crate::models::{ContactForm, ContactSubmission};

/// Append-only store of contact form submissions, backed by a CSV file.
///
/// The file carries a fixed header
/// (`timestamp,fullName,phone,email,desiredPropertyType,budgetMin,budgetMax,message`)
/// and one submission per row, UTF-8, oldest first. A missing file is an
/// empty ledger, not an error.
///
/// Appending is read-modify-write: the existing rows are read back, the
/// new row is added last and the whole file is rewritten. Two concurrent
/// writers can race and lose an update; this mirrors the original
/// application and is documented in DESIGN.md rather than fixed.
#[derive(Debug, Clone)]
pub struct ContactLedger {
    path: PathBuf,
}

impl ContactLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and persist one submission. The ledger stamps the
    /// timestamp; the caller never supplies one.
    ///
    /// `full_name` and `phone` must be non-empty after trimming and the
    /// budget bounds must be ordered; otherwise the write is rejected
    /// with `Validation` and nothing is persisted.
    pub fn append(&self, form: &ContactForm) -> Result<ContactSubmission, DeskError> {
        let full_name = form.full_name.trim();
        let phone = form.phone.trim();
        if full_name.is_empty() {
            return Err(DeskError::validation("full name is required"));
        }
        if phone.is_empty() {
            return Err(DeskError::validation("phone is required"));
        }
        if form.budget_min > form.budget_max {
            return Err(DeskError::validation(
                "minimum budget exceeds maximum budget",
            ));
        }

        let submission = ContactSubmission {
            timestamp: Utc::now(),
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email: form.email.trim().to_string(),
            desired_property_type: form.desired_property_type,
            budget_min: form.budget_min,
            budget_max: form.budget_max,
            message: form.message.trim().to_string(),
        };

        let mut rows = self.read_all()?;
        rows.push(submission.clone());
        self.rewrite(&rows)?;

        info!(
            "Recorded contact submission from {} ({} rows total)",
            submission.full_name,
            rows.len()
        );
        Ok(submission)
    }

    /// All persisted submissions in insertion order, oldest first.
    pub fn read_all(&self) -> Result<Vec<ContactSubmission>, DeskError> {
        if !self.path.exists() {
            debug!("Ledger file {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            DeskError::data_load(format!(
                "failed to open ledger {}: {e}",
                self.path.display()
            ))
        })?;

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let submission: ContactSubmission = record.map_err(|e| {
                DeskError::data_load(format!(
                    "ledger {} is corrupt: {e}",
                    self.path.display()
                ))
            })?;
            rows.push(submission);
        }
        Ok(rows)
    }

    /// The last `min(n, total)` submissions in insertion order.
    pub fn read_recent(&self, n: usize) -> Result<Vec<ContactSubmission>, DeskError> {
        let mut rows = self.read_all()?;
        let skip = rows.len().saturating_sub(n);
        Ok(rows.split_off(skip))
    }

    /// Rewrite the backing file with the full collection: serialize to a
    /// sibling temp file, then rename it over the ledger so a crash
    /// mid-write cannot truncate existing rows.
    fn rewrite(&self, rows: &[ContactSubmission]) -> Result<(), DeskError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DeskError::data_write(format!(
                        "failed to create ledger directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        let mut writer = csv::Writer::from_path(&tmp_path).map_err(|e| {
            DeskError::data_write(format!(
                "failed to create ledger temp file {}: {e}",
                tmp_path.display()
            ))
        })?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| DeskError::data_write(format!("failed to serialize row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| DeskError::data_write(format!("failed to flush ledger: {e}")))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            DeskError::data_write(format!(
                "failed to replace ledger {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesiredPropertyType;

    fn form(name: &str, phone: &str) -> ContactForm {
        ContactForm {
            full_name: name.to_string(),
            phone: phone.to_string(),
            email: String::new(),
            desired_property_type: DesiredPropertyType::House,
            budget_min: 400_000,
            budget_max: 900_000,
            message: String::new(),
        }
    }

    #[test]
    fn append_then_read_all_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ContactLedger::new(dir.path().join("contacts.csv"));

        let form = ContactForm {
            email: "ana@example.com".to_string(),
            message: "Looking for something near the school.".to_string(),
            ..form("Ana", "555-0001")
        };
        let stamped = ledger.append(&form).unwrap();

        let rows = ledger.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], stamped);
        assert_eq!(rows[0].full_name, "Ana");
        assert_eq!(rows[0].phone, "555-0001");
        assert_eq!(rows[0].email, "ana@example.com");
        assert_eq!(rows[0].desired_property_type, DesiredPropertyType::House);
    }

    #[test]
    fn first_append_writes_the_exact_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        let ledger = ContactLedger::new(&path);
        ledger.append(&form("Ana", "555-0001")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "timestamp,fullName,phone,email,desiredPropertyType,budgetMin,budgetMax,message"
        );
    }

    #[test]
    fn appends_preserve_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ContactLedger::new(dir.path().join("contacts.csv"));
        for i in 0..5 {
            ledger.append(&form(&format!("Caller {i}"), "555")).unwrap();
        }

        let rows = ledger.read_all().unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Caller 0", "Caller 1", "Caller 2", "Caller 3", "Caller 4"]
        );
    }

    #[test]
    fn read_recent_returns_the_tail_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ContactLedger::new(dir.path().join("contacts.csv"));
        for i in 0..4 {
            ledger.append(&form(&format!("Caller {i}"), "555")).unwrap();
        }

        let recent = ledger.read_recent(2).unwrap();
        let names: Vec<&str> = recent.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Caller 2", "Caller 3"]);

        // Asking for more rows than exist returns everything.
        assert_eq!(ledger.read_recent(100).unwrap().len(), 4);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ContactLedger::new(dir.path().join("contacts.csv"));
        assert!(ledger.read_all().unwrap().is_empty());
        assert!(ledger.read_recent(10).unwrap().is_empty());
    }

    #[test]
    fn blank_required_fields_are_rejected_and_nothing_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        let ledger = ContactLedger::new(&path);

        let err = ledger.append(&form("", "555")).unwrap_err();
        assert!(err.is_validation());
        let err = ledger.append(&form("   ", "555")).unwrap_err();
        assert!(err.is_validation());
        let err = ledger.append(&form("Ana", "")).unwrap_err();
        assert!(err.is_validation());

        assert!(!path.exists());
    }

    #[test]
    fn inverted_budget_bounds_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ContactLedger::new(dir.path().join("contacts.csv"));
        let bad = ContactForm {
            budget_min: 900_000,
            budget_max: 400_000,
            ..form("Ana", "555")
        };
        assert!(ledger.append(&bad).unwrap_err().is_validation());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_persisting() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ContactLedger::new(dir.path().join("contacts.csv"));
        let stamped = ledger.append(&form("  Ana Pérez  ", " 555-0001 ")).unwrap();
        assert_eq!(stamped.full_name, "Ana Pérez");
        assert_eq!(stamped.phone, "555-0001");
    }

    #[test]
    fn corrupt_ledger_is_a_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            "timestamp,fullName,phone,email,desiredPropertyType,budgetMin,budgetMax,message\n\
             not-a-timestamp,Ana,555,,House,not-a-number,2,hi\n",
        )
        .unwrap();

        let ledger = ContactLedger::new(&path);
        assert!(matches!(
            ledger.read_all().unwrap_err(),
            DeskError::DataLoad(_)
        ));
    }
}
