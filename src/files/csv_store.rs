use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use super::errors::FileError;
use crate::domain::customer::{Customer, CustomerError, CustomerRecord, RecordError, RECORD_FIELDS};
use crate::registry::CustomerRegistry;

// ============================================================================
// CSV Import / Export
// ============================================================================
//
// Import policy:
// - missing file or header-less file aborts the whole batch (FileError)
// - a row with a bad ID, an invalid field or undecodable bytes is rejected
//   on its own and the rest of the file is still read (RecordError)
// - I/O failures mid-file abort the batch
// - rows that are empty in every column are skipped
//
// ============================================================================

/// A row that could not be turned into a customer.
#[derive(Debug)]
pub struct RejectedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub error: RecordError,
}

#[derive(Debug, Default)]
pub struct ImportBatch {
    pub customers: Vec<Customer>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportBatch {
    fn reject(&mut self, line: u64, error: RecordError) {
        tracing::warn!(line, error = %error, "Rejected CSV row");
        self.rejected.push(RejectedRow { line, error });
    }
}

/// Outcome of handing an import batch to the registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

pub fn import_csv(path: impl AsRef<Path>) -> Result<ImportBatch, FileError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FileError::Missing(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| FileError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| FileError::csv(path, e))?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FileError::MissingHeader(path.to_path_buf()));
    }
    let headers: StringRecord = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    reader.set_headers(headers.clone());

    let mut batch = ImportBatch::default();

    for result in reader.byte_records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(FileError::csv(path, e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                batch.reject(line, RecordError::Malformed(e.to_string()));
                continue;
            }
        };
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let row = match StringRecord::from_byte_record(row) {
            Ok(row) => row,
            Err(e) => {
                let field = e.utf8_error().field() + 1;
                batch.reject(line, RecordError::Malformed(format!("invalid UTF-8 in field {field}")));
                continue;
            }
        };

        let record: CustomerRecord = match row.deserialize(Some(&headers)) {
            Ok(record) => record,
            Err(e) => {
                batch.reject(line, RecordError::Malformed(e.to_string()));
                continue;
            }
        };

        if record.is_blank() {
            continue;
        }

        if record.recognized_kind().is_none() && !record.kind.trim().is_empty() {
            tracing::warn!(line, tag = %record.kind, "Unrecognized customer type, importing as regular");
        }

        match record.to_customer() {
            Ok(customer) => batch.customers.push(customer),
            Err(error) => batch.reject(line, error),
        }
    }

    tracing::debug!(
        path = %path.display(),
        parsed = batch.customers.len(),
        rejected = batch.rejected.len(),
        "CSV import parsed"
    );

    Ok(batch)
}

/// Add every parsed customer, skipping the ones that clash with existing
/// records.
pub fn register_batch(registry: &mut CustomerRegistry, batch: ImportBatch) -> ImportReport {
    let mut report = ImportReport {
        invalid: batch.rejected.len(),
        ..Default::default()
    };

    for customer in batch.customers {
        let id = customer.id();
        match registry.add(customer) {
            Ok(_) => report.added += 1,
            Err(e @ (CustomerError::DuplicateId(_) | CustomerError::DuplicateEmail(_))) => {
                tracing::debug!(id, error = %e, "Skipping duplicate on import");
                report.duplicates += 1;
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Skipping customer on import");
                report.invalid += 1;
            }
        }
    }

    report
}

/// Write the fixed header and one row per customer. Returns the row count.
pub fn export_csv(path: impl AsRef<Path>, customers: &[Customer]) -> Result<usize, FileError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| FileError::csv(path, e))?;

    writer
        .write_record(RECORD_FIELDS)
        .map_err(|e| FileError::csv(path, e))?;

    for customer in customers {
        writer
            .serialize(customer.to_record())
            .map_err(|e| FileError::csv(path, e))?;
    }

    writer.flush().map_err(|e| FileError::io(path, e))?;

    tracing::debug!(path = %path.display(), rows = customers.len(), "CSV export written");
    Ok(customers.len())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::audit::MemoryAuditSink;
    use crate::domain::customer::{CustomerKind, ValidationError};

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: impl AsRef<[u8]>) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn registry() -> CustomerRegistry {
        CustomerRegistry::new(Arc::new(MemoryAuditSink::new()))
    }

    #[test]
    fn test_import_builds_each_variant() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "in.csv",
            "type,id,name,email,phone,address,tier,company,contact\n\
             regular,1,Ana,ana@x.com,12345678,Calle 123,,,\n\
             premium,2,Luis,luis@x.com,12345678,Calle 456,PLATINUM,,\n\
             corporativo,3,Marta,marta@acme.com,12345678,Parque 9,,ACME,Jorge\n",
        );

        let batch = import_csv(&path).unwrap();
        let kinds: Vec<CustomerKind> = batch.customers.iter().map(Customer::kind).collect();
        assert_eq!(kinds, vec![CustomerKind::Regular, CustomerKind::Premium, CustomerKind::Corporate]);
        assert_eq!(batch.customers[1].to_record().tier, "platinum");
        assert!(batch.rejected.is_empty());
    }

    #[test]
    fn test_import_tolerates_missing_columns_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "in.csv",
            "TYPE,ID,Name,Email,Phone,Address\n\
             premium,2,Luis,luis@x.com,12345678,Calle 456\n\
             gold-member,5,Eva,eva@x.com,12345678,Calle 789\n",
        );

        let batch = import_csv(&path).unwrap();
        assert_eq!(batch.customers.len(), 2);
        assert_eq!(batch.customers[0].to_record().tier, "gold");
        assert_eq!(batch.customers[1].kind(), CustomerKind::Regular);
    }

    #[test]
    fn test_bad_rows_are_rejected_individually() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "in.csv",
            "type,id,name,email,phone,address\n\
             regular,abc,Ana,ana@x.com,12345678,Calle 123\n\
             ,,,,,\n\
             regular,2,Bea,bea@x.com,12,Calle 123\n\
             regular,3,Cris,cris@x.com,12345678,Calle 123\n",
        );

        let batch = import_csv(&path).unwrap();
        assert_eq!(batch.customers.len(), 1);
        assert_eq!(batch.customers[0].id(), 3);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].line, 2);
        assert_eq!(batch.rejected[0].error, RecordError::InvalidId("abc".to_string()));
        assert!(matches!(
            batch.rejected[1].error,
            RecordError::Invalid(ValidationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_undecodable_row_is_rejected_and_import_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = b"type,id,name,email,phone,address\n\
            regular,1,Ana,ana@x.com,12345678,Calle 123\n\
            regular,2,B"
            .to_vec();
        contents.extend_from_slice(&[0xff, 0xfe]);
        contents.extend_from_slice(
            b"a,bea@x.com,12345678,Calle 123\n\
              regular,3,Cris,cris@x.com,12345678,Calle 123\n",
        );
        let path = write_file(&dir, "in.csv", contents);

        let batch = import_csv(&path).unwrap();
        let ids: Vec<u64> = batch.customers.iter().map(Customer::id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].line, 3);
        assert_eq!(
            batch.rejected[0].error,
            RecordError::Malformed("invalid UTF-8 in field 3".to_string())
        );
    }

    #[test]
    fn test_import_accepts_spanish_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "clientes.csv",
            "tipo,id,nombre,email,telefono,direccion,nivel,empresa,contacto\n\
             premium,2,Luis,luis@x.com,12345678,Calle 456,platinum,,\n\
             corporativo,3,Marta,marta@acme.com,12345678,Parque 9,,ACME,Jorge\n",
        );

        let batch = import_csv(&path).unwrap();
        assert!(batch.rejected.is_empty());
        let records: Vec<CustomerRecord> = batch.customers.iter().map(Customer::to_record).collect();
        assert_eq!(records[0].kind, "premium");
        assert_eq!(records[0].name, "Luis");
        assert_eq!(records[0].phone, "12345678");
        assert_eq!(records[0].address, "Calle 456");
        assert_eq!(records[0].tier, "platinum");
        assert_eq!(records[1].company, "ACME");
        assert_eq!(records[1].contact, "Jorge");
    }

    #[test]
    fn test_missing_file_is_batch_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_csv(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, FileError::Missing(_)));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", "");
        assert!(matches!(import_csv(&path).unwrap_err(), FileError::MissingHeader(_)));
    }

    #[test]
    fn test_register_batch_skips_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "in.csv",
            "type,id,name,email,phone,address\n\
             regular,1,Ana,ana@x.com,12345678,Calle 123\n\
             regular,1,Ana Bis,ana2@x.com,12345678,Calle 123\n\
             regular,2,Bea,ANA@x.com,12345678,Calle 123\n\
             regular,x,Bad,bad@x.com,12345678,Calle 123\n",
        );

        let mut registry = registry();
        let report = register_batch(&mut registry, import_csv(&path).unwrap());
        assert_eq!(report, ImportReport { added: 1, duplicates: 2, invalid: 1 });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("clientes.csv");

        let customers = vec![
            Customer::regular(1, "Ana", "ana@x.com", "+1 23456789", "Calle 123").unwrap(),
            Customer::premium(2, "Luis", "luis@x.com", "12345678", "Calle, 456", "silver").unwrap(),
            Customer::corporate(3, "Marta", "m@acme.com", "12345678", "Parque 9", "ACME", "Jorge").unwrap(),
        ];
        assert_eq!(export_csv(&path, &customers).unwrap(), 3);

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("type,id,name,email,phone,address,tier,company,contact"));
        assert_eq!(lines.next(), Some("regular,1,Ana,ana@x.com,+1 23456789,Calle 123,,,"));

        let batch = import_csv(&path).unwrap();
        assert_eq!(batch.customers, customers);
    }

    #[test]
    fn test_export_empty_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        export_csv(&path, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "type,id,name,email,phone,address,tier,company,contact\n"
        );
    }
}
