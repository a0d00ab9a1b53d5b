// drx_core/src/catalog.rs

/// One company's slice of the listing, as the wire delivers it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyFiles {
    pub common_name: String,
    pub filenames: Vec<String>,
}

/// Flat listing row: one file held for one company.
///
/// No identity beyond the pair. Duplicates returned by the backend pass
/// through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    pub common_name: String,
    pub file_name: String,
}

/// Flattens the nested listing into ordered rows: company order first, then
/// filename order within each company.
pub fn flatten_listing(companies: Vec<CompanyFiles>) -> Vec<FileRecord> {
    let mut records = Vec::new();
    for company in companies {
        for file_name in company.filenames {
            records.push(FileRecord {
                common_name: company.common_name.clone(),
                file_name,
            });
        }
    }
    records
}
