mod parser;

use std::io::Read;
use std::path::Path;

use super::{Catalog, CatalogError, PhoneModel};
use crate::valuation::Question;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Catalog(CatalogError),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Catalog(err) => {
                write!(f, "catalog export rejected: {}", err)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Catalog(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CatalogError> for CatalogImportError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Builds catalogs from CSV exports layered over the standard catalog.
///
/// Question exports use the columns `id,text,category,deduction_percentage,
/// is_blocking,yes_deducts[,block_reason]`; row order is battery order.
/// Model exports use `id,brand_id,name,base_price[,image]`.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn questions_from_reader<R: Read>(reader: R) -> Result<Vec<Question>, CatalogImportError> {
        Ok(parser::parse_questions(reader)?)
    }

    pub fn questions_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Question>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::questions_from_reader(file)
    }

    pub fn models_from_reader<R: Read>(reader: R) -> Result<Vec<PhoneModel>, CatalogImportError> {
        Ok(parser::parse_models(reader)?)
    }

    pub fn models_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PhoneModel>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::models_from_reader(file)
    }

    /// Standard catalog with either export swapped in when a path is given.
    pub fn catalog_from_paths(
        questions_csv: Option<&Path>,
        models_csv: Option<&Path>,
    ) -> Result<Catalog, CatalogImportError> {
        let mut catalog = Catalog::standard();

        if let Some(path) = models_csv {
            catalog = catalog.with_models(Self::models_from_path(path)?)?;
        }
        if let Some(path) = questions_csv {
            catalog = catalog.with_questions(Self::questions_from_path(path)?)?;
        }

        Ok(catalog)
    }
}
