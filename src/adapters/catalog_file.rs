use crate::domain::model::SeminarOffering;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    offerings: Vec<SeminarOffering>,
}

/// Seminar catalog read from a TOML file of `[[offerings]]` tables.
#[derive(Debug, Clone)]
pub struct TomlCatalogFile {
    path: PathBuf,
}

impl TomlCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Result<Vec<SeminarOffering>> {
        let document: CatalogDocument = toml::from_str(content)?;
        Ok(document.offerings)
    }
}

impl CatalogSource for TomlCatalogFile {
    fn offerings(&self) -> Result<Vec<SeminarOffering>> {
        tracing::debug!("Reading catalog from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
[[offerings]]
id = 10
title = "Greffe Osseuse"
destination = "Kutaisi, Géorgie"
unit_price = 1999
date_range = "1-4 Octobre 2025"
duration_label = "4 jours"
popular = true

[[offerings]]
id = 11
title = "Prothèse Numérique"
destination = "Lyon, France"
unit_price = 1499
date_range = "3-6 Novembre 2025"
duration_label = "4 jours"
program = ["Jour 1: Scanners intra-oraux"]
"#;

    #[test]
    fn test_parse_catalog_with_defaults() {
        let offerings = TomlCatalogFile::parse(CATALOG).unwrap();
        assert_eq!(offerings.len(), 2);
        assert!(offerings[0].popular);
        assert!(!offerings[0].featured);
        assert!(offerings[0].included.is_empty());
        assert_eq!(offerings[1].program.len(), 1);
    }

    #[test]
    fn test_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = Catalog::load(&TomlCatalogFile::new(temp_file.path())).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(11).unwrap().unit_price, 1499);
        assert!(catalog.get(1).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = TomlCatalogFile::new("/definitely/not/here.toml");
        assert!(matches!(
            source.offerings(),
            Err(crate::utils::error::BookingError::IoError(_))
        ));
    }
}
