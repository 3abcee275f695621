// Adapters layer: concrete implementations of the domain ports.

pub mod booking;
pub mod catalog_file;
pub mod contact_http;
pub mod form_file;

pub use booking::StubBookingGateway;
pub use catalog_file::TomlCatalogFile;
pub use contact_http::HttpContactTransport;
pub use form_file::FilledForm;
