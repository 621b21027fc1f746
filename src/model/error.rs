use thiserror::Error;

/// Run-aborting failures. Anything here stops the run before a report is written.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Error loading {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error loading {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error loading {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Error loading {path}: expected a list of records")]
    NotAList { path: String },

    #[error("Invalid catalog record at index {index}: {source}")]
    CatalogRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Why a single sale could not be priced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SaleFault {
    #[error("sale entry must be an object, found {0}")]
    NotARecord(&'static str),

    #[error("product name must be a string, found {0}")]
    ProductNotText(&'static str),

    #[error("quantity must be a number, found {0}")]
    NonNumericQuantity(&'static str),

    #[error("unit price must be a number, found {0}")]
    NonNumericPrice(&'static str),
}

/// Entry-scoped failures. These are collected, never propagated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SaleError {
    #[error("Missing product name in sale entry: {entry}")]
    MissingProduct { entry: String },

    #[error("Invalid product: {name}")]
    InvalidProduct { name: String },

    #[error("Error processing sale {entry}: {fault}")]
    Processing { entry: String, fault: SaleFault },
}
