use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::model::error::ProcessorError;

pub const DEFAULT_REPORT_PATH: &str = "SalesResults.txt";
pub const REPORT_PATH_VAR: &str = "SALES_REPORT_PATH";

const USAGE: &str = "Usage: compute_sales <priceCatalogue.json> <salesRecord.json>";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub sales_path: PathBuf,
    pub report_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ProcessorError> {
        Self::from_parts(env::args_os().skip(1), env::var_os(REPORT_PATH_VAR))
    }

    /// `args` excludes the program name. Exactly two positionals are accepted.
    pub fn from_parts<I>(args: I, report_path: Option<OsString>) -> Result<Self, ProcessorError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let [catalog_path, sales_path] = <[OsString; 2]>::try_from(args)
            .map_err(|_| ProcessorError::InvalidArguments(USAGE.to_string()))?;

        let report_path = report_path
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));

        Ok(Config {
            catalog_path: catalog_path.into(),
            sales_path: sales_path.into(),
            report_path,
        })
    }
}
