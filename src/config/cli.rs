use crate::utils::error::Result;
use std::io::Read;
use std::path::PathBuf;

/// payload 來源：檔案或 stdin
#[derive(Debug, Clone)]
pub enum PayloadSource {
    File(PathBuf),
    Stdin,
}

impl PayloadSource {
    pub fn from_arg(input: Option<&str>) -> Self {
        match input {
            Some(path) if path != "-" => PayloadSource::File(PathBuf::from(path)),
            _ => PayloadSource::Stdin,
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            PayloadSource::File(path) => Ok(std::fs::read_to_string(path)?),
            PayloadSource::Stdin => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                Ok(body)
            }
        }
    }
}
