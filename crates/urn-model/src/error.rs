use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid form key {0:?}: expected `XXXXXX:Plugin.esp`")]
    MalformedFormKey(String),
    #[error("invalid form key {value:?}: local id {id:#x} exceeds 24 bits")]
    FormIdOutOfRange { value: String, id: u32 },
    #[error("invalid form key {0:?}: missing plugin name")]
    MissingPlugin(String),
}
