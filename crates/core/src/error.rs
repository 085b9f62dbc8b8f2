#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] event_types::TextError),

    #[error("failed to read event catalogue: {0}")]
    CatalogueRead(std::io::Error),
    #[error("failed to write event catalogue: {0}")]
    CatalogueWrite(std::io::Error),
    #[error("failed to serialize events: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize events: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),

    #[error("event catalogue lock poisoned")]
    LockPoisoned,
}

pub type EventResult<T> = std::result::Result<T, EventError>;
