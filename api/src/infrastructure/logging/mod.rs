pub mod correlation;
pub mod format;
pub mod obfuscation;
pub mod rotating_file;

pub use correlation::{CorrelationIdLayer, MakeCorrelationId};
pub use format::{ConsoleFormat, JsonFileFormat};
pub use obfuscation::obfuscated;
pub use rotating_file::RotatingFileWriter;
