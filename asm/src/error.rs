use crate::msg::Msg;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed symbol: `{0}`")]
    MalformedSymbol(String),

    #[error("Malformed label declaration: `{0}`")]
    MalformedLabel(String),

    #[error("Literal out of range: `{0}` (max 32767)")]
    LiteralOutOfRange(String),

    #[error("Unknown dest mnemonic: `{0}`")]
    UnknownDest(String),

    #[error("Unknown comp mnemonic: `{0}`")]
    UnknownComp(String),

    #[error("Unknown jump mnemonic: `{0}`")]
    UnknownJump(String),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String, usize),

    #[error("Cannot redefine predefined symbol: `{0}`")]
    ReservedSymbol(String),

    #[error("Address of `{0}` does not fit in an A-instruction: {1}")]
    AddressOutOfRange(String, u16),

    #[error("Out of variable memory: cannot allocate `{0}`")]
    AddressSpaceExhausted(String),

    #[error("Program too large: more than {0} instructions")]
    ProgramTooLarge(usize),

    #[error("Aborting due to previous error")]
    Aborted,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to export symbols: {0}")]
    SymbolExport(String, #[source] serde_yaml::Error),
}

/// An error raised while assembling a specific source line.
#[derive(Error, Debug)]
#[error("line {}: {error}", .line_idx + 1)]
pub struct LineError {
    /// 0-based index into the source lines.
    pub line_idx: usize,
    pub error: Error,
}

impl LineError {
    pub fn new(line_idx: usize, error: Error) -> Self {
        LineError { line_idx, error }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag<S: AsRef<str>>(&self, file: &str, lines: &[S]) {
        let raw = |idx: usize| lines.get(idx).map_or("", |s| s.as_ref());

        let line_num = self.line_idx + 1;
        Msg::Error(self.error.to_string()).print((file, line_num, raw(self.line_idx)));

        if let Error::DuplicateLabel(_, prev) = &self.error {
            Msg::Note("Already defined here".to_string()).print((file, prev + 1, raw(*prev)));
        }
    }
}

#[test]
fn test_print_diag() {
    let lines = ["(LOOP)", "@LOOP", "(LOOP)"];
    let err = LineError::new(2, Error::DuplicateLabel("LOOP".to_string(), 0));
    assert_eq!(err.to_string(), "line 3: Re-defined label: `LOOP`");
    err.print_diag("main.asm", &lines);
}
