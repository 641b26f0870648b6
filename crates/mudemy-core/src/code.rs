//! Fixed-width identifier codes (`USR00001`, `CRS00042`, ...)
//!
//! Every row in the schema is keyed by a three-letter prefix naming the
//! entity family followed by a zero-padded five digit sequence number.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits after the prefix
pub const SEQUENCE_WIDTH: usize = 5;

/// Largest sequence number that still fits in [`SEQUENCE_WIDTH`] digits
pub const MAX_SEQUENCE: u32 = 99_999;

/// Entity family encoded in the code prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodePrefix {
    User,
    Course,
    Module,
    Lesson,
    Media,
    Enrollment,
    Payment,
    Certificate,
    Question,
    Answer,
    AssignmentSubmission,
    QuizSubmission,
    Resource,
}

impl CodePrefix {
    pub const ALL: [CodePrefix; 13] = [
        CodePrefix::User,
        CodePrefix::Course,
        CodePrefix::Module,
        CodePrefix::Lesson,
        CodePrefix::Media,
        CodePrefix::Enrollment,
        CodePrefix::Payment,
        CodePrefix::Certificate,
        CodePrefix::Question,
        CodePrefix::Answer,
        CodePrefix::AssignmentSubmission,
        CodePrefix::QuizSubmission,
        CodePrefix::Resource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodePrefix::User => "USR",
            CodePrefix::Course => "CRS",
            CodePrefix::Module => "MOD",
            CodePrefix::Lesson => "LES",
            CodePrefix::Media => "MED",
            CodePrefix::Enrollment => "ENR",
            CodePrefix::Payment => "PAY",
            CodePrefix::Certificate => "CER",
            CodePrefix::Question => "QST",
            CodePrefix::Answer => "ANS",
            CodePrefix::AssignmentSubmission => "ASB",
            CodePrefix::QuizSubmission => "QSB",
            CodePrefix::Resource => "RES",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == prefix)
    }
}

impl fmt::Display for CodePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("'{0}' is not a valid identifier")]
    Malformed(String),

    #[error("'{code}' is not a {expected} identifier")]
    WrongPrefix { code: String, expected: CodePrefix },

    #[error("identifier space for {0} is exhausted")]
    Exhausted(CodePrefix),
}

/// A parsed identifier code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityCode {
    prefix: CodePrefix,
    sequence: u32,
}

impl EntityCode {
    pub fn new(prefix: CodePrefix, sequence: u32) -> Result<Self, CodeError> {
        if sequence == 0 || sequence > MAX_SEQUENCE {
            return Err(CodeError::Exhausted(prefix));
        }
        Ok(Self { prefix, sequence })
    }

    pub fn prefix(&self) -> CodePrefix {
        self.prefix
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Parse `code` and require it to carry `expected` as its prefix
    pub fn parse_as(code: &str, expected: CodePrefix) -> Result<Self, CodeError> {
        let parsed: EntityCode = code.parse()?;
        if parsed.prefix != expected {
            return Err(CodeError::WrongPrefix {
                code: code.to_string(),
                expected,
            });
        }
        Ok(parsed)
    }

    /// Code following the highest one currently allocated for `prefix`
    ///
    /// `highest` is the lexicographically greatest stored code; because the
    /// sequence is zero-padded, lexicographic and numeric order agree.
    pub fn next_after(prefix: CodePrefix, highest: Option<&str>) -> Result<Self, CodeError> {
        let current = match highest {
            Some(code) => Self::parse_as(code, prefix)?.sequence,
            None => 0,
        };
        Self::new(prefix, current + 1)
    }
}

impl fmt::Display for EntityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:0width$}",
            self.prefix,
            self.sequence,
            width = SEQUENCE_WIDTH
        )
    }
}

impl FromStr for EntityCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CodeError::Malformed(s.to_string());

        if s.len() != 3 + SEQUENCE_WIDTH || !s.is_ascii() {
            return Err(malformed());
        }
        let (prefix, digits) = s.split_at(3);
        let prefix = CodePrefix::from_prefix(prefix).ok_or_else(malformed)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let sequence: u32 = digits.parse().map_err(|_| malformed())?;
        if sequence == 0 {
            return Err(malformed());
        }

        Ok(Self { prefix, sequence })
    }
}
