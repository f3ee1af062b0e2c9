use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw line of extracted text, as handed over by the PDF/text extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLine {
    pub text: String,
    pub page: u32,
    pub sequence: u32,
}

impl RawLine {
    pub fn new(text: &str, page: u32, sequence: u32) -> Self {
        RawLine {
            text: text.to_string(),
            page,
            sequence,
        }
    }
}

/// A merged block of text that may still contain several concatenated names.
/// Retains the page of its first constituent line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub page: Option<u32>,
}

impl TextBlock {
    pub fn new(text: &str, page: Option<u32>) -> Self {
        TextBlock {
            text: text.to_string(),
            page,
        }
    }
}

/// Review lifecycle of a detected span: proposed by the detector, reviewed
/// once a human edited it, accepted once frozen for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewState {
    Proposed,
    Reviewed,
    Accepted,
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewState::Proposed => write!(f, "PROPOSED"),
            ReviewState::Reviewed => write!(f, "REVIEWED"),
            ReviewState::Accepted => write!(f, "ACCEPTED"),
        }
    }
}

/// One detected entity name with its provenance inside the source block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub page: Option<u32>,
    pub start_offset: usize,
    pub end_offset: usize,
    pub state: ReviewState,
}

impl EntitySpan {
    pub fn new(text: &str, page: Option<u32>, start_offset: usize, end_offset: usize) -> Self {
        debug_assert!(start_offset < end_offset);
        EntitySpan {
            text: text.to_string(),
            page,
            start_offset,
            end_offset,
            state: ReviewState::Proposed,
        }
    }

    /// A span added by the reviewer rather than the detector.
    pub fn manual(text: &str) -> Self {
        EntitySpan {
            text: text.to_string(),
            page: None,
            start_offset: 0,
            end_offset: text.len().max(1),
            state: ReviewState::Reviewed,
        }
    }

    pub fn accept(&mut self) {
        self.state = ReviewState::Accepted;
    }

    pub fn is_accepted(&self) -> bool {
        self.state == ReviewState::Accepted
    }
}
