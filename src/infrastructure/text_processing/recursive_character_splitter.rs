use std::collections::VecDeque;

use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

/// Separators tried in order: paragraphs, lines, words, then single characters.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Boundary-aware splitter measuring sizes in characters.
///
/// Text is cut on the coarsest separator present, pieces that are still too
/// long are split again with the next separator, and the resulting pieces are
/// merged back greedily up to `chunk_size`. Consecutive chunks share up to
/// `chunk_overlap` characters of trailing pieces. Separators stay attached to
/// the start of the piece that follows them and chunks are trimmed.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    fn validate(&self) -> Result<(), TextSplitterError> {
        if self.chunk_size == 0 {
            return Err(TextSplitterError::InvalidConfiguration(
                "chunk size must be positive".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let position = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s.as_str()))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).map(String::as_str).unwrap_or("");
        let finer = separators.get(position + 1..).unwrap_or(&[]);

        let mut output = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                output.extend(self.merge_pieces(&pending));
                pending.clear();
            }

            if finer.is_empty() {
                output.push(piece);
            } else {
                output.extend(self.split_recursive(&piece, finer));
            }
        }

        if !pending.is_empty() {
            output.extend(self.merge_pieces(&pending));
        }

        output
    }

    fn merge_pieces(&self, pieces: &[String]) -> Vec<String> {
        let mut merged = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut window_len = 0;

        for piece in pieces {
            let len = char_len(piece);

            if window_len + len > self.chunk_size && !window.is_empty() {
                if window_len > self.chunk_size {
                    tracing::warn!(
                        size = window_len,
                        chunk_size = self.chunk_size,
                        "Created a chunk longer than the configured size"
                    );
                }
                merged.extend(join_window(&window));

                while window_len > self.chunk_overlap
                    || (window_len + len > self.chunk_size && window_len > 0)
                {
                    match window.pop_front() {
                        Some(front) => window_len -= char_len(front),
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            window_len += len;
        }

        merged.extend(join_window(&window));
        merged
    }
}

#[async_trait]
impl TextSplitter for RecursiveCharacterSplitter {
    async fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        self.validate()?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pieces = self.split_recursive(text, &self.separators);

        let mut chunks = Vec::with_capacity(pieces.len());
        let mut search_from = 0;
        for (index, piece) in pieces.into_iter().enumerate() {
            let offset = text
                .get(search_from..)
                .and_then(|rest| rest.find(&piece))
                .map(|found| search_from + found)
                .or_else(|| text.find(&piece))
                .unwrap_or(0);
            search_from = next_char_boundary(text, offset + 1);
            chunks.push(Chunk::new(piece, index, offset));
        }

        Ok(chunks)
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut parts = text.split(separator);
    let mut pieces: Vec<String> = parts.next().map(str::to_string).into_iter().collect();
    pieces.extend(parts.map(|part| format!("{}{}", separator, part)));
    pieces.retain(|p| !p.is_empty());
    pieces
}

fn join_window(window: &VecDeque<&str>) -> Option<String> {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn next_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(text.len())
}
