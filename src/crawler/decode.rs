//! Adaptive text decoding
//!
//! Page bodies are decoded with an ordered, cyclic list of candidate
//! encodings. A failed attempt rotates the head to the tail, so whichever
//! encoding last worked is tried first on the next page.

use crate::config::{resolve_encoding, DEFAULT_ENCODINGS};
use crate::{ConfigError, DecodeError};
use encoding_rs::Encoding;
use std::collections::VecDeque;

/// Ordered candidate encodings, learned across the whole run
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingPreferences {
    order: VecDeque<&'static Encoding>,
}

impl EncodingPreferences {
    pub fn new(encodings: impl IntoIterator<Item = &'static Encoding>) -> Self {
        Self {
            order: encodings.into_iter().collect(),
        }
    }

    /// Builds the list from WHATWG labels such as `utf-8` or `gbk`
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, ConfigError> {
        let encodings = labels
            .iter()
            .map(|label| resolve_encoding(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(encodings))
    }

    /// The encoding the next decode starts with
    pub fn current(&self) -> Option<&'static Encoding> {
        self.order.front().copied()
    }

    /// Moves the head encoding to the tail and returns it
    pub fn rotate(&mut self) -> Option<&'static Encoding> {
        let head = self.order.pop_front()?;
        self.order.push_back(head);
        Some(head)
    }

    /// Encoding names in their current order
    pub fn names(&self) -> Vec<&'static str> {
        self.order.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Decodes `bytes` strictly, rotating past encodings that reject them
    ///
    /// At most `len - 1` encodings are tried (one for a single-entry list), so a
    /// single page never cycles through every candidate. Returns
    /// `DecodeError::Exhausted` when every attempt failed; the list keeps the
    /// rotations it made.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<String, DecodeError> {
        let attempts = match self.order.len() {
            0 | 1 => self.order.len(),
            n => n - 1,
        };
        let mut tried = Vec::with_capacity(attempts);

        for _ in 0..attempts {
            let Some(encoding) = self.current() else {
                break;
            };

            if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes)
            {
                let text = text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string();
                return Ok(text);
            }

            tracing::debug!("Body is not valid {}, rotating encodings", encoding.name());
            tried.push(encoding.name());
            self.rotate();
        }

        Err(DecodeError::Exhausted { tried })
    }
}

impl Default for EncodingPreferences {
    fn default() -> Self {
        // Hardcoded labels are all known to encoding_rs
        Self::new(
            DEFAULT_ENCODINGS
                .iter()
                .filter_map(|label| Encoding::for_label(label.as_bytes())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{GBK, UTF_8, WINDOWS_1252};

    fn gbk_bytes(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = GBK.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_default_order() {
        let prefs = EncodingPreferences::default();
        assert_eq!(prefs.names(), vec!["UTF-8", "GBK", "windows-1252"]);
    }

    #[test]
    fn test_from_labels() {
        let prefs = EncodingPreferences::from_labels(&["shift_jis", "utf-8"]).unwrap();
        assert_eq!(prefs.names(), vec!["Shift_JIS", "UTF-8"]);
        assert!(EncodingPreferences::from_labels(&["bogus"]).is_err());
    }

    #[test]
    fn test_rotate_moves_head_to_tail() {
        let mut prefs = EncodingPreferences::default();
        assert_eq!(prefs.rotate(), Some(UTF_8));
        assert_eq!(prefs.current(), Some(GBK));
        assert_eq!(prefs.names(), vec!["GBK", "windows-1252", "UTF-8"]);
    }

    #[test]
    fn test_utf8_decodes_without_rotation() {
        let mut prefs = EncodingPreferences::default();
        let text = prefs.decode("héllo 中文".as_bytes()).unwrap();
        assert_eq!(text, "héllo 中文");
        assert_eq!(prefs.current(), Some(UTF_8));
    }

    #[test]
    fn test_second_candidate_promoted() {
        let mut prefs = EncodingPreferences::default();
        let text = prefs.decode(&gbk_bytes("中文网页")).unwrap();

        assert_eq!(text, "中文网页");
        assert_eq!(prefs.current(), Some(GBK));
        assert_eq!(prefs.names(), vec!["GBK", "windows-1252", "UTF-8"]);
    }

    #[test]
    fn test_learned_encoding_used_first_next_time() {
        let mut prefs = EncodingPreferences::default();
        prefs.decode(&gbk_bytes("第一页")).unwrap();

        // Plain ASCII decodes under GBK too; no further rotation
        let text = prefs.decode(b"<a href=\"x.html\">").unwrap();
        assert_eq!(text, "<a href=\"x.html\">");
        assert_eq!(prefs.current(), Some(GBK));
    }

    #[test]
    fn test_exhausted_after_len_minus_one_attempts() {
        let mut prefs = EncodingPreferences::default();
        // 0xFF is neither valid UTF-8 nor a GBK lead byte
        let result = prefs.decode(&[0xff, 0xff, 0xff]);

        assert_eq!(
            result,
            Err(DecodeError::Exhausted {
                tried: vec!["UTF-8", "GBK"]
            })
        );
        // The last candidate was never tried but now leads
        assert_eq!(prefs.current(), Some(WINDOWS_1252));
    }

    #[test]
    fn test_single_entry_list_tries_once() {
        let mut prefs = EncodingPreferences::new([UTF_8]);
        assert!(prefs.decode(&[0xff]).is_err());
        assert_eq!(prefs.current(), Some(UTF_8));
        assert_eq!(prefs.decode(b"ok").unwrap(), "ok");
    }

    #[test]
    fn test_empty_list_fails() {
        let mut prefs = EncodingPreferences::new(Vec::<&'static Encoding>::new());
        assert!(prefs.is_empty());
        assert_eq!(
            prefs.decode(b"anything"),
            Err(DecodeError::Exhausted { tried: vec![] })
        );
    }

    #[test]
    fn test_bom_stripped() {
        let mut prefs = EncodingPreferences::default();
        let text = prefs.decode(b"\xef\xbb\xbfhello").unwrap();
        assert_eq!(text, "hello");
    }
}
