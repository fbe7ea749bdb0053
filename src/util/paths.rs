// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Parsing of drag-and-drop paste payloads.
//!
//! Terminal emulators deliver a file drop as a bracketed paste of paths.
//! The exact shape varies: some terminals emit one path per line, others a
//! single space-separated line with shell quoting or backslash-escaped
//! spaces. This parser covers all three so a multi-file drop lands as the
//! same list of paths regardless of the emulator.

/// Splits a paste payload into individual paths.
///
/// Whitespace separates paths except inside single or double quotes, and a
/// backslash escapes the following character outside quotes. Surrounding
/// quotes are stripped from the result.
pub(crate) fn split_dropped_paths(payload: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in payload.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }

        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\\' => escaped = true,
                '\'' | '"' => quote = Some(c),
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        paths.push(std::mem::take(&mut current));
                    }
                }
                c => current.push(c),
            },
        }
    }

    if !current.is_empty() {
        paths.push(current);
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_newline_separated_paths() {
        assert_eq!(
            split_dropped_paths("/a/b.mp3\n/c/d.mp4\n"),
            vec!["/a/b.mp3", "/c/d.mp4"]
        );
    }

    #[test]
    fn splits_space_separated_paths() {
        assert_eq!(
            split_dropped_paths("/a/b.mp3 /c/d.mp4"),
            vec!["/a/b.mp3", "/c/d.mp4"]
        );
    }

    #[test]
    fn respects_quoted_paths_with_spaces() {
        assert_eq!(
            split_dropped_paths("'/music/two words.mp3' \"/v/clip one.mp4\""),
            vec!["/music/two words.mp3", "/v/clip one.mp4"]
        );
    }

    #[test]
    fn respects_backslash_escaped_spaces() {
        assert_eq!(
            split_dropped_paths(r"/music/two\ words.mp3"),
            vec!["/music/two words.mp3"]
        );
    }

    #[test]
    fn empty_payload_yields_nothing() {
        assert!(split_dropped_paths("  \n ").is_empty());
    }
}
