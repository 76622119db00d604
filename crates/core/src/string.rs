// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! String manipulation functionality.

/// Returns `true` if `s` is `None`, empty, or only whitespace.
///
/// # Examples
///
/// ```
/// use treasury_core::string::is_null_or_whitespace;
///
/// assert!(is_null_or_whitespace(None));
/// assert!(is_null_or_whitespace(Some("  ")));
/// assert!(!is_null_or_whitespace(Some("UnitA")));
/// ```
#[must_use]
pub fn is_null_or_whitespace(s: Option<&str>) -> bool {
    s.is_none_or(|s| s.trim().is_empty())
}

/// Normalizes a case-insensitive identifier: trims surrounding whitespace and lowercases.
///
/// # Examples
///
/// ```
/// use treasury_core::string::normalize_identifier;
///
/// assert_eq!(normalize_identifier("  SCENARIO1 "), "scenario1");
/// ```
#[must_use]
pub fn normalize_identifier(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalizes `s`, falling back to `default` when `s` is missing or blank.
#[must_use]
pub fn normalize_or_default(s: Option<&str>, default: &str) -> String {
    s.filter(|s| !is_null_or_whitespace(Some(s)))
        .map_or_else(|| normalize_identifier(default), normalize_identifier)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, true)]
    #[case(Some(""), true)]
    #[case(Some(" \t"), true)]
    #[case(Some("a"), false)]
    fn test_is_null_or_whitespace(#[case] input: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_null_or_whitespace(input), expected);
    }

    #[rstest]
    #[case("UnitA", "unita")]
    #[case("  $Driver XYZ  ", "$driver xyz")]
    #[case("", "")]
    fn test_normalize_identifier(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_identifier(input), expected);
    }

    #[rstest]
    #[case(None, "base")]
    #[case(Some(""), "base")]
    #[case(Some("   "), "base")]
    #[case(Some(" Scenario1"), "scenario1")]
    fn test_normalize_or_default(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(normalize_or_default(input, " BASE "), expected);
    }
}
