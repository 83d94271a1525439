// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if text_len(text) <= max_len {
        return text.to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Escapes text for SVG element content and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Formats a coordinate; integral values print without a fractional part.
pub(crate) fn push_number(out: &mut String, value: f64) {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(value as i64));
    } else {
        use std::fmt::Write as _;
        let _ = write!(out, "{}", (value * 100.0).round() / 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, push_number, text_len, truncate_with_ellipsis};

    #[test]
    fn truncate_with_ellipsis_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("ВОЛК", 0), "");
        assert_eq!(truncate_with_ellipsis("ВОЛК", 1), "…");
        assert_eq!(truncate_with_ellipsis("ВОЛК", 3), "ВО…");
        assert_eq!(truncate_with_ellipsis("ВОЛК", 4), "ВОЛК");
        assert_eq!(text_len("ЁЖ"), 2);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
        assert_eq!(escape_xml("Енот \"полоскун\""), "Енот &quot;полоскун&quot;");
    }

    #[test]
    fn numbers_drop_trailing_zero_fractions() {
        let mut out = String::new();
        push_number(&mut out, 550.0);
        out.push(' ');
        push_number(&mut out, -4.0);
        out.push(' ');
        push_number(&mut out, 12.375);
        assert_eq!(out, "550 -4 12.38");
    }
}
