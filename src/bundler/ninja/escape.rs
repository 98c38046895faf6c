//! Ninja escaping.

use std::borrow::Cow;

/// Escapes a path for a `build` line: `$`, space and `:` are special there.
pub fn escape_path(path: &str) -> Cow<'_, str> {
    if !path.contains(['$', ' ', ':']) {
        return Cow::Borrowed(path);
    }
    let mut out = String::with_capacity(path.len() + 4);
    for c in path.chars() {
        if matches!(c, '$' | ' ' | ':') {
            out.push('$');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Escapes one word of a rule's `command`.
///
/// Words the shell would split or expand are single-quoted first, then `$`
/// is doubled for ninja.
pub fn escape_command_part(part: &str) -> Cow<'_, str> {
    const SHELL_SPECIAL: &[char] = &[
        ' ', '\t', '\n', '"', '\'', '\\', '`', ';', '&', '|', '<', '>', '(', ')', '*', '?', '[',
        ']', '#', '~', '!', '{', '}',
    ];

    let needs_quotes = part.is_empty() || part.contains(SHELL_SPECIAL);
    if !needs_quotes && !part.contains('$') {
        return Cow::Borrowed(part);
    }

    let quoted = if needs_quotes {
        format!("'{}'", part.replace('\'', r"'\''"))
    } else {
        part.to_string()
    };
    Cow::Owned(quoted.replace('$', "$$"))
}

/// Escapes a free-form variable value such as a `description`.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains('$') {
        Cow::Owned(value.replace('$', "$$"))
    } else {
        Cow::Borrowed(value)
    }
}
