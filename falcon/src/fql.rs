//! Helpers for building Falcon Query Language filters.

/// Quote a value for use inside a single quoted FQL string
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Match every device whose hostname starts with `hostname`: `hostname:'<hostname>*'`
pub fn hostname_prefix(hostname: &str) -> String {
    format!("hostname:{}", quote(&format!("{hostname}*")))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_filter() {
        assert_eq!(hostname_prefix("web-01"), "hostname:'web-01*'");
    }

    #[test]
    fn escapes_quotes() {
        assert_eq!(hostname_prefix("o'brien"), r"hostname:'o\'brien*'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
    }
}
